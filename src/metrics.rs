//! Fire-and-forget metric emission for the task engine's metrics pipeline.

use slog::{info, o, Logger};

/// Counter recording the byte size of each transferred object.
pub const FILE_SIZE: &str = "file.size";

/// A MetricSink accepts numeric observations.  Emission is fire-and-forget;
/// at-least-once delivery is acceptable, so implementations should not block
/// or fail the invocation.
pub trait MetricSink: 'static + Sync + Send {
    fn counter(&self, name: &str, value: u64);
}

/// A sink that records observations to a structured log, for deployments
/// without a metrics pipeline.
pub struct LogMetricSink {
    logger: Logger,
}

impl LogMetricSink {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl MetricSink for LogMetricSink {
    fn counter(&self, name: &str, value: u64) {
        info!(self.logger, "counter"; o!("name" => name, "value" => value));
    }
}

/// A sink that discards all observations.
pub struct NullMetricSink;

impl MetricSink for NullMetricSink {
    fn counter(&self, _name: &str, _value: u64) {}
}
