//! Utilities for testing downloads
use crate::metrics::MetricSink;
use crate::storage::{
    GetObjectParams, ObjectBody, ObjectSummary, StorageClient, StorageClientFactory,
};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use slog::{o, Drain};
use std::sync::{Arc, Mutex};

/// Create a Logger for use in tests
pub(crate) fn test_logger() -> slog::Logger {
    let decorator = slog_term::PlainSyncDecorator::new(slog_term::TestStdoutWriter);
    let drain = slog_term::FullFormat::new(decorator).build().fuse();

    slog::Logger::root(drain, o!())
}

/// Event logger, used to log events from various places and then assert on them.
#[derive(Default, Clone)]
pub(crate) struct Logger {
    logged: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub(crate) fn log<S: Into<String>>(&self, message: S) {
        self.logged.lock().unwrap().push(message.into())
    }

    pub(crate) fn assert(&self, expected: Vec<String>) {
        assert_eq!(*self.logged.lock().unwrap(), expected);
    }
}

/// Fake implementation of the storage client, serving a fixed summary and
/// body.  Each call is logged as `getObject <bucket> <key> <version> <payer>`
/// with `-` standing in for absent optionals.
pub(crate) struct FakeStorageClient {
    pub(crate) logger: Logger,
    pub(crate) summary: ObjectSummary,
    pub(crate) body: &'static [u8],
    /// End the body stream with a connection-reset error after the data.
    pub(crate) interrupt: bool,
}

#[async_trait]
impl StorageClient for FakeStorageClient {
    async fn get_object(&self, params: &GetObjectParams) -> Result<(ObjectSummary, ObjectBody)> {
        self.logger.log(format!(
            "getObject {} {} {} {}",
            params.bucket,
            params.key,
            params.version_id.as_deref().unwrap_or("-"),
            params.request_payer.as_deref().unwrap_or("-"),
        ));

        let mut chunks: Vec<std::io::Result<Bytes>> = vec![Ok(Bytes::from_static(self.body))];
        if self.interrupt {
            chunks.push(Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )));
        }
        Ok((
            self.summary.clone(),
            Box::pin(futures_util::stream::iter(chunks)),
        ))
    }
}

/// A [`StorageClientFactory`] that hands out the same fake client every time.
pub(crate) struct FakeClientFactory {
    pub(crate) client: Arc<FakeStorageClient>,
}

impl StorageClientFactory for FakeClientFactory {
    fn client(&self) -> Result<Arc<dyn StorageClient>> {
        Ok(self.client.clone())
    }
}

/// A metric sink that records every observation for later assertion.
#[derive(Default)]
pub(crate) struct FakeMetricSink {
    counters: Mutex<Vec<(String, u64)>>,
}

impl FakeMetricSink {
    pub(crate) fn assert(&self, expected: Vec<(String, u64)>) {
        assert_eq!(*self.counters.lock().unwrap(), expected);
    }
}

impl MetricSink for FakeMetricSink {
    fn counter(&self, name: &str, value: u64) {
        self.counters.lock().unwrap().push((name.to_owned(), value));
    }
}
