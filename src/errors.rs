use crate::template::RenderError;
use thiserror::Error;

/// The single error surface of a download invocation.  Every failure is fatal
/// to the invocation; retry policy belongs to the engine driving it, at
/// whole-invocation granularity.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// A templated input could not be resolved.  Raised before any I/O.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The store rejected the request, or the body stream failed or came up
    /// short.  Any partially spooled content has been discarded.
    #[error("transfer failed: {0}")]
    Transfer(anyhow::Error),

    /// The local spool resource could not be created or committed.
    #[error("local staging failed: {0}")]
    Resource(std::io::Error),
}
