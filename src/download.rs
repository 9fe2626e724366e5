use crate::errors::DownloadError;
use crate::metrics::{self, MetricSink};
use crate::output::{DownloadResult, ObjectOutput};
use crate::request::DownloadRequest;
use crate::staging::{StagedFile, TempFileProvider};
use crate::storage::{ObjectBody, StorageClientFactory};
use crate::template::TemplateRenderer;
use anyhow::anyhow;
use slog::{debug, info, o, Logger};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

const SPOOL_PREFIX: &str = "download_";
const SPOOL_SUFFIX: &str = ".blob";

/// A BlobDownloader performs single-object downloads on behalf of a task
/// engine: render the templated inputs, retrieve the object, spool the body
/// locally, and commit the spooled content as an artifact.  It holds no state
/// across invocations; concurrency, cancellation and retry policy all belong
/// to the caller, at whole-invocation granularity.
pub struct BlobDownloader {
    logger: Logger,
    client_factory: Arc<dyn StorageClientFactory>,
    temp_store: Arc<dyn TempFileProvider>,
    metrics: Arc<dyn MetricSink>,
}

impl BlobDownloader {
    pub fn new(
        logger: Logger,
        client_factory: Arc<dyn StorageClientFactory>,
        temp_store: Arc<dyn TempFileProvider>,
        metrics: Arc<dyn MetricSink>,
    ) -> Self {
        Self {
            logger,
            client_factory,
            temp_store,
            metrics,
        }
    }

    /// Download one object, producing exactly one [`DownloadResult`] or one
    /// [`DownloadError`].  The spool file is discarded on every failure path,
    /// and the client handle is released when the invocation returns.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        renderer: &dyn TemplateRenderer,
    ) -> Result<DownloadResult, DownloadError> {
        // all templated inputs must resolve before any I/O happens
        let params = request.render(renderer)?;

        let staged = self
            .temp_store
            .create(SPOOL_PREFIX, SPOOL_SUFFIX)
            .map_err(DownloadError::Resource)?;

        let client = self
            .client_factory
            .client()
            .map_err(DownloadError::Transfer)?;

        debug!(self.logger, "retrieving object";
            o!("bucket" => params.bucket.as_str(), "key" => params.key.as_str()));
        let (summary, body) = client
            .get_object(&params)
            .await
            .map_err(DownloadError::Transfer)?;

        // spool the complete body before anything is exposed to the caller;
        // `staged` dropping on an early return removes the partial content
        let written = spool(&staged, body).await?;
        if let Some(expected) = summary.content_length {
            if written != expected {
                return Err(DownloadError::Transfer(anyhow!(
                    "body truncated: got {} of {} bytes",
                    written,
                    expected
                )));
            }
        }

        let uri = self
            .temp_store
            .commit(staged)
            .map_err(DownloadError::Resource)?;

        // the invocation has succeeded; record the transfer
        self.metrics.counter(metrics::FILE_SIZE, written);
        info!(self.logger, "downloaded object";
            o!("bucket" => params.bucket.as_str(), "key" => params.key.as_str(), "bytes" => written));

        Ok(DownloadResult {
            uri,
            content_length: written,
            content_type: summary.content_type,
            metadata: summary.metadata,
            object: ObjectOutput {
                e_tag: summary.e_tag,
                version_id: summary.version_id,
            },
        })
    }
}

/// Write the full body stream to the staged path, returning the byte count.
async fn spool(staged: &StagedFile, body: ObjectBody) -> Result<u64, DownloadError> {
    let mut file = tokio::fs::File::create(staged.path())
        .await
        .map_err(DownloadError::Resource)?;
    let mut reader = StreamReader::new(body);
    let written = tokio::io::copy(&mut reader, &mut file)
        .await
        .map_err(|e| DownloadError::Transfer(e.into()))?;
    file.flush().await.map_err(DownloadError::Resource)?;
    Ok(written)
}
