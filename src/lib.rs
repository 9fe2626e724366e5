/*! Support for downloading objects from a blob store, as a task operation.

This crate provides the download operation a task-running engine drives: it
renders templated inputs against a run-scoped context, retrieves one object
from an S3-compatible store, spools the body to local temporary storage, and
commits the spooled content as an artifact, reporting the transfer's metadata
as typed, named outputs.

## Driving a download

Build a [BlobDownloader] from its collaborators and call
[`BlobDownloader::download`] with a [DownloadRequest] and a renderer:

* [StorageClientFactory] supplies the store client per invocation;
  [S3ClientFactory] is the production implementation, and
  [`S3ClientFactory::with_endpoint`] targets MinIO, R2 and other
  S3-compatible stores.
* [TempFileProvider] stages the spooled body and commits it into the
  artifact area; [StagingArea] is the filesystem implementation.
* [MetricSink] receives one `file.size` counter per successful transfer.
* [TemplateRenderer] resolves `{{ name }}` expressions in the inputs;
  [ContextRenderer] resolves against a flat variable map.

Each invocation is independent and synchronous from the caller's point of
view: it produces exactly one [DownloadResult] or one [DownloadError], and
failed invocations leave no spooled content behind.

## Faking the collaborators

Every collaborator is a trait, so tests can inject fakes without a network or
a store; see the test modules in this crate for the pattern.

 */
mod download;
mod errors;
mod metrics;
mod output;
mod request;
mod schema;
mod staging;
mod storage;
mod template;

#[cfg(test)]
mod test_helpers;

pub use download::BlobDownloader;
pub use errors::DownloadError;
pub use metrics::{LogMetricSink, MetricSink, NullMetricSink, FILE_SIZE};
pub use output::{DownloadResult, ObjectOutput};
pub use request::DownloadRequest;
pub use schema::{reference_doc, FieldSpec, INPUT_FIELDS, OUTPUT_FIELDS};
pub use staging::{StagedFile, StagingArea, TempFileProvider};
pub use storage::{
    GetObjectParams, ObjectBody, ObjectSummary, S3ClientFactory, StorageClient,
    StorageClientFactory,
};
pub use template::{ContextRenderer, RenderError, TemplateRenderer};
