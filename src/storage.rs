//! Trait wrappers around the blob store client to allow fake injection during
//! tests, plus the production implementation backed by the AWS S3 SDK.

use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::types::RequestPayer;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::sync::Arc;

/// Concrete (fully rendered) parameters for a single object retrieval.
/// Optional fields are forwarded to the store only when present; an empty
/// string is still a present value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetObjectParams {
    pub bucket: String,
    pub key: String,
    pub version_id: Option<String>,
    pub request_payer: Option<String>,
}

/// Metadata reported by the store for a retrieved object.
#[derive(Debug, Clone, Default)]
pub struct ObjectSummary {
    pub e_tag: Option<String>,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    pub metadata: HashMap<String, String>,
    pub version_id: Option<String>,
}

/// The object body, as a stream of byte chunks.
pub type ObjectBody = BoxStream<'static, std::io::Result<Bytes>>;

/// A wrapper around the necessary methods of the blob store client.  In
/// production this is the S3 SDK client; in tests it can be faked.
#[async_trait]
pub trait StorageClient: 'static + Sync + Send {
    /// Retrieve a single object, returning its metadata and body stream.
    /// Connection setup and teardown are the client's responsibility.
    async fn get_object(&self, params: &GetObjectParams) -> Result<(ObjectSummary, ObjectBody)>;
}

/// A StorageClientFactory supplies client instances on-demand.  Call this for
/// each invocation rather than caching the value, so the handle's lifetime is
/// bounded by the invocation.  This trait is also a useful point for
/// dependency injection in tests.
pub trait StorageClientFactory: 'static + Sync + Send {
    fn client(&self) -> Result<Arc<dyn StorageClient>>;
}

/// Trivial implementation of the StorageClient trait for the S3 SDK client.
#[async_trait]
impl StorageClient for aws_sdk_s3::Client {
    async fn get_object(&self, params: &GetObjectParams) -> Result<(ObjectSummary, ObjectBody)> {
        let mut builder = self
            .get_object()
            .bucket(&params.bucket)
            .key(&params.key);
        if let Some(version_id) = &params.version_id {
            builder = builder.version_id(version_id);
        }
        if let Some(payer) = &params.request_payer {
            builder = builder.request_payer(RequestPayer::from(payer.as_str()));
        }
        let output = builder.send().await?;

        let summary = ObjectSummary {
            e_tag: output.e_tag().map(str::to_owned),
            content_length: output
                .content_length()
                .and_then(|len| u64::try_from(len).ok()),
            content_type: output.content_type().map(str::to_owned),
            metadata: output.metadata().cloned().unwrap_or_default(),
            version_id: output.version_id().map(str::to_owned),
        };

        let body = futures_util::stream::try_unfold(output.body, |mut body| async move {
            let chunk = body
                .try_next()
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            Ok(chunk.map(|bytes| (bytes, body)))
        });

        Ok((summary, Box::pin(body)))
    }
}

/// A [`StorageClientFactory`] producing S3 SDK clients.  The SDK client is
/// cheap to clone, so one configured instance serves all invocations.
pub struct S3ClientFactory {
    client: aws_sdk_s3::Client,
}

impl S3ClientFactory {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a factory from the ambient AWS configuration (environment,
    /// profile, instance metadata).
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }

    /// Build a factory targeting an S3-compatible store at the given endpoint
    /// (MinIO, R2, and the like), with path-style addressing.
    pub async fn with_endpoint(endpoint_url: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .endpoint_url(endpoint_url)
            .force_path_style(true)
            .build();
        Self::new(aws_sdk_s3::Client::from_conf(s3_config))
    }
}

impl StorageClientFactory for S3ClientFactory {
    fn client(&self) -> Result<Arc<dyn StorageClient>> {
        Ok(Arc::new(self.client.clone()))
    }
}
