//! The download task's input, as deserialized from an engine payload.

use crate::storage::GetObjectParams;
use crate::template::{RenderError, TemplateRenderer};
use serde::Deserialize;

/// Inputs for one download invocation.  Every field may contain template
/// expressions; [`DownloadRequest::render`] resolves them all before any I/O
/// begins.  Constructed fresh per invocation and not reused.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    /// The bucket holding the object.
    pub bucket: String,
    /// The key of the object to download.
    pub key: String,
    /// Version id referencing a specific revision of the object.  When
    /// absent, the latest revision is served.
    #[serde(default)]
    pub version_id: Option<String>,
    /// Requester-pays mode forwarded to the store.
    #[serde(default)]
    pub request_payer: Option<String>,
}

impl DownloadRequest {
    /// Resolve all templated fields to concrete retrieval parameters.
    /// Optional fields keep their presence: absent stays absent, present is
    /// rendered even when it renders to the empty string.
    pub fn render(&self, renderer: &dyn TemplateRenderer) -> Result<GetObjectParams, RenderError> {
        Ok(GetObjectParams {
            bucket: renderer.render(&self.bucket)?,
            key: renderer.render(&self.key)?,
            version_id: renderer.render_opt(self.version_id.as_deref())?,
            request_payer: renderer.render_opt(self.request_payer.as_deref())?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::template::ContextRenderer;
    use serde_json::json;

    #[test]
    fn deserializes_from_an_engine_payload() {
        let request: DownloadRequest = serde_json::from_value(json!({
            "bucket": "my-bucket",
            "key": "path/to/file",
            "versionId": "v2",
        }))
        .unwrap();
        assert_eq!(request.bucket, "my-bucket");
        assert_eq!(request.version_id.as_deref(), Some("v2"));
        assert_eq!(request.request_payer, None);
    }

    #[test]
    fn renders_every_field() {
        let request = DownloadRequest {
            bucket: "{{ env }}-data".to_owned(),
            key: "objects/{{ name }}".to_owned(),
            version_id: Some("{{ rev }}".to_owned()),
            request_payer: None,
        };
        let renderer = ContextRenderer::default()
            .var("env", "prod")
            .var("name", "a.bin")
            .var("rev", "v2");

        let params = request.render(&renderer).unwrap();
        assert_eq!(params.bucket, "prod-data");
        assert_eq!(params.key, "objects/a.bin");
        assert_eq!(params.version_id.as_deref(), Some("v2"));
        assert_eq!(params.request_payer, None);
    }

    #[test]
    fn empty_string_is_still_present() {
        let request = DownloadRequest {
            bucket: "b".to_owned(),
            key: "k".to_owned(),
            version_id: Some("".to_owned()),
            request_payer: None,
        };
        let params = request.render(&ContextRenderer::default()).unwrap();
        assert_eq!(params.version_id.as_deref(), Some(""));
    }

    #[test]
    fn unresolved_field_fails_the_render() {
        let request = DownloadRequest {
            bucket: "{{ missing }}".to_owned(),
            key: "k".to_owned(),
            ..Default::default()
        };
        assert!(request.render(&ContextRenderer::default()).is_err());
    }
}
