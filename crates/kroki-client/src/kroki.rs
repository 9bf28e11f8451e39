//! HTTP client for a Kroki service.

use std::time::Duration;

use kroki_formats::{DiagramType, ImageFormat};
use ureq::Agent;

use crate::{RenderClient, RenderError, RenderedDiagram};

/// Upper bound on a response body; large PNG and PDF renders exceed the
/// ureq default.
const MAX_RESPONSE_SIZE: u64 = 64 * 1024 * 1024;

/// Renders diagrams with `GET {endpoint}/{type}/{format}/{payload}`.
#[derive(Debug, Clone)]
pub struct KrokiClient {
    agent: Agent,
    endpoint: String,
}

impl KrokiClient {
    /// Create a client for `endpoint` (e.g. `https://kroki.io`).
    ///
    /// `timeout` bounds each render call as a whole: connect, send and read.
    #[must_use]
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
        }
    }

    /// Service base URL without trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET URL that renders `source`.
    pub fn diagram_url(
        &self,
        source: &str,
        diagram_type: &DiagramType,
        image_format: ImageFormat,
    ) -> Result<String, RenderError> {
        let payload = kroki_payload::encode(source)?;
        Ok(format!(
            "{}/{diagram_type}/{image_format}/{payload}",
            self.endpoint
        ))
    }
}

impl RenderClient for KrokiClient {
    fn render(
        &self,
        source: &str,
        diagram_type: &DiagramType,
        image_format: ImageFormat,
    ) -> Result<RenderedDiagram, RenderError> {
        let url = self.diagram_url(source, diagram_type, image_format)?;
        tracing::debug!(%url, "Requesting diagram");

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| RenderError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(RenderError::Status {
                status,
                body: error_body.trim().to_owned(),
            });
        }

        let bytes = body
            .with_config()
            .limit(MAX_RESPONSE_SIZE)
            .read_to_vec()
            .map_err(|e| RenderError::Http(e.to_string()))?;
        tracing::debug!(status, size = bytes.len(), "Received diagram");

        Ok(RenderedDiagram {
            image_format,
            bytes,
        })
    }
}
