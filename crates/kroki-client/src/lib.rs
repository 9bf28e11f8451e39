//! Rendering diagrams through a Kroki service.
//!
//! [`RenderClient`] is the seam between the CLI and the network: the CLI only
//! sees resolved requests and rendered bytes, so tests can substitute an
//! in-memory implementation.

mod error;
mod kroki;

use std::path::Path;

use kroki_formats::{DiagramType, ImageFormat};

pub use error::RenderError;
pub use kroki::KrokiClient;

/// Rendered image returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    /// Format the image was rendered in.
    pub image_format: ImageFormat,
    /// Raw response body (SVG text, PNG bytes, ...).
    pub bytes: Vec<u8>,
}

impl RenderedDiagram {
    /// Whether the image is printable text (SVG or base64).
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.image_format.is_text()
    }
}

/// Renders diagram source into an image.
pub trait RenderClient {
    /// Render `source` as `diagram_type` into `image_format`.
    ///
    /// One call is one request; failures are returned, not retried.
    fn render(
        &self,
        source: &str,
        diagram_type: &DiagramType,
        image_format: ImageFormat,
    ) -> Result<RenderedDiagram, RenderError>;

    /// Write a rendered image to `path`, replacing any existing file.
    fn persist(&self, path: &Path, diagram: &RenderedDiagram) -> Result<(), RenderError> {
        std::fs::write(path, &diagram.bytes).map_err(|source| RenderError::Persist {
            path: path.to_path_buf(),
            source,
        })
    }
}
