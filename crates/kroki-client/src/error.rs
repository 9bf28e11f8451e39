use std::path::PathBuf;

use kroki_payload::PayloadError;

/// Error returned by a [`RenderClient`](crate::RenderClient).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Transport failure: connection, TLS, timeout or unreadable body.
    #[error("HTTP error: {0}")]
    Http(String),
    /// Service answered with an error status.
    #[error("Kroki returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Diagram source could not be encoded into a request.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Rendered image could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
