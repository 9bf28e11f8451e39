//! CLI error types.

use std::path::PathBuf;

use kroki_client::RenderError;
use kroki_config::ConfigError;
use kroki_formats::FormatError;
use kroki_payload::PayloadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Payload(#[from] PayloadError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("failed to read '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
