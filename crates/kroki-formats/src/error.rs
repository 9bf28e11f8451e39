//! Format resolution errors.

/// Error returned when a diagram type or image format cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// No explicit diagram type and the source file extension is not recognized.
    #[error("unable to infer the diagram type from the file extension '{extension}'")]
    UnresolvableExtension {
        /// Normalized extension including the leading dot (may be empty).
        extension: String,
    },
    /// Source is read from stdin, so there is no extension to infer a type from.
    ///
    /// Reported instead of [`UnresolvableExtension`](Self::UnresolvableExtension)
    /// with an empty extension: `-` never names a file, and asking for
    /// `--type` is more useful than blaming a missing extension.
    #[error("diagram type must be specified when reading from standard input")]
    MissingDiagramType,
    /// Explicit or extension-derived value outside the supported image formats.
    #[error("invalid image format '{0}'")]
    InvalidImageFormat(String),
}
