//! Resolution of raw CLI strings into canonical identifiers.
//!
//! Precedence is the same for diagram types and image formats: an explicit
//! value always wins, and extension inference only runs when no explicit value
//! was given. Diagram types are permissive (unknown names pass through) while
//! image formats are strict (unknown names are an error).

use crate::error::FormatError;
use crate::normalize::{file_extension, normalize, strip_extension};
use crate::tables::FormatTables;
use crate::types::{DiagramType, ImageFormat};

/// Path sentinel meaning standard input or standard output.
pub const STDIO: &str = "-";

/// Raw, unvalidated values gathered by the CLI for one conversion.
///
/// Empty strings mean "not given".
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRequest<'a> {
    /// Value of `--type`.
    pub diagram_type: &'a str,
    /// Value of `--format`.
    pub image_format: &'a str,
    /// Value of `--out-file`.
    pub out_file: &'a str,
    /// Input file path, or [`STDIO`].
    pub input_path: &'a str,
}

/// Everything needed to render one diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub diagram_type: DiagramType,
    pub image_format: ImageFormat,
    pub source_text: String,
    /// Destination file, or [`STDIO`] for standard output.
    pub output_path: String,
}

impl ResolvedRequest {
    /// Whether the result goes to standard output.
    #[must_use]
    pub fn writes_to_stdout(&self) -> bool {
        self.output_path == STDIO
    }
}

/// Resolves diagram types, image formats and output paths against a set of
/// [`FormatTables`].
#[derive(Debug, Clone, Copy)]
pub struct FormatResolver<'a> {
    tables: &'a FormatTables,
}

impl<'a> FormatResolver<'a> {
    /// Create a resolver backed by `tables`.
    #[must_use]
    pub fn new(tables: &'a FormatTables) -> Self {
        Self { tables }
    }

    /// Resolve the diagram type from `--type` or the source file extension.
    ///
    /// An explicit `raw` value that is not in the table is accepted as-is
    /// (normalized), so diagram types added to Kroki later keep working.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingDiagramType`] if `raw` is empty and the
    /// source is stdin, or [`FormatError::UnresolvableExtension`] if `raw` is
    /// empty and the extension of `file_path` is unknown.
    pub fn resolve_diagram_type(
        &self,
        raw: &str,
        file_path: &str,
    ) -> Result<DiagramType, FormatError> {
        let name = normalize(raw);
        if !name.is_empty() {
            return Ok(self
                .tables
                .diagram_types
                .name(&name)
                .cloned()
                .unwrap_or_else(|| DiagramType::new(name)));
        }

        if file_path == STDIO {
            return Err(FormatError::MissingDiagramType);
        }

        let extension = normalize(file_extension(file_path));
        self.tables
            .diagram_types
            .extension(&extension)
            .cloned()
            .ok_or(FormatError::UnresolvableExtension { extension })
    }

    /// Resolve the image format from `--format`, the output file extension,
    /// or the default (`svg`), in that order.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidImageFormat`] if the explicit value or
    /// the output file extension is not a supported image format.
    pub fn resolve_image_format(
        &self,
        raw: &str,
        out_file: &str,
    ) -> Result<ImageFormat, FormatError> {
        let name = normalize(raw);
        if !name.is_empty() {
            return self
                .tables
                .image_formats
                .name(&name)
                .copied()
                .ok_or(FormatError::InvalidImageFormat(name));
        }

        if out_file.is_empty() || out_file == STDIO {
            return Ok(ImageFormat::default());
        }

        let extension = normalize(file_extension(out_file));
        self.tables
            .image_formats
            .extension(&extension)
            .copied()
            .ok_or(FormatError::InvalidImageFormat(extension))
    }

    /// Resolve all values for a single conversion.
    ///
    /// `read_source` is called only once the type and format have resolved,
    /// so a bad `--type` or `--format` is reported without waiting on stdin.
    /// When reading from stdin without `--out-file`, the result goes to
    /// stdout instead of a file derived from the input path.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`resolve_diagram_type`](Self::resolve_diagram_type)
    /// or [`resolve_image_format`](Self::resolve_image_format), or the error
    /// returned by `read_source`.
    pub fn resolve_request<E>(
        &self,
        raw: &RawRequest<'_>,
        read_source: impl FnOnce() -> Result<String, E>,
    ) -> Result<ResolvedRequest, E>
    where
        E: From<FormatError>,
    {
        let diagram_type = self.resolve_diagram_type(raw.diagram_type, raw.input_path)?;
        let image_format = self.resolve_image_format(raw.image_format, raw.out_file)?;

        let output_path = if raw.input_path == STDIO && raw.out_file.is_empty() {
            STDIO.to_owned()
        } else {
            resolve_output_path(raw.out_file, raw.input_path, image_format)
        };

        Ok(ResolvedRequest {
            diagram_type,
            image_format,
            source_text: read_source()?,
            output_path,
        })
    }
}

/// Resolve where the rendered image is written.
///
/// A non-empty `out_file` is returned unchanged, including [`STDIO`]. Otherwise
/// the extension of `input_path` is replaced by the image format.
#[must_use]
pub fn resolve_output_path(out_file: &str, input_path: &str, image_format: ImageFormat) -> String {
    if !out_file.is_empty() {
        return out_file.to_owned();
    }
    format!("{}.{}", strip_extension(input_path), image_format.as_str())
}
