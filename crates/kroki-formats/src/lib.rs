//! Diagram type and image format resolution for the Kroki CLI.
//!
//! Turns the loosely-typed strings a user types on the command line (`--type`,
//! `--format`, file names) into canonical identifiers the Kroki service
//! understands.
//!
//! # Example
//!
//! ```
//! use kroki_formats::{FormatResolver, FormatTables, ImageFormat};
//!
//! let tables = FormatTables::builtin();
//! let resolver = FormatResolver::new(&tables);
//!
//! let diagram_type = resolver.resolve_diagram_type("", "hello.dot").unwrap();
//! assert_eq!(diagram_type.as_str(), "graphviz");
//!
//! let format = resolver.resolve_image_format("", "hello.jpg").unwrap();
//! assert_eq!(format, ImageFormat::Jpeg);
//! ```

mod error;
mod normalize;
mod resolver;
mod tables;
mod types;

pub use error::FormatError;
pub use normalize::{file_extension, normalize};
pub use resolver::{FormatResolver, RawRequest, ResolvedRequest, STDIO, resolve_output_path};
pub use tables::{AliasTable, FormatTables};
pub use types::{DiagramType, ImageFormat};
