//! Immutable alias tables for diagram types and image formats.
//!
//! Each [`AliasTable`] is built in two steps: the irregular aliases go in
//! first, then the identity entries derived from the canonical identifiers are
//! merged on top. A canonical identifier therefore always resolves to itself,
//! even if an alias with the same spelling exists.

use std::collections::HashMap;

use crate::normalize::normalize;
use crate::types::{CANONICAL_DIAGRAM_TYPES, DiagramType, ImageFormat};

/// Irregular diagram type names.
const DIAGRAM_TYPE_NAME_ALIASES: &[(&str, &str)] = &[("dot", "graphviz")];

/// Irregular diagram source file extensions.
const DIAGRAM_TYPE_EXTENSION_ALIASES: &[(&str, &str)] = &[
    (".dot", "graphviz"),
    (".gv", "graphviz"),
    (".puml", "plantuml"),
    (".c4", "c4plantuml"),
    (".c4puml", "c4plantuml"),
    (".er", "erd"),
    (".vg", "vega"),
    (".vl", "vegalite"),
    (".vgl", "vegalite"),
];

/// Irregular image format names.
const IMAGE_FORMAT_NAME_ALIASES: &[(&str, ImageFormat)] = &[("jpg", ImageFormat::Jpeg)];

/// Irregular image file extensions.
const IMAGE_FORMAT_EXTENSION_ALIASES: &[(&str, ImageFormat)] =
    &[(".jpg", ImageFormat::Jpeg)];

/// Name and file-extension lookup for one kind of canonical identifier.
///
/// Keys are normalized on insertion and callers are expected to pass
/// normalized keys to [`name`](Self::name) and [`extension`](Self::extension).
#[derive(Debug, Clone)]
pub struct AliasTable<T> {
    names: HashMap<String, T>,
    extensions: HashMap<String, T>,
}

impl<T: Clone> AliasTable<T> {
    /// Build a table from irregular aliases and the canonical identifiers.
    ///
    /// `canonical` pairs each identifier with its value; every identifier is
    /// registered as `id` in the name table and `.id` in the extension table
    /// after the aliases, so identity entries take precedence.
    fn build<'a>(
        name_aliases: impl IntoIterator<Item = (&'a str, T)>,
        extension_aliases: impl IntoIterator<Item = (&'a str, T)>,
        canonical: impl IntoIterator<Item = (&'a str, T)>,
    ) -> Self {
        let mut names: HashMap<String, T> = name_aliases
            .into_iter()
            .map(|(alias, value)| (normalize(alias), value))
            .collect();
        let mut extensions: HashMap<String, T> = extension_aliases
            .into_iter()
            .map(|(alias, value)| (normalize(alias), value))
            .collect();

        for (id, value) in canonical {
            let id = normalize(id);
            extensions.insert(format!(".{id}"), value.clone());
            names.insert(id, value);
        }

        Self { names, extensions }
    }

    /// Look up a normalized name.
    #[must_use]
    pub fn name(&self, normalized: &str) -> Option<&T> {
        self.names.get(normalized)
    }

    /// Look up a normalized file extension (with leading dot).
    #[must_use]
    pub fn extension(&self, normalized: &str) -> Option<&T> {
        self.extensions.get(normalized)
    }

    #[cfg(test)]
    pub(crate) fn name_count(&self) -> usize {
        self.names.len()
    }

    #[cfg(test)]
    pub(crate) fn extension_count(&self) -> usize {
        self.extensions.len()
    }
}

/// All lookup tables used by [`FormatResolver`](crate::FormatResolver).
///
/// Build once with [`FormatTables::builtin`] and share by reference; the
/// tables are never mutated after construction.
#[derive(Debug, Clone)]
pub struct FormatTables {
    /// Diagram type names and source file extensions.
    pub diagram_types: AliasTable<DiagramType>,
    /// Image format names and output file extensions.
    pub image_formats: AliasTable<ImageFormat>,
}

impl FormatTables {
    /// Tables for every diagram type and image format known to this client.
    #[must_use]
    pub fn builtin() -> Self {
        let diagram_type =
            |(alias, id): &(&'static str, &'static str)| (*alias, DiagramType::new(*id));

        let diagram_types = AliasTable::build(
            DIAGRAM_TYPE_NAME_ALIASES.iter().map(diagram_type),
            DIAGRAM_TYPE_EXTENSION_ALIASES.iter().map(diagram_type),
            CANONICAL_DIAGRAM_TYPES
                .iter()
                .map(|id| (*id, DiagramType::new(*id))),
        );

        let image_formats = AliasTable::build(
            IMAGE_FORMAT_NAME_ALIASES.iter().copied(),
            IMAGE_FORMAT_EXTENSION_ALIASES.iter().copied(),
            ImageFormat::ALL.iter().map(|format| (format.as_str(), *format)),
        );

        Self {
            diagram_types,
            image_formats,
        }
    }
}

impl Default for FormatTables {
    fn default() -> Self {
        Self::builtin()
    }
}
