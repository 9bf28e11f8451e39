//! Canonical identifiers for diagram source languages and image formats.

use std::fmt;

/// Canonical identifier for a diagram source language.
///
/// The set is open-ended: Kroki may support diagram types this client has
/// never heard of, so any normalized string is a valid `DiagramType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramType(String);

impl DiagramType {
    /// Wrap an already-normalized identifier.
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Kroki endpoint name for this diagram type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Diagram types known to this client.
pub(crate) const CANONICAL_DIAGRAM_TYPES: &[&str] = &[
    "actdiag",
    "blockdiag",
    "bpmn",
    "bytefield",
    "c4plantuml",
    "d2",
    "dbml",
    "ditaa",
    "erd",
    "excalidraw",
    "graphviz",
    "mermaid",
    "nomnoml",
    "nwdiag",
    "packetdiag",
    "pikchr",
    "plantuml",
    "rackdiag",
    "seqdiag",
    "structurizr",
    "svgbob",
    "symbolator",
    "tikz",
    "umlet",
    "vega",
    "vegalite",
    "wavedrom",
    "wireviz",
];

/// Output image format understood by this client.
///
/// Unlike [`DiagramType`], this is a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Scalable Vector Graphics (default).
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
    /// Base64-encoded PNG, returned as text.
    Base64,
}

impl ImageFormat {
    /// Every supported image format.
    pub const ALL: [Self; 5] = [Self::Svg, Self::Png, Self::Jpeg, Self::Pdf, Self::Base64];

    /// Return format as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Pdf => "pdf",
            Self::Base64 => "base64",
        }
    }

    /// Whether the rendered output is printable text rather than binary data.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Svg | Self::Base64)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
