//! Document header section.

use crate::core::Section;

/// Section type of a document header.
pub const HEADER_SECTION: &str = "Header";

/// Exporter identification written in the `Source` property.
///
/// Format: `pix <version> (<build date>)`.
pub fn build_source() -> String {
    let date = option_env!("PIX_BUILD_DATE").unwrap_or("unknown");
    format!("pix {} ({})", env!("CARGO_PKG_VERSION"), date)
}

/// Header of an exported document.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    format_version: i64,
    source: String,
    kind: String,
    name: String,
}

impl Header {
    /// Create a header for a document of the given type (`Prefab`, `Model`, ...).
    pub fn new(format_version: i64, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            format_version,
            source: build_source(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Header of a prefab document.
    pub fn prefab(format_version: i64, name: impl Into<String>) -> Self {
        Self::new(format_version, "Prefab", name)
    }

    /// Replace the `Source` string, e.g. to make output reproducible.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render as a `Header` section.
    pub fn render(&self) -> Section {
        Section::new(HEADER_SECTION)
            .with_prop("FormatVersion", self.format_version)
            .with_prop("Source", self.source.as_str())
            .with_prop("Type", self.kind.as_str())
            .with_prop("Name", self.name.as_str())
    }
}
