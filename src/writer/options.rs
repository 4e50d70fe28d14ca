//! Writer configuration.

/// Default indent unit: four spaces.
pub const DEFAULT_INDENT: &str = "    ";

/// Options controlling how a document is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// String repeated once per nesting level.
    pub indent: String,
    /// Log a progress line at info level after each top-level section.
    pub report_progress: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            report_progress: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `indent` as the per-level indent unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Indent with `width` spaces per level.
    pub fn with_spaces(self, width: usize) -> Self {
        self.with_indent(" ".repeat(width))
    }

    /// Indent with one tab per level.
    pub fn with_tabs(self) -> Self {
        self.with_indent("\t")
    }

    pub fn with_progress(mut self, report: bool) -> Self {
        self.report_progress = report;
        self
    }
}
