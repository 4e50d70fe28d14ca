//! Error types for the PIX library.

use thiserror::Error;

/// Main error type for PIX operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Skin entry constructed with a bone weight sum of zero
    #[error("Contract violation: vertex {vertex_index} has a zero bone weight sum")]
    ZeroWeightSum { vertex_index: u32 },

    /// List property without any payload element
    #[error("Contract violation: list property '{key}' has no elements")]
    EmptyList { key: String },

    /// Plain data row whose element kind differs from the block's first row
    #[error("Contract violation: data row {row} holds {found} values, block was started with {expected}")]
    MixedRowKind {
        row: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Referenced external resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed PIX text
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Malformed hex float token
    #[error("Invalid hex float: {0}")]
    HexFloat(#[from] hexfloat::HexFloatError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised while writing a specific section
    #[error("In section '{path}': {source}")]
    InSection {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Wrap this error with the path of the section being processed.
    ///
    /// Nested wrappers collapse into one path, innermost section last.
    pub fn in_section(self, section: &str) -> Self {
        match self {
            Self::InSection { path, source } => Self::InSection {
                path: format!("{}/{}", section, path),
                source,
            },
            other => Self::InSection {
                path: section.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// True for errors caused by a caller breaking the data contract.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Self::ZeroWeightSum { .. } | Self::EmptyList { .. } | Self::MixedRowKind { .. } => true,
            Self::InSection { source, .. } => source.is_contract_violation(),
            _ => false,
        }
    }

    /// Section path attached to this error, if any.
    pub fn section_path(&self) -> Option<&str> {
        match self {
            Self::InSection { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for PIX operations.
pub type Result<T> = std::result::Result<T, Error>;
