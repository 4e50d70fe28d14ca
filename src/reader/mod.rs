//! PIX text reader.
//!
//! Parses PIX text back into the section model. Every construct the writer
//! produces is read, so `read -> write` reproduces a written file. Values the
//! reader cannot classify are errors with the offending line number.
//!
//! Some shapes are not distinguishable in text and read back as their
//! closest equivalent:
//! - a single-value hex row reads as a plain float row, not a time row
//! - top-level comment lines read as one `#comment` block
//! - decimal floats in lists are read as `f32`

mod lexer;
mod parser;

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::core::Section;
use crate::util::{Error, Result};

/// Parse PIX text.
pub fn read_str(text: &str) -> Result<Vec<Section>> {
    parser::parse_document(text)
}

/// Read and parse a PIX file.
///
/// A missing file is [`Error::NotFound`]; other I/O failures are [`Error::Io`].
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Section>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;
    let sections = read_str(&text)?;
    debug!(path = %path.display(), sections = sections.len(), "read PIX file");
    Ok(sections)
}
