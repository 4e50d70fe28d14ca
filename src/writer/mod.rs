//! PIX text writer.
//!
//! Renders a forest of [`Section`](crate::core::Section)s into the PIX text
//! encoding: `<type> {` ... `}` blocks, one property or data row per line,
//! floats as `&`-prefixed hex bit patterns.
//!
//! ```
//! use pix::core::Section;
//! use pix::writer::{render_document, WriteOptions};
//!
//! let doc = vec![Section::new("Header").with_prop("FormatVersion", 1)];
//! let text = render_document(&doc, &WriteOptions::default()).unwrap();
//! assert_eq!(text, "Header {\n    FormatVersion: 1\n}\n\n");
//! ```

mod document;
mod format;
mod options;

pub use document::{render_document, write_file, write_file_with_progress, PixWriter, WriteProgress};
pub use options::{WriteOptions, DEFAULT_INDENT};
