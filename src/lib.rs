//! # PIX
//!
//! Writer (and reader) for the PIX hierarchical text container format used by
//! a game engine asset pipeline for meshes, skinning and prefabs.
//!
//! A document is a forest of [`Section`](core::Section)s. Each section holds
//! ordered properties, ordered data rows and nested child sections. The
//! writer renders them into a whitespace- and precision-stable text layout;
//! floats are always written as hex bit patterns, so values survive the text
//! round-trip bit-exactly.
//!
//! ## Modules
//!
//! - [`util`] - Error type and decimal float text
//! - [`core`] - Document model (sections, properties, data rows)
//! - [`skin`] - Skin entry deduplication and skin stream sections
//! - [`builders`] - Document header builder
//! - [`writer`] - PIX text writer
//! - [`reader`] - PIX text reader
//!
//! ## Example
//!
//! ```
//! use pix::prelude::*;
//!
//! let mut stream = SkinStream::new(SkinStreamKind::Position);
//! for vertex in [7, 8, 9] {
//!     stream.add_entry(SkinEntry::new(vertex, [1.0, 2.0, 3.0], [(0, 2.0), (3, 2.0)], 4.0)?);
//! }
//! assert_eq!(stream.item_count(), 1);
//!
//! let doc = vec![
//!     Header::prefab(1, "crossing").render(),
//!     stream.render(),
//! ];
//! let text = render_document(&doc, &WriteOptions::default())?;
//! assert!(text.contains("TotalVertexIndexCount: 3"));
//! # Ok::<(), pix::Error>(())
//! ```

pub mod util;
pub mod core;
pub mod skin;
pub mod builders;
pub mod writer;
pub mod reader;

// Re-export commonly used types
pub use hexfloat;
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::core::{BoneRow, DataRow, ListTag, Matrix, PropValue, Property, Section, Values};
    pub use crate::skin::{PieceSkin, SkinEntry, SkinStream, SkinStreamKind};
    pub use crate::builders::Header;
    pub use crate::writer::{render_document, write_file, PixWriter, WriteOptions, WriteProgress};
    pub use crate::reader::{read_file, read_str};
}
