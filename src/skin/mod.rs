//! Skin deduplication.
//!
//! - [`SkinEntry`] - Position and normalized weights shared by one or more vertices
//! - [`SkinStream`] - Entries of one attribute kind, deduplicated by content key
//! - [`PieceSkin`] - Streams of one mesh piece

mod entry;
mod piece;
mod stream;

pub use entry::{SkinEntry, HASH_PRECISION};
pub use piece::{PieceSkin, PIECE_SKIN_SECTION};
pub use stream::{SkinStream, SkinStreamKind, SKIN_STREAM_SECTION};
