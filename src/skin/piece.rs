//! Piece skin - all skin streams of one mesh piece.

use indexmap::IndexMap;

use super::stream::{SkinStream, SkinStreamKind};
use crate::core::Section;

/// Section type of a rendered piece skin.
pub const PIECE_SKIN_SECTION: &str = "PieceSkin";

/// Skin streams of a mesh piece, at most one per kind.
#[derive(Clone, Debug)]
pub struct PieceSkin {
    piece: u32,
    streams: IndexMap<SkinStreamKind, SkinStream>,
}

impl PieceSkin {
    /// Create a piece skin around its first stream (normally the position stream).
    pub fn new(piece: u32, stream: SkinStream) -> Self {
        let mut streams = IndexMap::new();
        streams.insert(stream.kind(), stream);
        Self { piece, streams }
    }

    /// Index of the skinned piece.
    pub fn piece(&self) -> u32 {
        self.piece
    }

    /// Add a stream, returning the replaced stream of the same kind.
    pub fn add_stream(&mut self, stream: SkinStream) -> Option<SkinStream> {
        self.streams.insert(stream.kind(), stream)
    }

    /// Stream of the given kind.
    pub fn skin_stream(&self, kind: SkinStreamKind) -> Option<&SkinStream> {
        self.streams.get(&kind)
    }

    /// Mutable stream of the given kind.
    pub fn skin_stream_mut(&mut self, kind: SkinStreamKind) -> Option<&mut SkinStream> {
        self.streams.get_mut(&kind)
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Render as a `PieceSkin` section with one child per stream.
    pub fn render(&self) -> Section {
        let mut section = Section::new(PIECE_SKIN_SECTION);
        section
            .add_prop("Piece", self.piece)
            .add_prop("StreamCount", self.stream_count());

        for stream in self.streams.values() {
            section.add_section(stream.render());
        }
        section
    }
}
