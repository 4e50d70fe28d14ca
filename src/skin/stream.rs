//! Skin stream - deduplicated skin entries of one attribute kind.

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::entry::SkinEntry;
use crate::core::{DataRow, Section};

/// Section type of a rendered skin stream.
pub const SKIN_STREAM_SECTION: &str = "PieceSkinStream";

/// Attribute a skin stream is skinning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkinStreamKind {
    Position,
    Normal,
    Tangent,
}

impl SkinStreamKind {
    /// Tag written in the `Tag` property.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Position => "_POSITION",
            Self::Normal => "_NORMAL",
            Self::Tangent => "_TANGENT",
        }
    }

    /// Element format written in the `Format` property.
    pub fn format(self) -> &'static str {
        match self {
            Self::Position | Self::Normal => "FLOAT3",
            Self::Tangent => "FLOAT4",
        }
    }

    /// Parse a `Tag` value.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "_POSITION" => Some(Self::Position),
            "_NORMAL" => Some(Self::Normal),
            "_TANGENT" => Some(Self::Tangent),
            _ => None,
        }
    }
}

impl fmt::Display for SkinStreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Deduplicated skin entries in first-seen order.
///
/// One stream is built per export job and stream kind, rendered once and
/// dropped. It is owned by the exporting pass and never shared.
#[derive(Clone, Debug)]
pub struct SkinStream {
    kind: SkinStreamKind,
    entries: IndexMap<String, SkinEntry>,
    total_weight_count: usize,
    total_vertex_index_count: usize,
}

impl SkinStream {
    /// Create an empty stream.
    pub fn new(kind: SkinStreamKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
            total_weight_count: 0,
            total_vertex_index_count: 0,
        }
    }

    /// Add an entry built for a single vertex.
    ///
    /// A new key stores the entry. A known key only records the incoming
    /// entry's first vertex index on the stored one; its other data is
    /// dropped. Returns `true` if a new entry was stored.
    pub fn add_entry(&mut self, entry: SkinEntry) -> bool {
        let key = entry.hash();

        if let Some(existing) = self.entries.get_mut(&key) {
            let vertex_index = entry.first_vertex_index();
            if existing.add_vertex_index(vertex_index) {
                self.total_vertex_index_count += 1;
            }
            trace!(
                vertex_index,
                origin = existing.first_vertex_index(),
                "merged duplicate skin entry"
            );
            return false;
        }

        self.total_weight_count += entry.weight_count();
        self.total_vertex_index_count += 1;
        self.entries.insert(key, entry);
        true
    }

    pub fn kind(&self) -> SkinStreamKind {
        self.kind
    }

    /// Number of distinct entries.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Weights summed over all distinct entries.
    pub fn total_weight_count(&self) -> usize {
        self.total_weight_count
    }

    /// Vertex indices summed over all entries, each index once.
    pub fn total_vertex_index_count(&self) -> usize {
        self.total_vertex_index_count
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = &SkinEntry> {
        self.entries.values()
    }

    /// Look up an entry by its dedup key.
    pub fn entry(&self, key: &str) -> Option<&SkinEntry> {
        self.entries.get(key)
    }

    /// Render as a `PieceSkinStream` section, one skin row per entry in
    /// first-seen order.
    pub fn render(&self) -> Section {
        debug!(
            tag = self.kind.tag(),
            items = self.item_count(),
            weights = self.total_weight_count,
            vertex_indices = self.total_vertex_index_count,
            "rendering skin stream"
        );

        let mut section = Section::new(SKIN_STREAM_SECTION);
        section
            .add_prop("Format", self.kind.format())
            .add_prop("Tag", self.kind.tag())
            .add_prop("ItemCount", self.item_count())
            .add_prop("TotalWeightCount", self.total_weight_count)
            .add_prop("TotalVertexIndexCount", self.total_vertex_index_count);

        section.data = self
            .entries
            .values()
            .map(|entry| DataRow::Skin(entry.to_row()))
            .collect();

        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(vertex: u32, position: [f32; 3], weights: &[(u32, f32)]) -> SkinEntry {
        let sum = weights.iter().map(|(_, w)| w).sum();
        SkinEntry::new(vertex, position, weights.iter().copied(), sum).unwrap()
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(SkinStreamKind::Position.format(), "FLOAT3");
        assert_eq!(SkinStreamKind::Normal.format(), "FLOAT3");
        assert_eq!(SkinStreamKind::Tangent.format(), "FLOAT4");
        assert_eq!(SkinStreamKind::from_tag("_NORMAL"), Some(SkinStreamKind::Normal));
        assert_eq!(SkinStreamKind::from_tag("_UV0"), None);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut stream = SkinStream::new(SkinStreamKind::Position);
        for vertex in 0..5 {
            stream.add_entry(entry(vertex, [1.0, 1.0, 1.0], &[(0, 1.0), (1, 3.0)]));
        }

        assert_eq!(stream.item_count(), 1);
        assert_eq!(stream.total_weight_count(), 2);
        assert_eq!(stream.total_vertex_index_count(), 5);
    }

    #[test]
    fn test_repeated_vertex_not_double_counted() {
        let mut stream = SkinStream::new(SkinStreamKind::Position);
        assert!(stream.add_entry(entry(3, [0.0; 3], &[(0, 1.0)])));
        assert!(!stream.add_entry(entry(3, [0.0; 3], &[(0, 1.0)])));
        assert!(!stream.add_entry(entry(4, [0.0; 3], &[(0, 1.0)])));

        assert_eq!(stream.total_vertex_index_count(), 2);
    }

    #[test]
    fn test_entry_lookup_by_key() {
        let mut stream = SkinStream::new(SkinStreamKind::Normal);
        let first = entry(2, [0.0, 1.0, 0.0], &[(4, 1.0)]);
        let key = first.hash();
        stream.add_entry(first);
        stream.add_entry(entry(9, [0.0, 1.0, 0.0], &[(4, 1.0)]));

        let stored = stream.entry(&key).expect("entry not found");
        assert_eq!(stored.first_vertex_index(), 2);
        assert_eq!(stored.vertex_indices().collect::<Vec<_>>(), vec![2, 9]);
        assert!(stream.entry("(0.0, 0.0, 0.0)01000000").is_none());
    }

    #[test]
    fn test_distinct_entries_keep_insertion_order() {
        let mut stream = SkinStream::new(SkinStreamKind::Normal);
        stream.add_entry(entry(0, [3.0, 0.0, 0.0], &[(0, 1.0)]));
        stream.add_entry(entry(1, [1.0, 0.0, 0.0], &[(0, 1.0)]));
        stream.add_entry(entry(2, [2.0, 0.0, 0.0], &[(0, 1.0)]));

        let xs: Vec<f32> = stream.entries().map(|e| e.position()[0]).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_render_props() {
        let mut stream = SkinStream::new(SkinStreamKind::Tangent);
        stream.add_entry(entry(0, [0.0; 3], &[(2, 1.0)]));

        let section = stream.render();
        assert_eq!(section.kind, SKIN_STREAM_SECTION);
        let keys: Vec<&str> = section.props.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            ["Format", "Tag", "ItemCount", "TotalWeightCount", "TotalVertexIndexCount"]
        );
        assert_eq!(section.prop_str("Format"), Some("FLOAT4"));
        assert_eq!(section.prop_str("Tag"), Some("_TANGENT"));
        assert_eq!(section.prop_int("ItemCount"), Some(1));
        assert_eq!(section.data.len(), 1);
    }
}
