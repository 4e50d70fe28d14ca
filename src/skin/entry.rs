//! Skin entry - one canonical skinned vertex.

use std::collections::BTreeMap;

use indexmap::IndexSet;

use crate::core::SkinRow;
use crate::util::{fmt_position, Error, Result};

/// Decimal digits of weight kept in the dedup key.
pub const HASH_PRECISION: i32 = 6;

/// Position plus normalized bone weights shared by one or more vertices.
///
/// Entries with the same position text and the same weights truncated to
/// [`HASH_PRECISION`] digits are duplicates; a stream keeps the first and
/// records the vertex indices of the rest on it.
#[derive(Clone, Debug)]
pub struct SkinEntry {
    position: [f32; 3],
    /// Normalized weights ascending by bone index.
    weights: BTreeMap<u32, f64>,
    /// Vertex indices in insertion order.
    vertex_indices: IndexSet<u32>,
    origin: u32,
}

impl SkinEntry {
    /// Create an entry for `vertex_index`, normalizing weights by `weight_sum`.
    ///
    /// The sum comes from the caller and is not recomputed. A zero sum is a
    /// contract violation and fails with [`Error::ZeroWeightSum`].
    pub fn new<I>(vertex_index: u32, position: [f32; 3], bone_weights: I, weight_sum: f32) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, f32)>,
    {
        if weight_sum == 0.0 {
            return Err(Error::ZeroWeightSum { vertex_index });
        }

        let sum = f64::from(weight_sum);
        let weights = bone_weights
            .into_iter()
            .map(|(bone, weight)| (bone, f64::from(weight) / sum))
            .collect();

        let mut vertex_indices = IndexSet::new();
        vertex_indices.insert(vertex_index);

        Ok(Self {
            position,
            weights,
            vertex_indices,
            origin: vertex_index,
        })
    }

    /// Record another vertex sharing this skin data.
    ///
    /// Returns `false` if the index was already recorded.
    pub fn add_vertex_index(&mut self, vertex_index: u32) -> bool {
        self.vertex_indices.insert(vertex_index)
    }

    /// Vertex the entry was created for.
    pub fn first_vertex_index(&self) -> u32 {
        self.origin
    }

    /// Dedup key: position text followed by `bone` + truncated weight per bone.
    ///
    /// `(1.0, 2.0, 3.0)` with weights `{0: 0.5, 3: 0.5}` gives
    /// `(1.0, 2.0, 3.0)0500000` + `3500000`.
    pub fn hash(&self) -> String {
        let scale = 10f64.powi(HASH_PRECISION);
        let mut key = fmt_position(self.position);
        for (bone, weight) in &self.weights {
            key.push_str(&bone.to_string());
            key.push_str(&((weight * scale).trunc() as i64).to_string());
        }
        key
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Normalized `(bone, weight)` pairs ascending by bone index.
    pub fn weights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.weights.iter().map(|(&bone, &weight)| (bone, weight))
    }

    /// Number of bone weights.
    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }

    /// Vertex indices in the order they were recorded.
    pub fn vertex_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertex_indices.iter().copied()
    }

    /// Number of recorded vertex indices.
    pub fn vertex_index_count(&self) -> usize {
        self.vertex_indices.len()
    }

    /// Row as written: weights by bone index, vertex indices ascending.
    pub fn to_row(&self) -> SkinRow {
        let mut vertex_indices: Vec<u32> = self.vertex_indices.iter().copied().collect();
        vertex_indices.sort_unstable();

        SkinRow {
            position: self.position,
            weights: self.weights().map(|(bone, w)| (bone, w as f32)).collect(),
            vertex_indices,
        }
    }
}
