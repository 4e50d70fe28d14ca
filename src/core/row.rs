//! Data rows stored inside sections.

use glam::{Mat4, Vec3};

use super::property::Values;

/// Row-major float matrix (4x4 for transforms, 3x4 for packed bones).
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: Vec<Vec<f32>>,
}

impl Matrix {
    /// Create from explicit rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    /// Identity 4x4.
    pub fn identity() -> Self {
        Self::from(Mat4::IDENTITY)
    }

    /// Matrix rows.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl From<[[f32; 4]; 4]> for Matrix {
    fn from(m: [[f32; 4]; 4]) -> Self {
        Self::from_rows(m.iter().map(|r| r.to_vec()).collect())
    }
}

impl From<[[f32; 4]; 3]> for Matrix {
    fn from(m: [[f32; 4]; 3]) -> Self {
        Self::from_rows(m.iter().map(|r| r.to_vec()).collect())
    }
}

impl From<Mat4> for Matrix {
    /// glam stores columns; rows are written out.
    fn from(m: Mat4) -> Self {
        Self::from_rows((0..4).map(|i| m.row(i).to_array().to_vec()).collect())
    }
}

/// Skeleton bone: name, parent and bind matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneRow {
    pub name: String,
    /// Parent bone name, `None` for roots (written as `""`).
    pub parent: Option<String>,
    pub matrix: Matrix,
}

impl BoneRow {
    pub fn new(name: impl Into<String>, parent: Option<&str>, matrix: impl Into<Matrix>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
            matrix: matrix.into(),
        }
    }
}

/// Canonical skin record as it is written: position, sorted weights and
/// sorted vertex indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinRow {
    pub position: [f32; 3],
    /// `(bone index, weight)` pairs ascending by bone index.
    pub weights: Vec<(u32, f32)>,
    /// Vertex indices ascending.
    pub vertex_indices: Vec<u32>,
}

/// One row of section data.
#[derive(Clone, Debug, PartialEq)]
pub enum DataRow {
    /// Homogeneous values; the block's first row fixes the element kind.
    Plain(Values),
    Bone(BoneRow),
    Str(String),
    Skin(SkinRow),
    /// Standalone matrix, e.g. an animation key.
    Matrix(Matrix),
    /// Single time sample.
    Time(f32),
}

impl DataRow {
    /// Plain float row from a vector.
    pub fn vec3(v: Vec3) -> Self {
        Self::Plain(Values::Float(v.to_array().to_vec()))
    }

    /// Row kind name, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::Bone(_) => "bone",
            Self::Str(_) => "string",
            Self::Skin(_) => "skin",
            Self::Matrix(_) => "matrix",
            Self::Time(_) => "time",
        }
    }
}

impl From<Values> for DataRow {
    fn from(v: Values) -> Self {
        Self::Plain(v)
    }
}

impl From<BoneRow> for DataRow {
    fn from(b: BoneRow) -> Self {
        Self::Bone(b)
    }
}

impl From<SkinRow> for DataRow {
    fn from(s: SkinRow) -> Self {
        Self::Skin(s)
    }
}
