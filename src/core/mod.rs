//! Document model - sections, properties and data rows.
//!
//! This module provides:
//! - [`Section`] - Named block with properties, rows and child sections
//! - [`Property`] / [`PropValue`] - Property values, one variant per text grammar
//! - [`DataRow`] - Row kinds (plain, bone, string, skin, matrix, time)

mod property;
mod row;
mod section;

pub use property::{
    is_reserved_token, ListTag, PropValue, Property, Scalar, Values, COMMENT_KEY, RESERVED_TOKENS,
};
pub use row::{BoneRow, DataRow, Matrix, SkinRow};
pub use section::{Section, COMMENT_SECTION};
