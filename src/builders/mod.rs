//! Builders that turn exporter data into sections.
//!
//! Skin streams render themselves (see [`crate::skin`]); this module holds the
//! remaining document-level builders.

mod header;

pub use header::{build_source, Header, HEADER_SECTION};
