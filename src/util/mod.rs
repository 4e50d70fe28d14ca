//! Utility types for PIX.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`fmt_float`] - Shortest round-trip decimal float text

mod error;
mod decimal;

pub use error::*;
pub use decimal::*;
