//! # sheetlink-core
//!
//! Core addressing and value types for the sheetlink remote-spreadsheet
//! client.
//!
//! This crate provides the pure, connection-free pieces:
//! - [`column_to_letters`] / [`letters_to_column`] - the alphabetic column codec
//! - [`GridRange`] and [`DimensionRange`] - cell and row/column spans
//! - [`CellValue`] and the projection enums - typed cell payloads and how to
//!   read and write them in the wire's JSON shape
//!
//! ## Example
//!
//! ```rust
//! use sheetlink_core::{CellValue, GridRange};
//!
//! let rng = GridRange::from_a1(0, "Sheet1!A1:C5").unwrap();
//! assert_eq!(rng.row_count(), Some(5));
//!
//! // "=" prefixed text classifies as a formula
//! assert_eq!(CellValue::from("=A1+B2").kind(), sheetlink_core::DataKind::Formula);
//! ```

pub mod column;
pub mod error;
pub mod range;
pub mod value;

// Re-exports for convenience
pub use column::{column_to_letters, letters_to_column};
pub use error::{Error, Result};
pub use range::{
    build_range_str, split_cell_str, split_range_str, CellRef, Dimension, DimensionRange,
    GridRange,
};
pub use value::{
    decode_cell, decode_row_block, encode_write_value, CellValue, DataKind, FormatProjection,
    ValueProjection,
};
