//! # sheetlink
//!
//! A client for remote spreadsheet services with batched request building.
//!
//! Entities (spreadsheet, tab, range) queue mutations locally and send them
//! as one atomic batch on commit. Reads fetch cell data in a chosen
//! projection (entered, computed, or displayed) into a per-entity cache.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetlink::prelude::*;
//! use std::rc::Rc;
//!
//! # fn connect_transport() -> Rc<dyn Connection> { unimplemented!() }
//! let conn: Rc<dyn Connection> = connect_transport();
//! let mut sheet = Spreadsheet::connect("some-spreadsheet-id", conn).unwrap();
//!
//! // Queue a write, then send the batch
//! let data = vec![vec![CellValue::from("total"), CellValue::from("=SUM(B2:B10)")]];
//! sheet.write_values(&data, "Sheet1", None).unwrap();
//! sheet.commit().unwrap();
//!
//! // Read the computed values back
//! sheet.get_data("Sheet1", None).unwrap();
//! let tab = sheet.tab("Sheet1").unwrap();
//! println!("{:?}", tab.values());
//! ```

pub mod connection;
pub mod error;
pub mod format;
pub mod prelude;
pub mod range;
pub mod requests;
pub mod session;
pub mod spreadsheet;
pub mod tab;

pub use connection::Connection;
pub use error::{Error, Result};
pub use format::{
    BorderFormat, BorderSide, BorderStyle, Color, HorizontalAlign, NumberFormat, NumberFormatType,
    VerticalAlign,
};
pub use range::Range;
pub use session::Session;
pub use spreadsheet::Spreadsheet;
pub use tab::Tab;

// Re-export core types
pub use sheetlink_core::{
    build_range_str, column_to_letters, decode_cell, decode_row_block, encode_write_value,
    letters_to_column, CellRef, CellValue, DataKind, Dimension, DimensionRange, FormatProjection,
    GridRange, ValueProjection,
};

/// Row extent of a newly created tab
pub const DEFAULT_ROW_COUNT: u32 = 1000;

/// Column extent of a newly created tab
pub const DEFAULT_COLUMN_COUNT: u32 = 26;
