//! Prelude module - common imports for sheetlink users
//!
//! ```rust
//! use sheetlink::prelude::*;
//! ```

pub use crate::{
    // Format types
    BorderFormat,
    BorderSide,
    BorderStyle,
    // Cell types
    CellRef,
    CellValue,
    Color,
    // Transport seam
    Connection,
    DataKind,
    Dimension,
    DimensionRange,
    // Error types
    Error,
    FormatProjection,
    // Range types
    GridRange,
    HorizontalAlign,
    NumberFormat,
    NumberFormatType,
    // Main types
    Range,
    Result,
    Session,
    Spreadsheet,
    Tab,
    ValueProjection,
    VerticalAlign,
};
