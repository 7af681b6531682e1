//! Range handle for a rectangular span of one tab.

use crate::error::Result;
use crate::format::{BorderFormat, BorderSide, Color, HorizontalAlign, NumberFormat, VerticalAlign};
use crate::requests;
use crate::session::Session;
use serde_json::{Map, Value as Json};
use sheetlink_core::{decode_row_block, CellValue, FormatProjection, GridRange, ValueProjection};
use std::fmt;

/// A handle to a rectangular span of cells, with cached data.
///
/// Like [`crate::Tab`], a range queues mutations on its own session and
/// sends them with [`Range::commit`].
#[derive(Debug)]
pub struct Range {
    session: Session,
    grid: GridRange,
    values: Vec<Vec<Option<CellValue>>>,
    formats: Vec<Vec<Map<String, Json>>>,
}

impl Range {
    pub fn new(session: &Session, grid: GridRange) -> Self {
        Self {
            session: session.fork(),
            grid,
            values: Vec::new(),
            formats: Vec::new(),
        }
    }

    /// Parse an A1 range into a handle against the given tab id
    pub fn from_a1(session: &Session, sheet_id: i64, text: &str) -> Result<Self> {
        Ok(Self::new(session, GridRange::from_a1(sheet_id, text)?))
    }

    pub fn grid(&self) -> &GridRange {
        &self.grid
    }

    /// Cached cell values from the last [`Range::get_data`]
    pub fn values(&self) -> &[Vec<Option<CellValue>>] {
        &self.values
    }

    /// Cached cell formats from the last [`Range::get_data`]
    pub fn formats(&self) -> &[Vec<Map<String, Json>>] {
        &self.formats
    }

    /// Fetch this range's computed values and effective formats
    pub fn get_data(&mut self) -> Result<()> {
        self.get_data_with(ValueProjection::default(), FormatProjection::default())
    }

    /// Fetch this range with explicit projections
    pub fn get_data_with(
        &mut self,
        vproj: ValueProjection,
        fproj: FormatProjection,
    ) -> Result<()> {
        let rows = self.session.fetch_range(&self.grid.to_a1())?;
        let (values, formats) = decode_row_block(&rows, vproj, fproj)?;
        self.values = values;
        self.formats = formats;
        Ok(())
    }

    /// Queue a block write covering this range
    pub fn write_values(&mut self, data: &[Vec<CellValue>]) -> Result<()> {
        self.session.push(requests::write_cells(&self.grid, data)?);
        Ok(())
    }

    pub fn set_background_color(&mut self, color: &Color) {
        self.session
            .push(requests::set_background_color(&self.grid, color));
    }

    pub fn set_border_format(&mut self, sides: &[BorderSide], format: &BorderFormat) {
        self.session
            .push(requests::set_border_format(&self.grid, sides, format));
    }

    pub fn set_text_alignment(
        &mut self,
        horizontal: Option<HorizontalAlign>,
        vertical: Option<VerticalAlign>,
    ) {
        self.session
            .push(requests::set_text_alignment(&self.grid, horizontal, vertical));
    }

    pub fn apply_number_format(&mut self, format: &NumberFormat) {
        self.session
            .push(requests::apply_number_format(&self.grid, format));
    }

    pub fn add_alternating_row_background(&mut self, color: &Color) {
        self.session
            .push(requests::add_alternating_row_background(&self.grid, color));
    }

    /// The requests queued on this range so far
    pub fn requests(&self) -> &[Json] {
        self.session.requests()
    }

    /// Send this range's queued requests as one batch
    pub fn commit(&mut self) -> Result<Json> {
        self.session.commit()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
