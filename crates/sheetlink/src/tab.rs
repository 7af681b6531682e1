//! Tab handle for one worksheet within a spreadsheet.

use crate::error::{Error, Result};
use crate::format::{BorderFormat, BorderSide, Color, HorizontalAlign, NumberFormat, VerticalAlign};
use crate::requests;
use crate::session::Session;
use crate::{DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT};
use serde_json::{Map, Value as Json};
use sheetlink_core::{decode_row_block, CellValue, FormatProjection, GridRange, ValueProjection};

/// A handle to one tab, with its property block and cached cell data.
///
/// Mutations queue on the tab's own session; nothing reaches the service
/// until [`Tab::commit`]. Cell data is cached by [`Tab::get_data`] and read
/// through [`Tab::values`] and [`Tab::formats`].
#[derive(Debug)]
pub struct Tab {
    session: Session,
    tab_id: i64,
    title: String,
    index: u32,
    row_count: u32,
    column_count: u32,
    values: Vec<Vec<Option<CellValue>>>,
    formats: Vec<Vec<Map<String, Json>>>,
}

impl Tab {
    /// A tab handle with explicit properties, not yet created remotely
    ///
    /// Call [`Tab::create`] to materialize it on the service.
    pub fn new<S: Into<String>>(
        session: &Session,
        tab_id: i64,
        title: S,
        index: u32,
        row_count: u32,
        column_count: u32,
    ) -> Self {
        Self {
            session: session.fork(),
            tab_id,
            title: title.into(),
            index,
            row_count,
            column_count,
            values: Vec::new(),
            formats: Vec::new(),
        }
    }

    /// Build a handle from a tab's property block in a properties response
    pub(crate) fn from_properties(session: &Session, properties: &Json) -> Result<Self> {
        let tab_id = properties
            .get("sheetId")
            .and_then(Json::as_i64)
            .ok_or_else(|| Error::MalformedResponse("tab properties missing sheetId".into()))?;
        let title = properties
            .get("title")
            .and_then(Json::as_str)
            .ok_or_else(|| Error::MalformedResponse("tab properties missing title".into()))?;
        let index = properties.get("index").and_then(Json::as_u64).unwrap_or(0) as u32;
        let grid = properties.get("gridProperties");
        let row_count = grid
            .and_then(|g| g.get("rowCount"))
            .and_then(Json::as_u64)
            .unwrap_or(DEFAULT_ROW_COUNT as u64) as u32;
        let column_count = grid
            .and_then(|g| g.get("columnCount"))
            .and_then(Json::as_u64)
            .unwrap_or(DEFAULT_COLUMN_COUNT as u64) as u32;
        Ok(Self::new(session, tab_id, title, index, row_count, column_count))
    }

    pub fn tab_id(&self) -> i64 {
        self.tab_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Cached cell values from the last [`Tab::get_data`]
    pub fn values(&self) -> &[Vec<Option<CellValue>>] {
        &self.values
    }

    /// Cached cell formats from the last [`Tab::get_data`]
    pub fn formats(&self) -> &[Vec<Map<String, Json>>] {
        &self.formats
    }

    /// The tab's full extent as a bounded range
    pub fn full_range(&self) -> GridRange {
        GridRange::zero_based(
            self.tab_id,
            Some(0),
            Some(self.row_count),
            Some(0),
            Some(self.column_count),
        )
        .with_title(self.title.clone())
    }

    /// A range within this tab, from A1 notation without a title prefix
    pub fn range(&self, a1: &str) -> Result<GridRange> {
        Ok(GridRange::from_a1(self.tab_id, a1)?.with_title(self.title.clone()))
    }

    /// Fetch the whole tab's computed values and effective formats
    pub fn get_data(&mut self) -> Result<()> {
        self.get_data_with(ValueProjection::default(), FormatProjection::default())
    }

    /// Fetch the whole tab with explicit projections
    pub fn get_data_with(
        &mut self,
        vproj: ValueProjection,
        fproj: FormatProjection,
    ) -> Result<()> {
        // A bare title is a whole-tab reference
        let rows = self.session.fetch_range(&self.title)?;
        let (values, formats) = decode_row_block(&rows, vproj, fproj)?;
        self.values = values;
        self.formats = formats;
        Ok(())
    }

    /// Fetch a sub-range of this tab into the cache
    pub fn get_range_data(&mut self, rng: GridRange) -> Result<()> {
        self.get_range_data_with(rng, ValueProjection::default(), FormatProjection::default())
    }

    /// Fetch a sub-range with explicit projections
    pub fn get_range_data_with(
        &mut self,
        rng: GridRange,
        vproj: ValueProjection,
        fproj: FormatProjection,
    ) -> Result<()> {
        let mut rng = rng;
        rng.sheet_id = self.tab_id;
        if rng.tab_title.is_none() {
            rng.tab_title = Some(self.title.clone());
        }
        let rows = self.session.fetch_range(&rng.to_a1())?;
        let (values, formats) = decode_row_block(&rows, vproj, fproj)?;
        self.values = values;
        self.formats = formats;
        Ok(())
    }

    /// Queue a block write; `rng` defaults to the tab origin, sized to the
    /// data
    pub fn write_values(&mut self, data: &[Vec<CellValue>], rng: Option<GridRange>) -> Result<()> {
        let rng = self.target_range(rng);
        self.session.push(requests::write_cells(&rng, data)?);
        Ok(())
    }

    /// Queue a keyed-record write (header row plus one row per record)
    pub fn write_records(
        &mut self,
        records: &[indexmap::IndexMap<String, CellValue>],
        rng: Option<GridRange>,
    ) -> Result<()> {
        let rng = self.target_range(rng);
        self.session.push(requests::write_records(&rng, records)?);
        Ok(())
    }

    fn target_range(&self, rng: Option<GridRange>) -> GridRange {
        match rng {
            Some(mut rng) => {
                rng.sheet_id = self.tab_id;
                rng
            }
            None => {
                let mut rng = GridRange::whole_tab(self.tab_id);
                rng.start_row_index = Some(0);
                rng.start_column_index = Some(0);
                rng
            }
        }
    }

    pub fn insert_rows(&mut self, at: u32, count: u32) {
        self.session.push(requests::insert_rows(self.tab_id, at, count));
    }

    pub fn insert_columns(&mut self, at: u32, count: u32) {
        self.session
            .push(requests::insert_columns(self.tab_id, at, count));
    }

    pub fn delete_rows(&mut self, start: u32, end: u32) {
        self.session
            .push(requests::delete_rows(self.tab_id, start, end));
    }

    pub fn delete_columns(&mut self, start: u32, end: u32) {
        self.session
            .push(requests::delete_columns(self.tab_id, start, end));
    }

    pub fn append_rows(&mut self, count: u32) {
        self.session.push(requests::append_rows(self.tab_id, count));
    }

    pub fn append_columns(&mut self, count: u32) {
        self.session
            .push(requests::append_columns(self.tab_id, count));
    }

    pub fn auto_resize_columns(&mut self, start: u32, end: u32) {
        self.session
            .push(requests::auto_resize_columns(self.tab_id, start, end));
    }

    pub fn freeze(&mut self, rows: Option<u32>, columns: Option<u32>) -> Result<()> {
        self.session
            .push(requests::freeze(self.tab_id, rows, columns)?);
        Ok(())
    }

    pub fn set_background_color(&mut self, rng: Option<GridRange>, color: &Color) {
        let rng = self.format_range(rng);
        self.session.push(requests::set_background_color(&rng, color));
    }

    pub fn set_border_format(
        &mut self,
        rng: Option<GridRange>,
        sides: &[BorderSide],
        format: &BorderFormat,
    ) {
        let rng = self.format_range(rng);
        self.session
            .push(requests::set_border_format(&rng, sides, format));
    }

    pub fn set_text_alignment(
        &mut self,
        rng: Option<GridRange>,
        horizontal: Option<HorizontalAlign>,
        vertical: Option<VerticalAlign>,
    ) {
        let rng = self.format_range(rng);
        self.session
            .push(requests::set_text_alignment(&rng, horizontal, vertical));
    }

    pub fn apply_number_format(&mut self, rng: Option<GridRange>, format: &NumberFormat) {
        let rng = self.format_range(rng);
        self.session
            .push(requests::apply_number_format(&rng, format));
    }

    pub fn add_alternating_row_background(&mut self, rng: Option<GridRange>, color: &Color) {
        let rng = self.format_range(rng);
        self.session
            .push(requests::add_alternating_row_background(&rng, color));
    }

    fn format_range(&self, rng: Option<GridRange>) -> GridRange {
        match rng {
            Some(mut rng) => {
                rng.sheet_id = self.tab_id;
                rng
            }
            None => self.full_range(),
        }
    }

    /// The request that would create this tab remotely
    pub fn add_tab_request(&self) -> Json {
        requests::add_tab(
            &self.title,
            Some(self.tab_id),
            Some(self.index),
            self.row_count,
            self.column_count,
        )
    }

    /// Create this tab on the service immediately
    pub fn create(&mut self) -> Result<Json> {
        let request = self.add_tab_request();
        self.session.push(request);
        self.commit()
    }

    /// The requests queued on this tab so far
    pub fn requests(&self) -> &[Json] {
        self.session.requests()
    }

    /// Send this tab's queued requests as one batch
    pub fn commit(&mut self) -> Result<Json> {
        self.session.commit()
    }
}
