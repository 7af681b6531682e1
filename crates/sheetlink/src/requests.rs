//! Builders for the wire protocol's mutation requests.
//!
//! Each builder produces one JSON request object ready for a batch commit.
//! Builders never touch the network; [`crate::Session::push`] queues their
//! output and [`crate::Session::commit`] sends the batch.

use crate::error::{Error, Result};
use crate::format::{BorderFormat, BorderSide, Color, HorizontalAlign, NumberFormat, VerticalAlign};
use indexmap::IndexMap;
use serde_json::{json, Map, Value as Json};
use sheetlink_core::{encode_write_value, CellValue, Dimension, DimensionRange, GridRange};

fn rows_payload(data: &[Vec<Option<CellValue>>]) -> Json {
    let rows: Vec<Json> = data
        .iter()
        .map(|row| {
            let cells: Vec<Json> = row
                .iter()
                .map(|cell| match cell {
                    Some(value) => encode_write_value(value),
                    None => json!({}),
                })
                .collect();
            json!({ "values": cells })
        })
        .collect();
    Json::Array(rows)
}

/// Close a box's open axes from a data shape; bounded axes must match it
/// exactly.
fn sized_box(range: &GridRange, rows: usize, columns: usize) -> Result<GridRange> {
    let mut range = range.clone();
    let start_row = range.start_row_index.unwrap_or(0);
    let start_col = range.start_column_index.unwrap_or(0);
    range.start_row_index = Some(start_row);
    range.start_column_index = Some(start_col);
    match range.end_row_index {
        None => range.end_row_index = Some(start_row + rows as u32),
        Some(end) => {
            let expected = end.saturating_sub(start_row) as usize;
            if rows != expected {
                return Err(Error::ShapeMismatch {
                    expected,
                    actual: rows,
                    unit: "rows",
                });
            }
        }
    }
    match range.end_column_index {
        None => range.end_column_index = Some(start_col + columns as u32),
        Some(end) => {
            let expected = end.saturating_sub(start_col) as usize;
            if columns != expected {
                return Err(Error::ShapeMismatch {
                    expected,
                    actual: columns,
                    unit: "columns",
                });
            }
        }
    }
    Ok(range)
}

/// Write a rectangular block of values into a range
///
/// Open range axes are closed from the data's shape; bounded axes must match
/// it exactly. Rows must all be the same width.
pub fn write_cells(range: &GridRange, data: &[Vec<CellValue>]) -> Result<Json> {
    let width = data.first().map(Vec::len).unwrap_or(0);
    for row in data {
        if row.len() != width {
            return Err(Error::ShapeMismatch {
                expected: width,
                actual: row.len(),
                unit: "columns",
            });
        }
    }
    let range = sized_box(range, data.len(), width)?;

    let data: Vec<Vec<Option<CellValue>>> = data
        .iter()
        .map(|row| row.iter().cloned().map(Some).collect())
        .collect();
    Ok(json!({
        "updateCells": {
            "fields": "*",
            "range": range,
            "rows": rows_payload(&data),
        }
    }))
}

/// Write keyed records as a header row plus one row per record
///
/// The first record's key order fixes the header. Later records may omit
/// fields (those cells stay empty) but a field outside the header is an
/// error. Open range axes are closed from the emitted shape (records plus
/// the header row); bounded axes must match it exactly.
pub fn write_records(
    range: &GridRange,
    records: &[IndexMap<String, CellValue>],
) -> Result<Json> {
    let header: Vec<&String> = match records.first() {
        Some(first) => first.keys().collect(),
        None => return write_cells(range, &[]),
    };
    for record in records {
        if record.keys().any(|k| !header.contains(&k)) {
            return Err(Error::ShapeMismatch {
                expected: header.len(),
                actual: record.len(),
                unit: "fields",
            });
        }
    }

    let mut data: Vec<Vec<Option<CellValue>>> = Vec::with_capacity(records.len() + 1);
    data.push(
        header
            .iter()
            .map(|k| Some(CellValue::String((*k).clone())))
            .collect(),
    );
    for record in records {
        data.push(header.iter().map(|k| record.get(*k).cloned()).collect());
    }

    let range = sized_box(range, data.len(), header.len())?;
    Ok(json!({
        "updateCells": {
            "fields": "*",
            "range": range,
            "rows": rows_payload(&data),
        }
    }))
}

fn insert_dimension(range: DimensionRange) -> Json {
    json!({
        "insertDimension": {
            "range": range,
            "inheritFromBefore": false,
        }
    })
}

/// Insert `count` blank rows starting at the zero-based row `at`
pub fn insert_rows(sheet_id: i64, at: u32, count: u32) -> Json {
    insert_dimension(DimensionRange::zero_based(
        sheet_id,
        Dimension::Rows,
        Some(at),
        Some(at + count),
    ))
}

/// Insert `count` blank columns starting at the zero-based column `at`
pub fn insert_columns(sheet_id: i64, at: u32, count: u32) -> Json {
    insert_dimension(DimensionRange::zero_based(
        sheet_id,
        Dimension::Columns,
        Some(at),
        Some(at + count),
    ))
}

/// Delete the rows in `[start, end)`
pub fn delete_rows(sheet_id: i64, start: u32, end: u32) -> Json {
    json!({
        "deleteDimension": {
            "range": DimensionRange::zero_based(sheet_id, Dimension::Rows, Some(start), Some(end)),
        }
    })
}

/// Delete the columns in `[start, end)`
pub fn delete_columns(sheet_id: i64, start: u32, end: u32) -> Json {
    json!({
        "deleteDimension": {
            "range": DimensionRange::zero_based(
                sheet_id,
                Dimension::Columns,
                Some(start),
                Some(end),
            ),
        }
    })
}

/// Grow the tab by `count` rows at the bottom
pub fn append_rows(sheet_id: i64, count: u32) -> Json {
    json!({
        "appendDimension": {
            "sheetId": sheet_id,
            "dimension": Dimension::Rows,
            "length": count,
        }
    })
}

/// Grow the tab by `count` columns at the right edge
pub fn append_columns(sheet_id: i64, count: u32) -> Json {
    json!({
        "appendDimension": {
            "sheetId": sheet_id,
            "dimension": Dimension::Columns,
            "length": count,
        }
    })
}

/// Fit the columns in `[start, end)` to their contents
pub fn auto_resize_columns(sheet_id: i64, start: u32, end: u32) -> Json {
    json!({
        "autoResizeDimensions": {
            "dimensions": DimensionRange::zero_based(
                sheet_id,
                Dimension::Columns,
                Some(start),
                Some(end),
            ),
        }
    })
}

/// Freeze leading rows and/or columns
///
/// At least one of the two counts must be given.
pub fn freeze(sheet_id: i64, rows: Option<u32>, columns: Option<u32>) -> Result<Json> {
    if rows.is_none() && columns.is_none() {
        return Err(Error::InvalidFreeze);
    }
    let mut grid = Map::new();
    if let Some(rows) = rows {
        grid.insert("frozenRowCount".to_string(), Json::from(rows));
    }
    if let Some(columns) = columns {
        grid.insert("frozenColumnCount".to_string(), Json::from(columns));
    }
    Ok(json!({
        "updateSheetProperties": {
            "properties": {
                "sheetId": sheet_id,
                "gridProperties": grid,
            },
            "fields": "gridProperties(frozenRowCount, frozenColumnCount)",
        }
    }))
}

/// Create a new tab
///
/// When `sheet_id` or `index` is `None` the service assigns them.
pub fn add_tab(
    title: &str,
    sheet_id: Option<i64>,
    index: Option<u32>,
    row_count: u32,
    column_count: u32,
) -> Json {
    let mut properties = Map::new();
    properties.insert("title".to_string(), Json::from(title));
    properties.insert(
        "gridProperties".to_string(),
        json!({ "rowCount": row_count, "columnCount": column_count }),
    );
    if let Some(id) = sheet_id {
        properties.insert("sheetId".to_string(), Json::from(id));
    }
    if let Some(index) = index {
        properties.insert("index".to_string(), Json::from(index));
    }
    json!({ "addSheet": { "properties": properties } })
}

fn repeat_cell(range: &GridRange, format: Json, fields: &str) -> Json {
    json!({
        "repeatCell": {
            "range": range,
            "cell": { "userEnteredFormat": format },
            "fields": fields,
        }
    })
}

/// Fill a range with one background color
pub fn set_background_color(range: &GridRange, color: &Color) -> Json {
    repeat_cell(
        range,
        json!({ "backgroundColor": color }),
        "userEnteredFormat(backgroundColor)",
    )
}

/// Apply one border format to the given sides of every cell in a range
pub fn set_border_format(range: &GridRange, sides: &[BorderSide], format: &BorderFormat) -> Json {
    let mut borders = Map::new();
    for side in sides {
        borders.insert(
            side.wire_key().to_string(),
            serde_json::to_value(format).unwrap_or(Json::Null),
        );
    }
    repeat_cell(
        range,
        json!({ "borders": borders }),
        "userEnteredFormat(borders)",
    )
}

/// Set horizontal and/or vertical text alignment across a range
pub fn set_text_alignment(
    range: &GridRange,
    horizontal: Option<HorizontalAlign>,
    vertical: Option<VerticalAlign>,
) -> Json {
    let mut format = Map::new();
    let mut fields = Vec::new();
    if let Some(h) = horizontal {
        format.insert(
            "horizontalAlignment".to_string(),
            serde_json::to_value(h).unwrap_or(Json::Null),
        );
        fields.push("horizontalAlignment");
    }
    if let Some(v) = vertical {
        format.insert(
            "verticalAlignment".to_string(),
            serde_json::to_value(v).unwrap_or(Json::Null),
        );
        fields.push("verticalAlignment");
    }
    repeat_cell(
        range,
        Json::Object(format),
        &format!("userEnteredFormat({})", fields.join(", ")),
    )
}

/// Apply a number format across a range
pub fn apply_number_format(range: &GridRange, format: &NumberFormat) -> Json {
    repeat_cell(
        range,
        json!({ "numberFormat": format }),
        "userEnteredFormat(numberFormat)",
    )
}

/// Shade every other row of a range with a background color
///
/// Implemented as a conditional format rule keyed on the row parity, so the
/// banding survives later row inserts and deletes.
pub fn add_alternating_row_background(range: &GridRange, color: &Color) -> Json {
    json!({
        "addConditionalFormatRule": {
            "rule": {
                "ranges": [range],
                "booleanRule": {
                    "condition": {
                        "type": "CUSTOM_FORMULA",
                        "values": [{ "userEnteredValue": "=MOD(ROW(), 2)" }],
                    },
                    "format": { "backgroundColor": color },
                },
            },
            "index": range.start_row_index.unwrap_or(0),
        }
    })
}
