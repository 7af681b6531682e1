//! Cell value marshalling
//!
//! The wire protocol tags every cell payload with its data kind
//! ("stringValue", "numberValue", ...) and exposes up to three projections of
//! the same cell: the value as entered, the value after formula evaluation,
//! and the value as displayed. [`encode_write_value`] and [`decode_cell`]
//! translate between that shape and [`CellValue`].

use crate::error::{Error, Result};
use serde_json::{Map, Value as Json};
use std::fmt;

/// A typed cell value
///
/// Integers and floats are distinct variants so a written `1` reads back as
/// `1`, not `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Formula(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// The wire data kind of this value
    pub fn kind(&self) -> DataKind {
        match self {
            CellValue::String(_) => DataKind::String,
            CellValue::Formula(_) => DataKind::Formula,
            CellValue::Int(_) | CellValue::Float(_) => DataKind::Number,
            CellValue::Bool(_) => DataKind::Bool,
        }
    }

    /// Classify raw text as a formula or a plain string
    ///
    /// A formula is any text starting with `=` and at least two characters
    /// long. The classification is purely lexical.
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        if text.len() >= 2 && text.starts_with('=') {
            CellValue::Formula(text)
        } else {
            CellValue::String(text)
        }
    }

    /// Best-effort conversion from an arbitrary JSON value
    ///
    /// Numbers and bools map to their typed variants; strings go through the
    /// formula classification; anything else is stringified.
    pub fn coerce_json(value: &Json) -> Self {
        match value {
            Json::Bool(b) => CellValue::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => CellValue::from_text(s.as_str()),
            other => CellValue::String(other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) | CellValue::Formula(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) | CellValue::Formula(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from_text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::from_text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Wire tag of a cell payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    String,
    Formula,
    Number,
    Bool,
}

impl DataKind {
    /// Probe order when decoding a typed projection. At most one kind key is
    /// populated per cell, so the order only fixes which key wins on a
    /// malformed payload.
    pub const PROBE_ORDER: [DataKind; 4] = [
        DataKind::String,
        DataKind::Formula,
        DataKind::Number,
        DataKind::Bool,
    ];

    /// The key this kind uses inside a cell value object
    pub fn wire_key(self) -> &'static str {
        match self {
            DataKind::String => "stringValue",
            DataKind::Formula => "formulaValue",
            DataKind::Number => "numberValue",
            DataKind::Bool => "boolValue",
        }
    }

    /// Parse raw cell text as this kind
    ///
    /// Numbers try integer first and fall back to float. Bools accept only
    /// `true` and `false` (case-insensitive); anything else is a conversion
    /// error rather than a truthiness guess.
    pub fn parse(self, raw: &str) -> Result<CellValue> {
        match self {
            DataKind::String => Ok(CellValue::String(raw.to_string())),
            DataKind::Formula => Ok(CellValue::Formula(raw.to_string())),
            DataKind::Number => {
                if let Ok(i) = raw.parse::<i64>() {
                    Ok(CellValue::Int(i))
                } else if let Ok(f) = raw.parse::<f64>() {
                    Ok(CellValue::Float(f))
                } else {
                    Err(Error::Conversion {
                        value: raw.to_string(),
                        expected: "number",
                    })
                }
            }
            DataKind::Bool => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(CellValue::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(CellValue::Bool(false))
                } else {
                    Err(Error::Conversion {
                        value: raw.to_string(),
                        expected: "bool",
                    })
                }
            }
        }
    }
}

/// Which rendering of a cell's value to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueProjection {
    /// The value as the user entered it (formulas come back as text)
    Entered,
    /// The value after formula evaluation
    #[default]
    Computed,
    /// The formatted display string
    Displayed,
}

impl ValueProjection {
    /// The key this projection uses inside a cell object
    pub fn wire_key(self) -> &'static str {
        match self {
            ValueProjection::Entered => "userEnteredValue",
            ValueProjection::Computed => "effectiveValue",
            ValueProjection::Displayed => "formattedValue",
        }
    }

    /// Whether this projection carries a kind-tagged payload (`Displayed` is
    /// always a bare string)
    pub fn has_data_kind(self) -> bool {
        !matches!(self, ValueProjection::Displayed)
    }
}

/// Which rendering of a cell's format to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatProjection {
    /// The format as the user set it
    Entered,
    /// The format actually applied, including inherited properties
    #[default]
    Effective,
    /// The tab's default format
    Default,
}

impl FormatProjection {
    /// The key this projection uses inside a cell object
    pub fn wire_key(self) -> &'static str {
        match self {
            FormatProjection::Entered => "userEnteredFormat",
            FormatProjection::Effective => "effectiveFormat",
            FormatProjection::Default => "defaultFormat",
        }
    }
}

/// Encode a value into the wire shape for a cell write
///
/// Produces `{"userEnteredValue": {<kindKey>: <payload>}}`.
pub fn encode_write_value(value: &CellValue) -> Json {
    let payload = match value {
        CellValue::String(s) | CellValue::Formula(s) => Json::String(s.clone()),
        CellValue::Int(i) => Json::from(*i),
        CellValue::Float(f) => Json::from(*f),
        CellValue::Bool(b) => Json::Bool(*b),
    };
    let mut inner = Map::new();
    inner.insert(value.kind().wire_key().to_string(), payload);
    let mut outer = Map::new();
    outer.insert("userEnteredValue".to_string(), Json::Object(inner));
    Json::Object(outer)
}

/// Decode one cell object into its value and format
///
/// The value is `None` for empty cells. Presence of a kind key decides the
/// kind, so falsy payloads (`0`, `false`, `""`) decode as values, not gaps.
/// The format map is empty when the cell carries no format for the chosen
/// projection.
pub fn decode_cell(
    cell: &Json,
    vproj: ValueProjection,
    fproj: FormatProjection,
) -> Result<(Option<CellValue>, Map<String, Json>)> {
    let format = cell
        .get(fproj.wire_key())
        .and_then(Json::as_object)
        .cloned()
        .unwrap_or_default();

    if !vproj.has_data_kind() {
        let value = cell
            .get(vproj.wire_key())
            .and_then(Json::as_str)
            .map(|s| CellValue::String(s.to_string()));
        return Ok((value, format));
    }

    let payload = match cell.get(vproj.wire_key()).and_then(Json::as_object) {
        Some(p) => p,
        None => return Ok((None, format)),
    };
    for kind in DataKind::PROBE_ORDER {
        let raw = match payload.get(kind.wire_key()) {
            Some(Json::Null) | None => continue,
            Some(raw) => raw,
        };
        let value = match raw {
            // Entered payloads may arrive stringified; re-parse them into
            // their tagged kind.
            Json::String(s) if vproj == ValueProjection::Entered => kind.parse(s)?,
            Json::String(s) => kind.parse(s).unwrap_or_else(|_| CellValue::from_text(s.as_str())),
            Json::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::Bool(b) => CellValue::Bool(*b),
            other => CellValue::String(other.to_string()),
        };
        return Ok((Some(value), format));
    }
    Ok((None, format))
}

/// Decode a block of row data, preserving raggedness
///
/// Each row decodes to `(values, formats)` with one entry per cell object.
/// Rows are not padded to a common width.
#[allow(clippy::type_complexity)]
pub fn decode_row_block(
    rows: &[Json],
    vproj: ValueProjection,
    fproj: FormatProjection,
) -> Result<(Vec<Vec<Option<CellValue>>>, Vec<Vec<Map<String, Json>>>)> {
    let mut values = Vec::with_capacity(rows.len());
    let mut formats = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .get("values")
            .and_then(Json::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let mut row_values = Vec::with_capacity(cells.len());
        let mut row_formats = Vec::with_capacity(cells.len());
        for cell in cells {
            let (value, format) = decode_cell(cell, vproj, fproj)?;
            row_values.push(value);
            row_formats.push(format);
        }
        values.push(row_values);
        formats.push(row_formats);
    }
    Ok((values, formats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_text_classification() {
        assert_eq!(CellValue::from_text("=A1+B2"), CellValue::Formula("=A1+B2".into()));
        assert_eq!(CellValue::from_text("=B"), CellValue::Formula("=B".into()));
        // Lone "=" and anything not starting with "=" are plain strings
        assert_eq!(CellValue::from_text("="), CellValue::String("=".into()));
        assert_eq!(CellValue::from_text("a"), CellValue::String("a".into()));
        assert_eq!(CellValue::from_text(""), CellValue::String("".into()));
    }

    #[test]
    fn test_encode_write_value() {
        assert_eq!(
            encode_write_value(&CellValue::from("a")),
            json!({"userEnteredValue": {"stringValue": "a"}})
        );
        assert_eq!(
            encode_write_value(&CellValue::from(1)),
            json!({"userEnteredValue": {"numberValue": 1}})
        );
        assert_eq!(
            encode_write_value(&CellValue::from(1.5)),
            json!({"userEnteredValue": {"numberValue": 1.5}})
        );
        assert_eq!(
            encode_write_value(&CellValue::from(true)),
            json!({"userEnteredValue": {"boolValue": true}})
        );
        assert_eq!(
            encode_write_value(&CellValue::from("=A1+B2")),
            json!({"userEnteredValue": {"formulaValue": "=A1+B2"}})
        );
    }

    #[test]
    fn test_decode_cell_projections() {
        // One cell, three views: a formula, its computed number, and its
        // display string.
        let cell = json!({
            "userEnteredValue": {"formulaValue": "=A1+A2"},
            "effectiveValue": {"numberValue": 3},
            "formattedValue": "3",
        });
        let (v, _) = decode_cell(&cell, ValueProjection::Entered, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::Formula("=A1+A2".into())));

        let (v, _) = decode_cell(&cell, ValueProjection::Computed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::Int(3)));

        let (v, _) = decode_cell(&cell, ValueProjection::Displayed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::String("3".into())));
    }

    #[test]
    fn test_decode_cell_falsy_values_are_present() {
        for (cell, expected) in [
            (json!({"effectiveValue": {"numberValue": 0}}), CellValue::Int(0)),
            (json!({"effectiveValue": {"boolValue": false}}), CellValue::Bool(false)),
            (json!({"effectiveValue": {"stringValue": ""}}), CellValue::String("".into())),
        ] {
            let (v, _) =
                decode_cell(&cell, ValueProjection::Computed, FormatProjection::Effective)
                    .unwrap();
            assert_eq!(v, Some(expected));
        }
    }

    #[test]
    fn test_decode_cell_empty_and_null() {
        let (v, f) = decode_cell(&json!({}), ValueProjection::Computed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, None);
        assert!(f.is_empty());

        let cell = json!({"effectiveValue": {"numberValue": null}});
        let (v, _) = decode_cell(&cell, ValueProjection::Computed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn test_decode_cell_int_float_distinction() {
        let cell = json!({"effectiveValue": {"numberValue": 2}});
        let (v, _) = decode_cell(&cell, ValueProjection::Computed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::Int(2)));

        let cell = json!({"effectiveValue": {"numberValue": 2.5}});
        let (v, _) = decode_cell(&cell, ValueProjection::Computed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::Float(2.5)));
    }

    #[test]
    fn test_decode_cell_entered_reparses_strings() {
        let cell = json!({"userEnteredValue": {"numberValue": "7"}});
        let (v, _) = decode_cell(&cell, ValueProjection::Entered, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::Int(7)));

        let cell = json!({"userEnteredValue": {"boolValue": "TRUE"}});
        let (v, _) = decode_cell(&cell, ValueProjection::Entered, FormatProjection::Effective)
            .unwrap();
        assert_eq!(v, Some(CellValue::Bool(true)));

        let cell = json!({"userEnteredValue": {"numberValue": "not a number"}});
        assert!(
            decode_cell(&cell, ValueProjection::Entered, FormatProjection::Effective).is_err()
        );
    }

    #[test]
    fn test_decode_cell_strict_bool() {
        assert!(DataKind::Bool.parse("TRUE").is_ok());
        assert!(DataKind::Bool.parse("false").is_ok());
        assert!(DataKind::Bool.parse("1").is_err());
        assert!(DataKind::Bool.parse("yes").is_err());
        assert!(DataKind::Bool.parse("").is_err());
    }

    #[test]
    fn test_decode_cell_format_projection() {
        let cell = json!({
            "effectiveValue": {"numberValue": 1},
            "effectiveFormat": {"numberFormat": {"type": "NUMBER"}},
            "userEnteredFormat": {},
        });
        let (_, f) = decode_cell(&cell, ValueProjection::Computed, FormatProjection::Effective)
            .unwrap();
        assert_eq!(f.get("numberFormat"), Some(&json!({"type": "NUMBER"})));

        let (_, f) = decode_cell(&cell, ValueProjection::Computed, FormatProjection::Entered)
            .unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn test_decode_row_block_preserves_raggedness() {
        let rows = vec![
            json!({"values": [
                {"effectiveValue": {"numberValue": 1}},
                {"effectiveValue": {"stringValue": "x"}},
            ]}),
            json!({"values": [
                {"effectiveValue": {"boolValue": true}},
            ]}),
            json!({}),
        ];
        let (values, formats) =
            decode_row_block(&rows, ValueProjection::Computed, FormatProjection::Effective)
                .unwrap();
        assert_eq!(
            values,
            vec![
                vec![Some(CellValue::Int(1)), Some(CellValue::String("x".into()))],
                vec![Some(CellValue::Bool(true))],
                vec![],
            ]
        );
        assert_eq!(formats.len(), 3);
        assert_eq!(formats[0].len(), 2);
        assert_eq!(formats[2].len(), 0);
    }

    #[test]
    fn test_round_trip_write_then_read() {
        for value in [
            CellValue::from("plain"),
            CellValue::from("=SUM(A1:A5)"),
            CellValue::Int(42),
            CellValue::Float(2.25),
            CellValue::Bool(false),
        ] {
            let encoded = encode_write_value(&value);
            let (decoded, _) =
                decode_cell(&encoded, ValueProjection::Entered, FormatProjection::Effective)
                    .unwrap();
            assert_eq!(decoded, Some(value));
        }
    }
}
