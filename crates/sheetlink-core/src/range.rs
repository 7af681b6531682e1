//! Range parsing, formatting, and coordinate boxes
//!
//! Ranges have two faces. Users write one-based, inclusive A1 notation
//! ("Sheet1!A1:C50", where either half of the end cell may be empty to leave
//! that axis open). The wire protocol wants zero-based, half-open numeric
//! indices. [`GridRange`] and [`DimensionRange`] store the wire form and
//! convert to and from the textual form.

use crate::column::{column_to_letters, letters_to_column};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Split a range string into its tab title, start cell, and end cell parts
///
/// The grammar is `[<title>!]<LETTERS><DIGITS>[:<letters?><digits?>]`. The
/// tab title may contain any character except `!`. The start cell must have
/// both a column and a row; the end cell may omit either (or be absent
/// entirely for a single-cell reference).
///
/// # Examples
/// ```
/// use sheetlink_core::range::split_range_str;
///
/// assert_eq!(split_range_str("Sheet1!A1:C5").unwrap(), (Some("Sheet1"), "A1", Some("C5")));
/// assert_eq!(split_range_str("A1:A").unwrap(), (None, "A1", Some("A")));
/// assert_eq!(split_range_str("A1").unwrap(), (None, "A1", None));
/// assert!(split_range_str("parb").is_err());
/// ```
pub fn split_range_str(text: &str) -> Result<(Option<&str>, &str, Option<&str>)> {
    let (title, cells) = match text.find('!') {
        Some(i) => (Some(&text[..i]).filter(|t| !t.is_empty()), &text[i + 1..]),
        None => (None, text),
    };
    let (start, end) = match cells.find(':') {
        Some(i) => (&cells[..i], Some(&cells[i + 1..])),
        None => (cells, None),
    };
    if !is_start_cell(start) {
        return Err(Error::InvalidRange(text.to_string()));
    }
    if let Some(end) = end {
        if !is_end_cell(end) {
            return Err(Error::InvalidRange(text.to_string()));
        }
    }
    Ok((title, start, end))
}

/// Split a cell string into its letter and digit halves
///
/// Either half may be empty, but not both. Returns `(letters, digits)` with
/// absent halves as empty / `None`.
pub fn split_cell_str(cell: &str) -> Result<(&str, Option<&str>)> {
    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split);
    if cell.is_empty()
        || !letters.bytes().all(|b| b.is_ascii_uppercase())
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::InvalidCellRef(cell.to_string()));
    }
    Ok((letters, if digits.is_empty() { None } else { Some(digits) }))
}

fn is_start_cell(s: &str) -> bool {
    let letters = s.bytes().take_while(|b| b.is_ascii_uppercase()).count();
    letters > 0 && s.len() > letters && s.bytes().skip(letters).all(|b| b.is_ascii_digit())
}

fn is_end_cell(s: &str) -> bool {
    let letters = s.bytes().take_while(|b| b.is_ascii_uppercase()).count();
    !s.is_empty() && s.bytes().skip(letters).all(|b| b.is_ascii_digit())
}

/// A parsed cell reference, zero-based
///
/// Either axis may be absent: "AA" is a column-only reference and "10" (legal
/// only in the end position of a range) is a row-only reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Column index (0-based, A = 0)
    pub col: Option<u32>,
    /// Row index (0-based; the one-based row number minus one)
    pub row: Option<u32>,
}

impl CellRef {
    /// Parse a cell string into a zero-based coordinate
    ///
    /// # Examples
    /// ```
    /// use sheetlink_core::range::CellRef;
    ///
    /// let c = CellRef::parse("A5").unwrap();
    /// assert_eq!((c.col, c.row), (Some(0), Some(4)));
    ///
    /// let c = CellRef::parse("AA").unwrap();
    /// assert_eq!((c.col, c.row), (Some(26), None));
    /// ```
    pub fn parse(cell: &str) -> Result<Self> {
        let (letters, digits) = split_cell_str(cell)?;
        let col = if letters.is_empty() {
            None
        } else {
            Some(letters_to_column(letters)?)
        };
        let row = match digits {
            None => None,
            Some(d) => {
                let n: u32 = d
                    .parse()
                    .map_err(|_| Error::InvalidCellRef(cell.to_string()))?;
                if n == 0 {
                    return Err(Error::InvalidCellRef(cell.to_string()));
                }
                Some(n - 1)
            }
        };
        Ok(Self { col, row })
    }
}

/// Build a range string from zero-based *inclusive* endpoints
///
/// Emits one-based inclusive notation; endpoints default toward the origin
/// (`A`/`1`). An end with only a row borrows the start's column letters; an
/// end with only a column omits the row digits ("D1:D"). With no endpoints at
/// all the result is the bare tab title (a whole-tab reference), or "A1" when
/// no title is known.
///
/// # Examples
/// ```
/// use sheetlink_core::range::build_range_str;
///
/// let s = build_range_str(Some("Sheet1"), Some(0), Some(4), Some(5), Some(9));
/// assert_eq!(s, "Sheet1!E1:J6");
/// ```
pub fn build_range_str(
    tab_title: Option<&str>,
    start_row: Option<u32>,
    start_col: Option<u32>,
    end_row: Option<u32>,
    end_col: Option<u32>,
) -> String {
    if let Some(title) = tab_title {
        if start_row.is_none() && start_col.is_none() && end_row.is_none() && end_col.is_none() {
            return title.to_string();
        }
    }
    let start = format!(
        "{}{}",
        column_to_letters(start_col.unwrap_or(0)),
        start_row.unwrap_or(0) + 1
    );
    let end = match (end_row, end_col) {
        (Some(r), Some(c)) => format!("{}{}", column_to_letters(c), r + 1),
        (None, Some(c)) => column_to_letters(c),
        (Some(r), None) => format!("{}{}", column_to_letters(start_col.unwrap_or(0)), r + 1),
        (None, None) => String::new(),
    };
    let cells = if end.is_empty() {
        start
    } else {
        format!("{}:{}", start, end)
    };
    match tab_title {
        Some(title) => format!("{}!{}", title, cells),
        None => cells,
    }
}

/// A rectangular span of cells within one tab
///
/// Indices are zero-based and half-open (end exclusive), matching the wire
/// protocol; `None` means the axis is unbounded in that direction. The tab
/// title is carried only for building textual ranges and never serialized.
///
/// Numeric construction comes in two flavors: [`GridRange::one_based`] for
/// user-facing inclusive indices and [`GridRange::zero_based`] for wire-form
/// exclusive indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    /// Stable id of the owning tab (distinct from its title)
    pub sheet_id: i64,
    /// Display title of the owning tab, if known
    #[serde(skip)]
    pub tab_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

impl GridRange {
    /// A range covering the entire tab (all bounds open)
    pub fn whole_tab(sheet_id: i64) -> Self {
        Self {
            sheet_id,
            tab_title: None,
            start_row_index: None,
            end_row_index: None,
            start_column_index: None,
            end_column_index: None,
        }
    }

    /// Parse an A1-notation range into a box
    ///
    /// A missing end cell yields a 1x1 box; an end cell missing one half
    /// leaves that axis open. Textual ends are inclusive and convert to the
    /// exclusive form by adding one.
    ///
    /// # Examples
    /// ```
    /// use sheetlink_core::range::GridRange;
    ///
    /// let rng = GridRange::from_a1(0, "Sheet1!D5:E50").unwrap();
    /// assert_eq!(rng.start_row_index, Some(4));
    /// assert_eq!(rng.end_row_index, Some(50));
    /// assert_eq!(rng.start_column_index, Some(3));
    /// assert_eq!(rng.end_column_index, Some(5));
    /// assert_eq!(rng.to_string(), "Sheet1!D5:E50");
    /// ```
    pub fn from_a1(sheet_id: i64, text: &str) -> Result<Self> {
        let (title, start, end) = split_range_str(text)?;
        let start_ref = CellRef::parse(start)?;
        let (end_row, end_col) = match end {
            None => (
                start_ref.row.map(|r| r + 1),
                start_ref.col.map(|c| c + 1),
            ),
            Some(end) => {
                let end_ref =
                    CellRef::parse(end).map_err(|_| Error::InvalidRange(text.to_string()))?;
                (end_ref.row.map(|r| r + 1), end_ref.col.map(|c| c + 1))
            }
        };
        Ok(Self {
            sheet_id,
            tab_title: title.map(String::from),
            start_row_index: start_ref.row,
            end_row_index: end_row,
            start_column_index: start_ref.col,
            end_column_index: end_col,
        })
    }

    /// Build a box from one-based, inclusive indices
    ///
    /// Missing starts default to row/column 1; a missing end with a present
    /// start yields a single row/column. Zero is rejected, since one-based
    /// indices start at 1.
    pub fn one_based(
        sheet_id: i64,
        start_row: Option<u32>,
        end_row: Option<u32>,
        start_col: Option<u32>,
        end_col: Option<u32>,
    ) -> Result<Self> {
        let start_row = rebase_one_based(start_row)?.unwrap_or(0);
        let start_col = rebase_one_based(start_col)?.unwrap_or(0);
        // A one-based inclusive end equals the zero-based exclusive end.
        let end_row = check_one_based(end_row)?.unwrap_or(start_row + 1);
        let end_col = check_one_based(end_col)?.unwrap_or(start_col + 1);
        Ok(Self {
            sheet_id,
            tab_title: None,
            start_row_index: Some(start_row),
            end_row_index: Some(end_row),
            start_column_index: Some(start_col),
            end_column_index: Some(end_col),
        })
    }

    /// Build a box from zero-based, half-open (end exclusive) indices
    ///
    /// Missing starts default to index 0; a missing end with a present start
    /// yields a span of one.
    pub fn zero_based(
        sheet_id: i64,
        start_row: Option<u32>,
        end_row: Option<u32>,
        start_col: Option<u32>,
        end_col: Option<u32>,
    ) -> Self {
        let start_row = start_row.unwrap_or(0);
        let start_col = start_col.unwrap_or(0);
        Self {
            sheet_id,
            tab_title: None,
            start_row_index: Some(start_row),
            end_row_index: Some(end_row.unwrap_or(start_row + 1)),
            start_column_index: Some(start_col),
            end_column_index: Some(end_col.unwrap_or(start_col + 1)),
        }
    }

    /// Attach a tab title for textual rendering
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.tab_title = Some(title.into());
        self
    }

    /// Resolve open end axes against the owning tab's known extent
    pub fn bounded_by(mut self, row_count: u32, column_count: u32) -> Self {
        if self.end_row_index.is_none() {
            self.end_row_index = Some(row_count);
            self.start_row_index.get_or_insert(0);
        }
        if self.end_column_index.is_none() {
            self.end_column_index = Some(column_count);
            self.start_column_index.get_or_insert(0);
        }
        self
    }

    /// Number of rows covered, when both row bounds are known
    pub fn row_count(&self) -> Option<u32> {
        match (self.start_row_index, self.end_row_index) {
            (Some(s), Some(e)) => Some(e.saturating_sub(s)),
            _ => None,
        }
    }

    /// Number of columns covered, when both column bounds are known
    pub fn column_count(&self) -> Option<u32> {
        match (self.start_column_index, self.end_column_index) {
            (Some(s), Some(e)) => Some(e.saturating_sub(s)),
            _ => None,
        }
    }

    /// Format as A1 notation (with the tab title prefix when known)
    pub fn to_a1(&self) -> String {
        if self.start_row_index.is_none()
            && self.end_row_index.is_none()
            && self.start_column_index.is_none()
            && self.end_column_index.is_none()
        {
            return build_range_str(self.tab_title.as_deref(), None, None, None, None);
        }
        let start_row = self.start_row_index.unwrap_or(0);
        let start_col = self.start_column_index.unwrap_or(0);
        // Exclusive ends render as inclusive; a 1x1 box collapses to its
        // start cell.
        let end_row = self.end_row_index.map(|e| e.saturating_sub(1));
        let end_col = self.end_column_index.map(|e| e.saturating_sub(1));
        let (end_row, end_col) = if end_row == Some(start_row) && end_col == Some(start_col) {
            (None, None)
        } else {
            (end_row, end_col)
        };
        build_range_str(
            self.tab_title.as_deref(),
            Some(start_row),
            Some(start_col),
            end_row,
            end_col,
        )
    }
}

impl fmt::Display for GridRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for GridRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_a1(0, s)
    }
}

fn rebase_one_based(idx: Option<u32>) -> Result<Option<u32>> {
    match idx {
        Some(0) => Err(Error::InvalidIndex(0)),
        Some(n) => Ok(Some(n - 1)),
        None => Ok(None),
    }
}

fn check_one_based(idx: Option<u32>) -> Result<Option<u32>> {
    match idx {
        Some(0) => Err(Error::InvalidIndex(0)),
        other => Ok(other),
    }
}

/// The axis a one-dimensional range runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

/// A span of whole rows or whole columns within one tab
///
/// Used by structural operations (insert, delete, resize, append). Same
/// index conventions as [`GridRange`]: zero-based, half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
}

impl DimensionRange {
    /// Build a span from one-based, inclusive indices
    pub fn one_based(
        sheet_id: i64,
        dimension: Dimension,
        start: Option<u32>,
        end: Option<u32>,
    ) -> Result<Self> {
        let start = rebase_one_based(start)?.unwrap_or(0);
        let end = check_one_based(end)?.unwrap_or(start + 1);
        Ok(Self {
            sheet_id,
            dimension,
            start_index: Some(start),
            end_index: Some(end),
        })
    }

    /// Build a span from zero-based, half-open indices
    pub fn zero_based(
        sheet_id: i64,
        dimension: Dimension,
        start: Option<u32>,
        end: Option<u32>,
    ) -> Self {
        let start = start.unwrap_or(0);
        Self {
            sheet_id,
            dimension,
            start_index: Some(start),
            end_index: Some(end.unwrap_or(start + 1)),
        }
    }

    /// Build a column span from letter labels ("A".."C" covers columns 0..3)
    pub fn columns_from_letters(
        sheet_id: i64,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self> {
        let start = match start {
            Some(s) => letters_to_column(s)?,
            None => 0,
        };
        let end = match end {
            Some(e) => letters_to_column(e)? + 1,
            None => start + 1,
        };
        Ok(Self {
            sheet_id,
            dimension: Dimension::Columns,
            start_index: Some(start),
            end_index: Some(end),
        })
    }
}
