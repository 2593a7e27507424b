use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

//==============================================================================
// Raw Grid Types
//==============================================================================

/// A single spreadsheet cell as read from the workbook
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Build a text cell (convenience for tests and fixtures)
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Render the cell as trimmed text, `None` when it carries nothing
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            Cell::DateTime(dt) => Some(Self::render_datetime(dt)),
        }
    }

    /// True when the cell holds no usable value (blank or whitespace-only)
    pub fn is_empty(&self) -> bool {
        self.as_text().is_none()
    }

    // Excel stores bare times as fractions of a day anchored on 1899-12-31,
    // so anything before 1900 is rendered as a clock time.
    fn render_datetime(dt: &NaiveDateTime) -> String {
        let time_only = NaiveDate::from_ymd_opt(1900, 1, 1).is_some_and(|epoch| dt.date() < epoch);
        if time_only {
            dt.format("%I:%M%P").to_string()
        } else if dt.time() == chrono::NaiveTime::MIN {
            dt.format("%d-%b-%Y").to_string()
        } else {
            dt.format("%d-%b-%Y %I:%M %p").to_string()
        }
    }
}

/// A rectangular merged region, inclusive on both ends (0-based)
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRange {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
    /// Value of the anchor (top-left) cell
    pub value: Cell,
}

impl MergedRange {
    pub fn new(min_row: usize, min_col: usize, max_row: usize, max_col: usize) -> Self {
        Self {
            min_row,
            min_col,
            max_row,
            max_col,
            value: Cell::Empty,
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }
}

/// Dense 2-D cell grid in absolute sheet coordinates plus merged regions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
    width: usize,
    merged: Vec<MergedRange>,
}

impl RawGrid {
    /// Create a grid, padding ragged rows to a common width
    pub fn new(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self {
            rows,
            width,
            merged: Vec::new(),
        }
    }

    /// Build a grid from string literals; `""` becomes an empty cell
    pub fn from_strings(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|s| {
                            if s.is_empty() {
                                Cell::Empty
                            } else {
                                Cell::text(*s)
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    /// Attach merged regions, resolving each region's anchor value from the grid
    pub fn with_merged(mut self, ranges: Vec<MergedRange>) -> Self {
        self.merged = ranges
            .into_iter()
            .map(|mut range| {
                range.value = self.cell(range.min_row, range.min_col).clone();
                range
            })
            .collect();
        self
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn merged(&self) -> &[MergedRange] {
        &self.merged
    }

    /// Cell at (row, col); out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Overwrite a cell; out-of-range positions are ignored
    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = value;
        }
    }

    pub fn text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).as_text()
    }

    /// First non-empty text in `row` at or after `from_col`.
    ///
    /// Titles are often stored in whichever physical cell of a merged header
    /// holds the value, so the row is back-filled towards `from_col`.
    pub fn header_text(&self, row: usize, from_col: usize) -> Option<String> {
        (from_col..self.width).find_map(|col| self.text(row, col))
    }

    /// All non-empty texts of a row starting at `from_col`
    pub fn row_texts(&self, row: usize, from_col: usize) -> Vec<String> {
        (from_col..self.width)
            .filter_map(|col| self.text(row, col))
            .collect()
    }
}

//==============================================================================
// Normalized Records
//==============================================================================

/// One exam slot of a date-sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateSheetRow {
    /// Canonical "DD Mon YYYY"
    pub date: String,
    pub day: String,
    pub time: String,
    pub code: String,
    pub course: String,
}

/// One course block of a weekly timetable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimetableRow {
    pub day: String,
    /// "HH:MM AM - HH:MM PM"
    pub time: String,
    pub room: String,
    pub course: String,
}

/// A row of a timetable query result as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Entry(TimetableRow),
    /// Blank row between two days' blocks
    Separator,
}

impl DisplayRow {
    pub fn is_separator(&self) -> bool {
        matches!(self, DisplayRow::Separator)
    }

    pub fn entry(&self) -> Option<&TimetableRow> {
        match self {
            DisplayRow::Entry(row) => Some(row),
            DisplayRow::Separator => None,
        }
    }
}

impl Serialize for DisplayRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayRow::Entry(row) => row.serialize(serializer),
            DisplayRow::Separator => TimetableRow::default().serialize(serializer),
        }
    }
}

//==============================================================================
// Catalog Entities
//==============================================================================

/// A selectable date-sheet course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseEntry {
    /// "CODE - TITLE"
    pub key: String,
    pub code: String,
    pub title: String,
    /// Position of the last row carrying this key
    pub row_index: usize,
}
