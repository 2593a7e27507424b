//! Exam date-sheet normalization.
//!
//! The sheet lists one row per exam day with repeated `Code | <slot>` column
//! pairs, one pair per concurrent exam slot:
//!
//! ```text
//! Day     | Date        | Code  | 09:00AM-12:00PM | Code  | 02:00PM-05:00PM
//! Monday  | 15-Dec-2024 | CS101 | Intro to CS     | MT104 | Linear Algebra
//! ```
//!
//! Each pair is melted into `(Date, Day, Time, Code, Course)` records.

use crate::config::DateSheetLayout;
use crate::core::grid::fill_merged;
use crate::error::{ScheduleError, ScheduleResult};
use crate::excel::WorkbookReader;
use crate::types::{Cell, CourseEntry, DateSheetRow, RawGrid};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Format of date cells stored as text
pub const SOURCE_DATE_FORMAT: &str = "%d-%b-%Y";
/// Canonical rendering of output dates
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Day, date, code and at least one course column
const MIN_COLUMNS: usize = 4;

/// One concurrent exam slot: the code column, its course column and the
/// slot's time label taken from the course column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotColumns {
    pub code_col: usize,
    pub course_col: usize,
    pub time: String,
}

/// Column layout of a date-sheet, discovered once from its header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSheetColumns {
    pub day_col: usize,
    pub date_col: usize,
    pub slots: Vec<SlotColumns>,
}

impl DateSheetColumns {
    /// Scan the header row for `Day`, `Date` and every `Code`/slot pair
    pub fn discover(grid: &RawGrid, header_row: usize) -> ScheduleResult<Self> {
        let header = |col: usize| grid.text(header_row, col).unwrap_or_default();
        let find = |name: &str| (0..grid.width()).find(|&col| header(col).eq_ignore_ascii_case(name));

        let day_col = find("Day").ok_or_else(|| {
            ScheduleError::MalformedWorkbook(format!("no 'Day' column in header row {}", header_row))
        })?;
        let date_col = find("Date").ok_or_else(|| {
            ScheduleError::MalformedWorkbook(format!("no 'Date' column in header row {}", header_row))
        })?;

        let mut slots = Vec::new();
        let mut col = 0;
        while col < grid.width() {
            if !header(col).to_ascii_lowercase().starts_with("code") {
                col += 1;
                continue;
            }
            let course_col = col + 1;
            let time = grid.text(header_row, course_col).ok_or_else(|| {
                ScheduleError::MalformedWorkbook(format!(
                    "code column {} has no slot header next to it",
                    col
                ))
            })?;
            slots.push(SlotColumns {
                code_col: col,
                course_col,
                time,
            });
            col += 2;
        }

        if slots.is_empty() {
            return Err(ScheduleError::MalformedWorkbook(
                "no Code/course column pairs in header row".to_string(),
            ));
        }

        Ok(Self {
            day_col,
            date_col,
            slots,
        })
    }
}

/// Parse a date cell ("15-Dec-2024" text or a native date cell)
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Text(s) => NaiveDate::parse_from_str(s.trim(), SOURCE_DATE_FORMAT).ok(),
        _ => None,
    }
}

/// A fully parsed date-sheet
#[derive(Debug, Clone, PartialEq)]
pub struct DateSheetModel {
    pub title: String,
    pub semester: String,
    rows: Vec<DateSheetRow>,
    courses: Vec<CourseEntry>,
    index: HashMap<String, usize>,
}

impl DateSheetModel {
    /// Rows in canonical (date, day, time, code) order
    pub fn rows(&self) -> &[DateSheetRow] {
        &self.rows
    }

    /// Catalog of selectable courses in first-seen order
    pub fn courses(&self) -> &[CourseEntry] {
        &self.courses
    }

    pub fn course(&self, key: &str) -> Option<&CourseEntry> {
        self.index.get(key).map(|&pos| &self.courses[pos])
    }

    /// Rows of the selected catalog keys, in canonical order.
    /// Unknown keys are ignored.
    pub fn read_by_course<S: AsRef<str>>(&self, keys: &[S]) -> Vec<DateSheetRow> {
        let mut positions: Vec<usize> = keys
            .iter()
            .filter_map(|key| self.course(key.as_ref()))
            .map(|entry| entry.row_index)
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions.into_iter().map(|pos| self.rows[pos].clone()).collect()
    }

    /// Every row whose course code is one of `codes`
    pub fn read_by_code<S: AsRef<str>>(&self, codes: &[S]) -> Vec<DateSheetRow> {
        let wanted: HashSet<&str> = codes.iter().map(AsRef::as_ref).collect();
        self.rows
            .iter()
            .filter(|row| wanted.contains(row.code.as_str()))
            .cloned()
            .collect()
    }
}

/// Build the course catalog; a repeated key keeps its first position and
/// records the last row it was seen on
fn build_catalog(rows: &[DateSheetRow]) -> (Vec<CourseEntry>, HashMap<String, usize>) {
    let mut courses: Vec<CourseEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row_index, row) in rows.iter().enumerate() {
        let key = format!("{} - {}", row.code, row.course);
        match index.get(&key) {
            Some(&pos) => courses[pos].row_index = row_index,
            None => {
                index.insert(key.clone(), courses.len());
                courses.push(CourseEntry {
                    key,
                    code: row.code.clone(),
                    title: row.course.clone(),
                    row_index,
                });
            }
        }
    }
    (courses, index)
}

/// Normalize a date-sheet grid.
///
/// `title` and `semester` override the header rows when given.
pub fn parse_datesheet(
    grid: &RawGrid,
    layout: &DateSheetLayout,
    title: Option<&str>,
    semester: Option<&str>,
) -> ScheduleResult<DateSheetModel> {
    if grid.height() <= layout.header_row {
        return Err(ScheduleError::MalformedWorkbook(format!(
            "expected a header row at row {}, sheet has {} rows",
            layout.header_row,
            grid.height()
        )));
    }
    if grid.width() < MIN_COLUMNS {
        return Err(ScheduleError::MalformedWorkbook(format!(
            "expected at least {} columns, sheet has {}",
            MIN_COLUMNS,
            grid.width()
        )));
    }

    let title = match title {
        Some(t) => t.to_string(),
        None => grid
            .header_text(layout.title_row, 0)
            .ok_or_else(|| ScheduleError::MalformedWorkbook("missing title row".to_string()))?,
    };
    let semester = match semester {
        Some(s) => s.to_string(),
        None => grid
            .header_text(layout.semester_row, 0)
            .ok_or_else(|| ScheduleError::MalformedWorkbook("missing semester row".to_string()))?,
    };

    let mut dense = grid.clone();
    fill_merged(&mut dense);

    let columns = DateSheetColumns::discover(&dense, layout.header_row)?;
    debug!(slots = columns.slots.len(), "discovered date-sheet columns");

    let mut seen: HashSet<DateSheetRow> = HashSet::new();
    let mut records: Vec<(NaiveDate, DateSheetRow)> = Vec::new();

    for slot in &columns.slots {
        for row in layout.header_row + 1..dense.height() {
            let (Some(day), Some(code), Some(course)) = (
                dense.text(row, columns.day_col),
                dense.text(row, slot.code_col),
                dense.text(row, slot.course_col),
            ) else {
                continue;
            };
            let date_cell = dense.cell(row, columns.date_col);
            if date_cell.is_empty() {
                continue;
            }
            let date = parse_date(date_cell).ok_or_else(|| {
                ScheduleError::MalformedWorkbook(format!(
                    "row {}: unrecognised date '{}'",
                    row,
                    date_cell.as_text().unwrap_or_default()
                ))
            })?;

            let record = DateSheetRow {
                date: date.format(DISPLAY_DATE_FORMAT).to_string(),
                day,
                time: slot.time.clone(),
                code,
                course,
            };
            if seen.insert(record.clone()) {
                records.push((date, record));
            }
        }
    }

    records.sort_by(|(a_date, a), (b_date, b)| {
        (a_date, &a.day, &a.time, &a.code).cmp(&(b_date, &b.day, &b.time, &b.code))
    });
    let rows: Vec<DateSheetRow> = records.into_iter().map(|(_, row)| row).collect();
    let (courses, index) = build_catalog(&rows);

    info!(
        rows = rows.len(),
        courses = courses.len(),
        "parsed date-sheet"
    );

    Ok(DateSheetModel {
        title,
        semester,
        rows,
        courses,
        index,
    })
}

//==============================================================================
// Loader
//==============================================================================

/// Date-sheet loader holding the model of the last successful load.
///
/// `load` reports success as a boolean; the cause of a failure is logged
/// and not surfaced.
#[derive(Debug, Clone, Default)]
pub struct DateSheet {
    layout: DateSheetLayout,
    title: Option<String>,
    semester: Option<String>,
    model: Option<DateSheetModel>,
}

impl DateSheet {
    pub fn new(layout: DateSheetLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Use a fixed title instead of the sheet's title row
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Use a fixed semester label instead of the sheet's second row
    pub fn with_semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = Some(semester.into());
        self
    }

    /// Read and parse a workbook, replacing any previously loaded model
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        self.model = None;
        match WorkbookReader::open(path) {
            Ok(grid) => self.load_grid(&grid),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to read date-sheet");
                false
            }
        }
    }

    /// Parse an already-read grid, replacing any previously loaded model
    pub fn load_grid(&mut self, grid: &RawGrid) -> bool {
        self.model = None;
        match parse_datesheet(
            grid,
            &self.layout,
            self.title.as_deref(),
            self.semester.as_deref(),
        ) {
            Ok(model) => {
                self.model = Some(model);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to parse date-sheet");
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&DateSheetModel> {
        self.model.as_ref()
    }

    /// # Panics
    ///
    /// Panics if no workbook has been loaded successfully.
    pub fn read_by_course<S: AsRef<str>>(&self, keys: &[S]) -> Vec<DateSheetRow> {
        self.loaded().read_by_course(keys)
    }

    /// # Panics
    ///
    /// Panics if no workbook has been loaded successfully.
    pub fn read_by_code<S: AsRef<str>>(&self, codes: &[S]) -> Vec<DateSheetRow> {
        self.loaded().read_by_code(codes)
    }

    fn loaded(&self) -> &DateSheetModel {
        match &self.model {
            Some(model) => model,
            None => panic!("date-sheet queried before a successful load"),
        }
    }
}
