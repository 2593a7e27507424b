//! Weekly class timetable normalization.
//!
//! The sheet is a day × room × time matrix. Each course occupies a merged
//! block spanning the slot columns of its lecture (and sometimes several
//! room rows); day labels appear once per block of rooms:
//!
//! ```text
//! row 3:  Day     | Room | 8.00am. |        |  ...
//! row 4:  Monday  | R-1  | [ Calculus (BCS-1A) merged over 8 cols ] ...
//! row 5:          | R-2  | ...
//! ```

use crate::config::TimetableLayout;
use crate::core::grid::{fill_merged, forward_fill_column};
use crate::core::section::{clean_course_title, collapse_single_section};
use crate::core::time_axis::{resolve_anchor, start_of, TimeAxis};
use crate::error::{ScheduleError, ScheduleResult};
use crate::excel::WorkbookReader;
use crate::types::{DisplayRow, RawGrid, TimetableRow};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

const DAY_COL: usize = 0;
const ROOM_COL: usize = 1;

/// A fully parsed timetable
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableModel {
    pub title: String,
    pub batches: Vec<String>,
    rows: Vec<TimetableRow>,
    day_order: Vec<String>,
    courses: Vec<String>,
}

impl TimetableModel {
    /// Rows ordered by (day, start time, course, room)
    pub fn rows(&self) -> &[TimetableRow] {
        &self.rows
    }

    /// Days in order of first appearance in the sheet
    pub fn day_order(&self) -> &[String] {
        &self.day_order
    }

    /// Distinct course strings, sorted
    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    fn day_rank(&self, day: &str) -> usize {
        self.day_order
            .iter()
            .position(|d| d == day)
            .unwrap_or(self.day_order.len())
    }

    fn sort_rows(&self, rows: &mut [TimetableRow]) {
        rows.sort_by(|a, b| {
            (self.day_rank(&a.day), start_of(&a.time), &a.course, &a.room).cmp(&(
                self.day_rank(&b.day),
                start_of(&b.time),
                &b.course,
                &b.room,
            ))
        });
    }

    /// Rows of the selected courses, matched by exact course text.
    ///
    /// When every tagged row shares one section tag the tag is stripped.
    /// Days are separated by a single `DisplayRow::Separator`.
    pub fn read_by_course<S: AsRef<str>>(&self, courses: &[S]) -> Vec<DisplayRow> {
        let wanted: HashSet<&str> = courses.iter().map(AsRef::as_ref).collect();
        let mut rows: Vec<TimetableRow> = self
            .rows
            .iter()
            .filter(|row| wanted.contains(row.course.as_str()))
            .cloned()
            .collect();

        if let Some(section) = collapse_single_section(&mut rows) {
            debug!(section = %section, "stripped shared section tag");
        }
        self.sort_rows(&mut rows);
        partition_by_day(rows)
    }
}

/// Emit rows grouped by day with one separator between consecutive days
pub fn partition_by_day(rows: Vec<TimetableRow>) -> Vec<DisplayRow> {
    let mut out = Vec::with_capacity(rows.len());
    let mut current_day: Option<String> = None;

    for row in rows {
        if let Some(day) = &current_day {
            if *day != row.day {
                out.push(DisplayRow::Separator);
            }
        }
        current_day = Some(row.day.clone());
        out.push(DisplayRow::Entry(row));
    }
    out
}

/// First whitespace-delimited token of a day cell ("Monday (Lab Day)" → "Monday")
fn day_token(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_string)
}

/// Normalize a timetable grid.
///
/// `title` overrides the sheet's title row when given.
pub fn parse_timetable(
    grid: &RawGrid,
    layout: &TimetableLayout,
    title: Option<&str>,
) -> ScheduleResult<TimetableModel> {
    if grid.height() <= layout.data_start_row {
        return Err(ScheduleError::MalformedWorkbook(format!(
            "expected data rows from row {}, sheet has {} rows",
            layout.data_start_row,
            grid.height()
        )));
    }
    let slot_end = grid.width().saturating_sub(layout.trailing_columns);
    if slot_end <= layout.first_slot_col {
        return Err(ScheduleError::MalformedWorkbook(format!(
            "expected day, room and slot columns, sheet has {} columns",
            grid.width()
        )));
    }

    let title = match title {
        Some(t) => t.to_string(),
        None => grid
            .header_text(layout.title_row, 0)
            .ok_or_else(|| ScheduleError::MalformedWorkbook("missing title row".to_string()))?,
    };
    let batches = grid.row_texts(layout.batch_row, 1);

    // Time axis from the single annotated header cell
    let anchor_text = grid.header_text(layout.time_header_row, layout.first_slot_col);
    let anchor = resolve_anchor(anchor_text.as_deref(), layout.default_start);
    let axis = TimeAxis::project(anchor, layout.slot_minutes(), layout.first_slot_col, slot_end);

    // Dense pre-pass
    let mut dense = grid.clone();
    fill_merged(&mut dense);
    forward_fill_column(&mut dense, DAY_COL, layout.data_start_row);

    // Melt and group by (day, room, course)
    let mut day_order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<(usize, String, String), Vec<usize>> = BTreeMap::new();

    for row in layout.data_start_row..dense.height() {
        let day = dense
            .text(row, DAY_COL)
            .and_then(|text| day_token(&text))
            .ok_or_else(|| {
                ScheduleError::MalformedWorkbook(format!("row {} has no day label above it", row))
            })?;
        let day_idx = match day_order.iter().position(|d| *d == day) {
            Some(idx) => idx,
            None => {
                day_order.push(day);
                day_order.len() - 1
            }
        };

        let Some(room) = dense.text(row, ROOM_COL) else {
            continue;
        };
        for col in layout.first_slot_col..slot_end {
            if let Some(course) = dense.text(row, col) {
                groups
                    .entry((day_idx, room.clone(), course))
                    .or_default()
                    .push(col);
            }
        }
    }

    let joined: Vec<((usize, String, String), String)> = groups
        .into_iter()
        .map(|(key, mut cols)| {
            cols.sort_unstable();
            cols.dedup();
            let times = axis.join(&cols);
            (key, times)
        })
        .collect();

    validate_spans(&joined, layout.min_mean_span_chars)?;

    let mut seen: HashSet<TimetableRow> = HashSet::new();
    let mut rows: Vec<TimetableRow> = Vec::with_capacity(joined.len());
    for ((day_idx, room, course), times) in joined {
        let row = TimetableRow {
            day: day_order[day_idx].clone(),
            time: axis.span_range(&times),
            room,
            course: clean_course_title(&course),
        };
        if seen.insert(row.clone()) {
            rows.push(row);
        }
    }

    let courses: Vec<String> = rows
        .iter()
        .map(|row| row.course.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut model = TimetableModel {
        title,
        batches,
        rows: Vec::new(),
        day_order,
        courses,
    };
    model.sort_rows(&mut rows);
    model.rows = rows;

    info!(
        rows = model.rows.len(),
        courses = model.courses.len(),
        days = model.day_order.len(),
        "parsed timetable"
    );
    Ok(model)
}

/// Reject grids whose course blocks do not span several slots.
///
/// A real lecture joins many slot labels; a grid without merged spans (a
/// holiday schedule, a different export) yields single-label strings.
fn validate_spans<K>(joined: &[(K, String)], threshold: f64) -> ScheduleResult<()> {
    if joined.is_empty() {
        return Err(ScheduleError::UnsupportedLayout(
            "no course cells found in the timetable grid".to_string(),
        ));
    }
    let total: usize = joined.iter().map(|(_, times)| times.len()).sum();
    let mean = total as f64 / joined.len() as f64;
    debug!(mean_span_chars = mean, threshold, "checked merged-span evidence");

    if mean > threshold {
        Ok(())
    } else {
        Err(ScheduleError::UnsupportedLayout(format!(
            "mean joined time length {:.1} is not above {:.1}; grid has no merged course blocks",
            mean, threshold
        )))
    }
}

//==============================================================================
// Loader
//==============================================================================

/// Timetable loader holding the model of the last successful load.
///
/// `load` reports success as a boolean; the cause of a failure is logged
/// and not surfaced.
#[derive(Debug, Clone, Default)]
pub struct TimeTable {
    layout: TimetableLayout,
    title: Option<String>,
    model: Option<TimetableModel>,
}

impl TimeTable {
    pub fn new(layout: TimetableLayout) -> Self {
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

    /// Read and parse a workbook, replacing any previously loaded model
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        self.model = None;
        match WorkbookReader::open(path) {
            Ok(grid) => self.load_grid(&grid),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to read timetable");
                false
            }
        }
    }

    /// Parse an already-read grid, replacing any previously loaded model
    pub fn load_grid(&mut self, grid: &RawGrid) -> bool {
        self.model = None;
        match parse_timetable(grid, &self.layout, self.title.as_deref()) {
            Ok(model) => {
                self.model = Some(model);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to parse timetable");
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TimetableModel> {
        self.model.as_ref()
    }

    /// # Panics
    ///
    /// Panics if no workbook has been loaded successfully.
    pub fn read_by_course<S: AsRef<str>>(&self, courses: &[S]) -> Vec<DisplayRow> {
        match &self.model {
            Some(model) => model.read_by_course(courses),
            None => panic!("timetable queried before a successful load"),
        }
    }
}
