//! Layout configuration
//!
//! The row/column offsets of the institution's sheets change from semester to
//! semester, so they live in a YAML layout profile instead of the code. Every
//! field has a default matching the current published layout.

use crate::error::{ScheduleError, ScheduleResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_title_row() -> usize {
    0
}
fn default_secondary_row() -> usize {
    1
}
fn default_datesheet_header_row() -> usize {
    2
}
fn default_time_header_row() -> usize {
    3
}
fn default_data_start_row() -> usize {
    4
}
fn default_first_slot_col() -> usize {
    2
}
fn default_trailing_columns() -> usize {
    1
}
fn default_lecture_minutes() -> u32 {
    80
}
fn default_lecture_cells() -> u32 {
    8
}
fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
}
fn default_min_mean_span_chars() -> f64 {
    20.0
}

/// Complete layout profile for both sheet kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub datesheet: DateSheetLayout,
    #[serde(default)]
    pub timetable: TimetableLayout,
}

/// Date-sheet offsets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSheetLayout {
    #[serde(default = "default_title_row")]
    pub title_row: usize,
    #[serde(default = "default_secondary_row")]
    pub semester_row: usize,
    /// Row holding "Day | Date | Code | <slot> | Code | <slot> ..."
    #[serde(default = "default_datesheet_header_row")]
    pub header_row: usize,
}

impl Default for DateSheetLayout {
    fn default() -> Self {
        Self {
            title_row: default_title_row(),
            semester_row: default_secondary_row(),
            header_row: default_datesheet_header_row(),
        }
    }
}

/// Timetable offsets and time-axis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableLayout {
    #[serde(default = "default_title_row")]
    pub title_row: usize,
    #[serde(default = "default_secondary_row")]
    pub batch_row: usize,
    /// Row whose first slot cell carries the anchor time annotation
    #[serde(default = "default_time_header_row")]
    pub time_header_row: usize,
    #[serde(default = "default_data_start_row")]
    pub data_start_row: usize,
    /// Columns before this one are Day and Room
    #[serde(default = "default_first_slot_col")]
    pub first_slot_col: usize,
    /// Columns at the right edge that are not time slots
    #[serde(default = "default_trailing_columns")]
    pub trailing_columns: usize,
    #[serde(default = "default_lecture_minutes")]
    pub lecture_minutes: u32,
    /// Grid cells one lecture spans
    #[serde(default = "default_lecture_cells")]
    pub lecture_cells: u32,
    /// Used when the anchor annotation cannot be read
    #[serde(default = "default_start")]
    pub default_start: NaiveTime,
    /// Mean joined-time length at or below which the grid is rejected
    #[serde(default = "default_min_mean_span_chars")]
    pub min_mean_span_chars: f64,
}

impl Default for TimetableLayout {
    fn default() -> Self {
        Self {
            title_row: default_title_row(),
            batch_row: default_secondary_row(),
            time_header_row: default_time_header_row(),
            data_start_row: default_data_start_row(),
            first_slot_col: default_first_slot_col(),
            trailing_columns: default_trailing_columns(),
            lecture_minutes: default_lecture_minutes(),
            lecture_cells: default_lecture_cells(),
            default_start: default_start(),
            min_mean_span_chars: default_min_mean_span_chars(),
        }
    }
}

impl TimetableLayout {
    /// Minutes represented by one grid column
    pub fn slot_minutes(&self) -> i64 {
        if self.lecture_cells == 0 {
            return 0;
        }
        i64::from(self.lecture_minutes / self.lecture_cells)
    }
}

impl LayoutConfig {
    /// Load a layout profile from a YAML file
    pub fn from_path(path: &Path) -> ScheduleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ScheduleResult<Self> {
        let config: LayoutConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> ScheduleResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> ScheduleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        let tt = &self.timetable;
        if tt.lecture_cells == 0 {
            return Err(ScheduleError::Config(
                "timetable.lecture_cells must be greater than zero".to_string(),
            ));
        }
        if tt.slot_minutes() == 0 {
            return Err(ScheduleError::Config(format!(
                "slot duration is zero ({} minutes over {} cells)",
                tt.lecture_minutes, tt.lecture_cells
            )));
        }
        if tt.data_start_row <= tt.time_header_row {
            return Err(ScheduleError::Config(format!(
                "timetable.data_start_row ({}) must follow time_header_row ({})",
                tt.data_start_row, tt.time_header_row
            )));
        }
        let ds = &self.datesheet;
        if ds.header_row <= ds.title_row {
            return Err(ScheduleError::Config(format!(
                "datesheet.header_row ({}) must follow title_row ({})",
                ds.header_row, ds.title_row
            )));
        }
        Ok(())
    }
}
