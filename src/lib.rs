//! Schedule Forge - normalize university exam date-sheets and class
//! timetables published as Excel grids
//!
//! The published sheets rely on merged cells, repeated `Code`/course column
//! pairs and a single time annotation to convey their structure. This
//! library rebuilds that structure and produces one clean row per exam slot
//! or course block, plus a catalog of selectable courses.
//!
//! # Example
//!
//! ```no_run
//! use schedule_forge::config::LayoutConfig;
//! use schedule_forge::core::TimeTable;
//!
//! let config = LayoutConfig::default();
//! let mut timetable = TimeTable::new(config.timetable);
//!
//! if timetable.load("timetable.xlsx") {
//!     let model = timetable.model().unwrap();
//!     println!("Courses: {}", model.courses().len());
//!     for row in timetable.read_by_course(&["Data Structures (BCS 3A)"]) {
//!         println!("{:?}", row);
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{ScheduleError, ScheduleResult};
pub use types::{Cell, CourseEntry, DateSheetRow, DisplayRow, MergedRange, RawGrid, TimetableRow};
