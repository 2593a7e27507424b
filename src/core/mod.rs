//! Parsing and reshaping engine

pub mod datesheet;
pub mod grid;
pub mod section;
pub mod time_axis;
pub mod timetable;

pub use datesheet::{parse_datesheet, DateSheet, DateSheetModel};
pub use timetable::{parse_timetable, TimeTable, TimetableModel};
