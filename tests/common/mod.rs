//! Workbook fixtures shared by the integration tests.
//!
//! Fixtures are written with rust_xlsxwriter so the reader sees real merged
//! regions, exactly as in the published sheets.

#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use std::path::Path;

/// Total timetable columns: Day, Room, 16 slots, trailing notes column
pub const TIMETABLE_WIDTH: u16 = 19;

fn write_row(ws: &mut Worksheet, row: u32, cells: &[&str]) {
    for (col, value) in cells.iter().enumerate() {
        if !value.is_empty() {
            ws.write_string(row, col as u16, *value).unwrap();
        }
    }
}

/// Date-sheet with two concurrent slots and a title merged across the header
pub fn write_datesheet(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    let plain = Format::new();

    ws.merge_range(0, 0, 0, 5, "Final Examinations, Fall 2024", &plain)
        .unwrap();
    write_row(ws, 1, &["BS-CS"]);
    write_row(
        ws,
        2,
        &["Day", "Date", "Code", "09:00AM-12:00PM", "Code", "02:00PM-05:00PM"],
    );
    write_row(ws, 3, &["Monday", "15-Dec-2024", "CS101", "Intro to CS", "", ""]);
    write_row(
        ws,
        4,
        &["Tuesday", "16-Dec-2024", "MT104", "Linear Algebra", "EE201", "Circuits"],
    );
    write_row(
        ws,
        5,
        &["Wednesday", "17-Dec-2024", "", "", "SS150", "Pakistan Studies"],
    );

    workbook.save(path).unwrap();
}

/// Date-sheet whose dates are native date cells instead of text
pub fn write_datesheet_with_date_cells(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("dd-mmm-yyyy");

    write_row(ws, 0, &["Mid Term Examinations"]);
    write_row(ws, 1, &["BS-SE"]);
    write_row(ws, 2, &["Day", "Date", "Code", "11:00AM-12:30PM"]);

    write_row(ws, 3, &["Thursday", "", "SE110", "Software Engineering"]);
    let date = ExcelDateTime::from_ymd(2025, 3, 6).unwrap();
    ws.write_datetime_with_format(3, 1, &date, &date_format).unwrap();

    write_row(ws, 4, &["Friday", "", "SE210", "Requirements"]);
    let date = ExcelDateTime::from_ymd(2025, 3, 7).unwrap();
    ws.write_datetime_with_format(4, 1, &date, &date_format).unwrap();

    workbook.save(path).unwrap();
}

fn timetable_header(ws: &mut Worksheet, plain: &Format) {
    ws.merge_range(0, 0, 0, TIMETABLE_WIDTH - 1, "Timetable Spring 2025", plain)
        .unwrap();
    write_row(ws, 1, &["Batches", "BCS-2A", " BCS-2B "]);
    write_row(ws, 3, &["Day", "Room", "8.00am."]);
    ws.write_string(3, TIMETABLE_WIDTH - 1, "Notes").unwrap();
}

/// Weekly timetable over three days.
///
/// | day       | room | 08:00-09:20           | 09:20-10:40        |
/// |-----------|------|-----------------------|--------------------|
/// | Monday    | R-1  | OOP (BCS-2A)          | Calculus (BCS-2A)  |
/// |           | R-2  | OOP (BCS-2B)          |                    |
/// | Tuesday   | R-1  |                       | OOP (BCS-2A)       |
/// |           | R-2  | Physics Lab (BCS-2B) over R-2 and R-3     |
/// |           | R-3  |                       |                    |
/// | Wednesday | R-1  | OOP (BCS-2A)          |                    |
pub fn write_timetable(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    let plain = Format::new();
    timetable_header(ws, &plain);

    ws.merge_range(4, 0, 5, 0, "Monday", &plain).unwrap();
    ws.write_string(4, 1, "R-1").unwrap();
    ws.merge_range(4, 2, 4, 9, "OOP (BCS-2A)", &plain).unwrap();
    ws.merge_range(4, 10, 4, 17, "Calculus (BCS-2A)", &plain).unwrap();
    ws.write_string(5, 1, "R-2").unwrap();
    ws.merge_range(5, 2, 5, 9, "OOP (BCS-2B)", &plain).unwrap();

    write_row(ws, 6, &["Tuesday (Lab Day)", "R-1"]);
    ws.merge_range(6, 10, 6, 17, "OOP (BCS-2A)", &plain).unwrap();
    ws.write_string(7, 1, "R-2").unwrap();
    ws.write_string(8, 1, "R-3").unwrap();
    ws.merge_range(7, 2, 8, 9, "Physics Lab (BCS-2B)", &plain)
        .unwrap();

    write_row(ws, 9, &["Wednesday", "R-1"]);
    ws.merge_range(9, 2, 9, 9, "OOP (BCS-2A)", &plain).unwrap();

    workbook.save(path).unwrap();
}

/// Timetable layout with single-cell entries only (a holiday schedule)
pub fn write_unmerged_timetable(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    let plain = Format::new();
    timetable_header(ws, &plain);

    write_row(ws, 4, &["Monday", "R-1", "Holiday"]);
    write_row(ws, 5, &["", "R-2", "", "", "Holiday"]);
    write_row(ws, 6, &["Tuesday", "R-1", "", "Holiday"]);

    workbook.save(path).unwrap();
}
