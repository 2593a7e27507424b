//! Excel exporter - normalized tables → .xlsx

use crate::error::ScheduleResult;
use crate::types::{DateSheetRow, DisplayRow};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

const DATESHEET_COLUMNS: [(&str, f64); 5] = [
    ("Date", 14.0),
    ("Day", 12.0),
    ("Time", 18.0),
    ("Code", 10.0),
    ("Course", 40.0),
];

const TIMETABLE_COLUMNS: [(&str, f64); 4] =
    [("Day", 12.0), ("Time", 22.0), ("Room", 14.0), ("Course", 40.0)];

/// Writes result tables to a single-sheet workbook, header in row 0
pub struct ExcelExporter {
    sheet_name: String,
}

impl ExcelExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    pub fn export_datesheet(&self, rows: &[DateSheetRow], output_path: &Path) -> ScheduleResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = self.prepare_sheet(&mut workbook, &DATESHEET_COLUMNS)?;

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, &row.date)?;
            worksheet.write_string(r, 1, &row.day)?;
            worksheet.write_string(r, 2, &row.time)?;
            worksheet.write_string(r, 3, &row.code)?;
            worksheet.write_string(r, 4, &row.course)?;
        }

        workbook.save(output_path)?;
        Ok(())
    }

    /// Separator rows are left blank
    pub fn export_timetable(&self, rows: &[DisplayRow], output_path: &Path) -> ScheduleResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = self.prepare_sheet(&mut workbook, &TIMETABLE_COLUMNS)?;

        for (i, row) in rows.iter().enumerate() {
            let Some(row) = row.entry() else {
                continue;
            };
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, &row.day)?;
            worksheet.write_string(r, 1, &row.time)?;
            worksheet.write_string(r, 2, &row.room)?;
            worksheet.write_string(r, 3, &row.course)?;
        }

        workbook.save(output_path)?;
        Ok(())
    }

    fn prepare_sheet<'a>(
        &self,
        workbook: &'a mut Workbook,
        columns: &[(&str, f64)],
    ) -> ScheduleResult<&'a mut Worksheet> {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = Format::new().set_bold();
        for (col, (name, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }
        Ok(worksheet)
    }
}
