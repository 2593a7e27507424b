//! Workbook reader - spreadsheet file → dense `RawGrid`

use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{Cell, MergedRange, RawGrid};
use calamine::{open_workbook_auto, Data, Dimensions, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the first worksheet of a workbook into a `RawGrid`
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Convenience for `WorkbookReader::new(path).read()`
    pub fn open<P: AsRef<Path>>(path: P) -> ScheduleResult<RawGrid> {
        Self::new(path).read()
    }

    /// Read cells and merged regions of the first worksheet
    pub fn read(&self) -> ScheduleResult<RawGrid> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            ScheduleError::Workbook(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ScheduleError::MalformedWorkbook("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;
        let merged = Self::merged_regions(&mut workbook, &sheet_name)?;

        let grid = Self::grid_from_range(&range).with_merged(merged);
        debug!(
            sheet = %sheet_name,
            rows = grid.height(),
            cols = grid.width(),
            merged = grid.merged().len(),
            "read worksheet"
        );
        Ok(grid)
    }

    /// Merged regions of a sheet; formats without merge metadata report none
    fn merged_regions(
        workbook: &mut Sheets<BufReader<File>>,
        sheet_name: &str,
    ) -> ScheduleResult<Vec<MergedRange>> {
        let dimensions: Vec<Dimensions> = match workbook {
            Sheets::Xlsx(xlsx) => {
                xlsx.load_merged_regions()
                    .map_err(|e| ScheduleError::Workbook(format!("Failed to load merged regions: {}", e)))?;
                xlsx.worksheet_merge_cells(sheet_name)
                    .unwrap_or(Ok(Vec::new()))
                    .map_err(|e| ScheduleError::Workbook(format!("Failed to read merged regions: {}", e)))?
            }
            Sheets::Xls(xls) => xls.worksheet_merge_cells(sheet_name).unwrap_or_default(),
            _ => Vec::new(),
        };

        Ok(dimensions
            .iter()
            .map(|dim| {
                MergedRange::new(
                    dim.start.0 as usize,
                    dim.start.1 as usize,
                    dim.end.0 as usize,
                    dim.end.1 as usize,
                )
            })
            .collect())
    }

    /// Expand a calamine range into absolute coordinates starting at (0, 0).
    ///
    /// calamine trims leading empty rows/columns from the range, while every
    /// layout offset is expressed against the sheet origin.
    fn grid_from_range(range: &Range<Data>) -> RawGrid {
        let Some((end_row, end_col)) = range.end() else {
            return RawGrid::default();
        };

        let rows = (0..=end_row)
            .map(|row| {
                (0..=end_col)
                    .map(|col| {
                        range
                            .get_value((row, col))
                            .map(convert_cell)
                            .unwrap_or(Cell::Empty)
                    })
                    .collect()
            })
            .collect();
        RawGrid::new(rows)
    }
}

/// Convert a calamine value to a grid cell
pub fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::DateTime(value),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Cell::DateTime)
            .unwrap_or_else(|_| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}
