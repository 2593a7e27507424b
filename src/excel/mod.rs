//! Excel import/export
//!
//! - Import: workbook (.xls, .xlsx, .xlsm, .xlsb, .ods) → dense `RawGrid`
//!   with merged regions
//! - Export: normalized result tables → .xlsx

mod exporter;
mod reader;

pub use exporter::ExcelExporter;
pub use reader::{convert_cell, WorkbookReader};
