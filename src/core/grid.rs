//! Dense pre-pass: materialize the structure a sheet only implies visually.
//!
//! Both steps run before any reshaping so the normalizers never see the
//! blanks left behind by merged regions or "label once per block" columns.

use crate::types::{Cell, RawGrid};

/// Copy every merged region's anchor value into all cells of its span.
///
/// Spans reaching past the grid are clipped. Regions with an empty anchor
/// are left alone.
pub fn fill_merged(grid: &mut RawGrid) {
    let ranges = grid.merged().to_vec();
    let (height, width) = (grid.height(), grid.width());

    for range in ranges.iter().filter(|r| !r.value.is_empty()) {
        for row in range.min_row..=range.max_row.min(height.saturating_sub(1)) {
            for col in range.min_col..=range.max_col.min(width.saturating_sub(1)) {
                grid.set(row, col, range.value.clone());
            }
        }
    }
}

/// Fill blank cells of `col` with the last non-blank value above them,
/// starting at `from_row`. Leading blanks stay blank.
pub fn forward_fill_column(grid: &mut RawGrid, col: usize, from_row: usize) {
    let mut last: Option<Cell> = None;
    for row in from_row..grid.height() {
        let cell = grid.cell(row, col);
        if cell.is_empty() {
            if let Some(value) = &last {
                grid.set(row, col, value.clone());
            }
        } else {
            last = Some(cell.clone());
        }
    }
}
