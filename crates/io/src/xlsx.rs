// Excel file import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import reads the first worksheet's values into a `Grid`; formatting and
// formulas are not carried. Export writes a fresh single-sheet workbook.
//
// Lossy mapping: error values (`#N/A`, `#DIV/0!`, ...) and ISO date/duration
// values come back as `Cell::Literal` and are exported as plain text, so an
// `#N/A` error cell becomes the string "#N/A" in the output.

use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use prodnorm_matcher::{Cell, Grid};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, XlsxError};

use crate::error::IoError;

/// Number format applied to exported date-time serials.
pub const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel's sheet limits (1-indexed maxima).
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Result of an export operation
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Non-blank cells written
    pub cells_exported: usize,
    /// Total export duration in milliseconds
    pub export_duration_ms: u128,
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Literal(s.clone()),
        Data::Error(e) => Cell::Literal(e.to_string()),
    }
}

/// Read the first worksheet of a workbook.
///
/// Row and column numbers match the sheet: a used range starting below or
/// right of A1 keeps its leading blank rows and columns.
pub fn read_first_sheet(path: &Path) -> Result<Grid, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| IoError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IoError::NoSheets(path.to_path_buf()))?
        .map_err(|e| IoError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut grid = Grid::new();
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Ok(grid);
    }

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, data) in row.iter().enumerate() {
            grid.set(
                start_row as usize + row_idx + 1,
                start_col as usize + col_idx + 1,
                cell_from_data(data),
            );
        }
    }

    log::info!(
        "read {}x{} cells from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}

/// Write `grid` as a new single-sheet xlsx workbook.
pub fn write_grid(grid: &Grid, path: &Path) -> Result<ExportResult, IoError> {
    let start_time = Instant::now();
    let write_err = |e: XlsxError| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if grid.rows() > MAX_ROWS || grid.cols() > MAX_COLS {
        return Err(IoError::Write {
            path: path.to_path_buf(),
            reason: format!("{}x{} exceeds the xlsx sheet limits", grid.rows(), grid.cols()),
        });
    }

    let mut result = ExportResult::default();
    let mut xlsx_workbook = XlsxWorkbook::new();
    let date_format = Format::new().set_num_format(DATE_TIME_FORMAT);
    let worksheet = xlsx_workbook.add_worksheet();

    for (row, col, cell) in grid.iter() {
        // rust_xlsxwriter uses 0-based row/col as u32/u16
        let row32 = (row - 1) as u32;
        let col16 = (col - 1) as u16;
        match cell {
            Cell::Empty => continue,
            Cell::Text(s) | Cell::Literal(s) => {
                worksheet.write_string(row32, col16, s).map_err(write_err)?;
            }
            Cell::Number(n) => {
                worksheet.write_number(row32, col16, *n).map_err(write_err)?;
            }
            Cell::Bool(b) => {
                worksheet.write_boolean(row32, col16, *b).map_err(write_err)?;
            }
            Cell::DateTime(serial) => {
                worksheet
                    .write_number_with_format(row32, col16, *serial, &date_format)
                    .map_err(write_err)?;
            }
        }
        result.cells_exported += 1;
    }

    xlsx_workbook.save(path).map_err(write_err)?;

    result.export_duration_ms = start_time.elapsed().as_millis();
    log::info!(
        "wrote {} cells to {} in {}ms",
        result.cells_exported,
        path.display(),
        result.export_duration_ms
    );
    Ok(result)
}
