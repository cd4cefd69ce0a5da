//! .xlsx writer

use super::layout::{cell_ref, CellValue, SheetGrid};
use crate::error::{PkgsheetError, PkgsheetResult};
use rust_xlsxwriter::{Workbook, Worksheet};

/// Serialize an ordered sheet-name → grid mapping as .xlsx bytes
pub(super) fn write_xlsx(book: &[(&str, &SheetGrid)]) -> PkgsheetResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    for (sheet_name, grid) in book {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name).map_err(|e| {
            PkgsheetError::Serialization(format!(
                "Failed to set worksheet name '{}': {}",
                sheet_name, e
            ))
        })?;

        for (row, col, cell) in grid.cells() {
            write_cell(worksheet, row, col, cell)?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| PkgsheetError::Serialization(format!("Failed to save workbook: {}", e)))
}

/// Write a single non-empty cell
fn write_cell(
    worksheet: &mut Worksheet,
    row: usize,
    col: usize,
    cell: &CellValue,
) -> PkgsheetResult<()> {
    let position = || cell_ref(row, col);
    let xl_row = u32::try_from(row).map_err(|_| {
        PkgsheetError::Serialization(format!("Row index out of range at {}", position()))
    })?;
    let xl_col = u16::try_from(col).map_err(|_| {
        PkgsheetError::Serialization(format!("Column index out of range at {}", position()))
    })?;

    let result = match cell {
        CellValue::Empty => return Ok(()),
        CellValue::Bool(b) => worksheet.write_boolean(xl_row, xl_col, *b),
        CellValue::Number(n) => worksheet.write_number(xl_row, xl_col, *n),
        CellValue::Text(s) => worksheet.write_string(xl_row, xl_col, s),
    };

    result.map(|_| ()).map_err(|e| {
        PkgsheetError::Serialization(format!("Failed to write cell {}: {}", position(), e))
    })
}
