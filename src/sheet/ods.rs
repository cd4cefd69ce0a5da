//! .ods writer

use super::layout::{cell_ref, CellValue, SheetGrid};
use crate::error::{PkgsheetError, PkgsheetResult};
use spreadsheet_ods::{write_ods_buf, Sheet, WorkBook};

/// Serialize an ordered sheet-name → grid mapping as .ods bytes
pub(super) fn write_ods(book: &[(&str, &SheetGrid)]) -> PkgsheetResult<Vec<u8>> {
    let mut workbook = WorkBook::new_empty();

    for (sheet_name, grid) in book {
        let mut sheet = Sheet::new(*sheet_name);
        for (row, col, cell) in grid.cells() {
            let (ods_row, ods_col) = match (u32::try_from(row), u32::try_from(col)) {
                (Ok(r), Ok(c)) => (r, c),
                _ => {
                    return Err(PkgsheetError::Serialization(format!(
                        "Cell index out of range at {}",
                        cell_ref(row, col)
                    )))
                }
            };

            match cell {
                CellValue::Empty => {}
                CellValue::Bool(b) => sheet.set_value(ods_row, ods_col, *b),
                CellValue::Number(n) => sheet.set_value(ods_row, ods_col, *n),
                CellValue::Text(s) => sheet.set_value(ods_row, ods_col, s.as_str()),
            }
        }
        workbook.push_sheet(sheet);
    }

    write_ods_buf(&mut workbook, Vec::new())
        .map_err(|e| PkgsheetError::Serialization(format!("Failed to save workbook: {}", e)))
}
