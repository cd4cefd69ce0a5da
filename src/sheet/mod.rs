//! Spreadsheet generation and reading
//!
//! - Generate: JSON → single-sheet OpenDocument (.ods, default) or Excel (.xlsx) bytes
//! - Read: .ods / .xlsx bytes → grid / JSON rows / JSON records

mod format;
mod generator;
mod layout;
mod ods;
mod reader;
mod xlsx;

pub use format::{check_sheet_name, SheetFormat, MAX_SHEET_NAME_LEN};
pub use generator::{generate, GeneratorOptions, SpreadsheetGenerator, DEFAULT_SHEET_NAME};
pub use layout::{cell_ref, column_letter, lay_out, CellValue, SheetGrid, SheetShape, MAX_COLS, MAX_ROWS};
pub use reader::SheetReader;
