//! Read path: .ods / .xlsx bytes → grids and JSON

use super::format::SheetFormat;
use super::layout::{CellValue, SheetGrid};
use crate::error::{PkgsheetError, PkgsheetResult};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use serde_json::{Map, Value};
use std::io::Cursor;
use std::path::Path;

/// Workbook opened from an in-memory byte stream; the format is detected
pub struct SheetReader {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl SheetReader {
    pub fn from_bytes(bytes: &[u8]) -> PkgsheetResult<Self> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| PkgsheetError::Read(format!("Failed to open workbook: {}", e)))?;
        Ok(Self { workbook })
    }

    /// Detected format, if it is one the generator writes
    pub fn format(&self) -> Option<SheetFormat> {
        match self.workbook {
            Sheets::Ods(_) => Some(SheetFormat::Ods),
            Sheets::Xlsx(_) => Some(SheetFormat::Xlsx),
            _ => None,
        }
    }

    pub fn open(path: &Path) -> PkgsheetResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Worksheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Cells at their absolute positions, leading blanks kept
    pub fn read_grid(&mut self, sheet_name: &str) -> PkgsheetResult<SheetGrid> {
        let range = self.workbook.worksheet_range(sheet_name).map_err(|e| {
            PkgsheetError::Read(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;
        Ok(range_to_grid(&range))
    }

    /// Array of row arrays, blanks as `null`
    pub fn read_rows(&mut self, sheet_name: &str) -> PkgsheetResult<Value> {
        Ok(self.read_grid(sheet_name)?.to_json_rows())
    }

    /// First row as header, one object per following row; blanks omitted
    pub fn read_records(&mut self, sheet_name: &str) -> PkgsheetResult<Value> {
        let grid = self.read_grid(sheet_name)?;
        let Some((header, body)) = grid.rows().split_first() else {
            return Ok(Value::Array(Vec::new()));
        };

        let keys: Vec<String> = (0..grid.width())
            .map(|col| {
                header
                    .get(col)
                    .and_then(CellValue::to_label)
                    .unwrap_or_else(|| format!("col_{}", col))
            })
            .collect();

        let records = body
            .iter()
            .map(|row| {
                let record: Map<String, Value> = row
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| !cell.is_empty())
                    .map(|(col, cell)| (keys[col].clone(), cell.to_json()))
                    .collect();
                Value::Object(record)
            })
            .collect();

        Ok(Value::Array(records))
    }
}

fn range_to_grid(range: &Range<Data>) -> SheetGrid {
    let Some((start_row, start_col)) = range.start() else {
        return SheetGrid::default();
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(data_to_cell));
        rows.push(cells);
    }

    SheetGrid::new(rows)
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        // Dates, durations and error cells come back as their display text
        other => CellValue::Text(other.to_string()),
    }
}
