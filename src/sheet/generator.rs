//! Spreadsheet generator: JSON bytes → single-sheet .ods / .xlsx bytes

use super::format::{check_sheet_name, SheetFormat};
use super::layout::lay_out;
use super::ods::write_ods;
use super::xlsx::write_xlsx;
use crate::error::PkgsheetResult;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the only worksheet unless overridden
pub const DEFAULT_SHEET_NAME: &str = "Sheet 1";

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub sheet_name: String,
    pub format: SheetFormat,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            format: SheetFormat::default(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_format(format: SheetFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Turns JSON documents into in-memory spreadsheet documents
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetGenerator {
    options: GeneratorOptions,
}

impl SpreadsheetGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Parse `data` as JSON and serialize it as a one-sheet document
    pub fn generate(&self, data: &[u8]) -> PkgsheetResult<Vec<u8>> {
        let value: Value = serde_json::from_slice(data)?;
        self.generate_value(&value)
    }

    /// Same as [`generate`](Self::generate) for an already parsed value
    pub fn generate_value(&self, value: &Value) -> PkgsheetResult<Vec<u8>> {
        let (shape, grid) = lay_out(value)?;
        check_sheet_name(&self.options.sheet_name)?;
        debug!(
            ?shape,
            format = ?self.options.format,
            sheet = %self.options.sheet_name,
            rows = grid.height(),
            cols = grid.width(),
            "generating spreadsheet"
        );

        // Ordered sheet-name → content mapping with a single entry
        let book = [(self.options.sheet_name.as_str(), &grid)];
        let bytes = match self.options.format {
            SheetFormat::Ods => write_ods(&book)?,
            SheetFormat::Xlsx => write_xlsx(&book)?,
        };
        debug!(bytes = bytes.len(), "spreadsheet serialized");
        Ok(bytes)
    }

    /// Generate and write the document to `output_path`
    pub fn generate_to_path(&self, data: &[u8], output_path: &Path) -> PkgsheetResult<()> {
        let bytes = self.generate(data)?;
        fs::write(output_path, bytes)?;
        Ok(())
    }
}

/// Generate an .ods document named "Sheet 1"
pub fn generate(data: &[u8]) -> PkgsheetResult<Vec<u8>> {
    SpreadsheetGenerator::new().generate(data)
}
