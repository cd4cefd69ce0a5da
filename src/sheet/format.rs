//! Output formats and worksheet name rules

use crate::error::{PkgsheetError, PkgsheetResult};
use clap::ValueEnum;
use std::path::Path;

/// Longest worksheet name both formats accept
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Spreadsheet interchange format of the generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SheetFormat {
    /// OpenDocument spreadsheet (.ods)
    #[default]
    Ods,
    /// Office Open XML workbook (.xlsx)
    Xlsx,
}

impl SheetFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SheetFormat::Ods => "ods",
            SheetFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            SheetFormat::Ods => "application/vnd.oasis.opendocument.spreadsheet",
            SheetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Format named by a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ods" => Some(SheetFormat::Ods),
            "xlsx" => Some(SheetFormat::Xlsx),
            _ => None,
        }
    }
}

/// Reject names that either format would refuse or mangle
pub fn check_sheet_name(name: &str) -> PkgsheetResult<()> {
    let fail = |reason: &str| {
        Err(PkgsheetError::Serialization(format!(
            "Invalid worksheet name '{}': {}",
            name, reason
        )))
    };

    if name.is_empty() {
        return fail("name is blank");
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return fail("longer than 31 characters");
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return fail(&format!("contains '{}'", c));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return fail("starts or ends with an apostrophe");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_ods() {
        assert_eq!(SheetFormat::default(), SheetFormat::Ods);
        assert_eq!(SheetFormat::default().extension(), "ods");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SheetFormat::from_path(Path::new("a.ods")), Some(SheetFormat::Ods));
        assert_eq!(SheetFormat::from_path(Path::new("b.XLSX")), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::from_path(Path::new("c.csv")), None);
        assert_eq!(SheetFormat::from_path(Path::new("-")), None);
    }

    #[test]
    fn test_sheet_name_rules() {
        assert!(check_sheet_name("Sheet 1").is_ok());
        assert!(check_sheet_name("").is_err());
        assert!(check_sheet_name("bad[name]").is_err());
        assert!(check_sheet_name("a/b").is_err());
        assert!(check_sheet_name("'quoted'").is_err());
        assert!(check_sheet_name(&"x".repeat(32)).is_err());
        assert!(check_sheet_name(&"x".repeat(31)).is_ok());
    }
}
