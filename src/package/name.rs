//! Package names and their normalized form

use crate::error::{PkgsheetError, PkgsheetResult};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Runs of separators that compare equal (`foo_bar`, `foo.bar`, `foo--bar`)
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("separator pattern is valid"));

/// Characters that only appear in requirement strings like `requests>=2.0`
const REQUIREMENT_CHARS: &[char] = &['<', '>', '=', '!', '~', ';', '[', ']', '(', ')', ',', '@'];

/// A package name as given by the caller, plus its normalized lookup key
#[derive(Debug, Clone)]
pub struct PackageName {
    raw: String,
    normalized: String,
}

impl PackageName {
    /// Interpret `raw` as an ASCII package name
    pub fn new(raw: impl AsRef<[u8]>) -> PkgsheetResult<Self> {
        let bytes = raw.as_ref();

        if bytes.is_empty() {
            return Err(PkgsheetError::InvalidName(
                "package name is empty".to_string(),
            ));
        }

        if !bytes.is_ascii() {
            return Err(PkgsheetError::InvalidName(format!(
                "'{}' is not ASCII",
                String::from_utf8_lossy(bytes)
            )));
        }

        // ASCII is valid UTF-8
        let raw = String::from_utf8_lossy(bytes).into_owned();

        if let Some(bad) = raw
            .chars()
            .find(|c| c.is_ascii_whitespace() || c.is_ascii_control() || matches!(c, '/' | '\\'))
        {
            return Err(PkgsheetError::InvalidName(format!(
                "'{}' contains forbidden character {:?}",
                raw.escape_default(),
                bad
            )));
        }

        // Version pins, extras and environment markers belong to a requirement
        if let Some(bad) = raw.chars().find(|c| REQUIREMENT_CHARS.contains(c)) {
            return Err(PkgsheetError::InvalidName(format!(
                "'{}' looks like a requirement specifier, not a package name (found {:?})",
                raw, bad
            )));
        }

        let normalized = normalize(&raw);
        Ok(Self { raw, normalized })
    }

    /// The name exactly as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercased name with separator runs collapsed to `-`
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True if `other` names the same package once normalized
    pub fn matches(&self, other: &str) -> bool {
        normalize(other) == self.normalized
    }
}

impl PartialEq for PackageName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for PackageName {}

impl std::hash::Hash for PackageName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Lowercase and collapse `-`, `_` and `.` runs into a single `-`
pub fn normalize(name: &str) -> String {
    SEPARATOR_RUN.replace_all(name, "-").to_ascii_lowercase()
}
