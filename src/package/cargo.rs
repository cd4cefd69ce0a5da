//! Registry backed by Cargo's `.crates2.json` install tracking file

use super::name::PackageName;
use super::registry::{Distribution, PackageRegistry};
use crate::error::{PkgsheetError, PkgsheetResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

const CRATES_FILE: &str = ".crates2.json";

#[derive(Debug, Deserialize)]
struct CratesFile {
    #[serde(default)]
    installs: BTreeMap<String, InstallInfo>,
}

#[derive(Debug, Deserialize)]
struct InstallInfo {
    #[serde(default)]
    bins: Vec<String>,
}

/// Crates installed with `cargo install`
#[derive(Debug, Clone)]
pub struct CargoInstallRegistry {
    crates_file: PathBuf,
}

impl CargoInstallRegistry {
    /// Use the tracking file under an explicit Cargo home directory
    pub fn new(cargo_home: impl Into<PathBuf>) -> Self {
        Self {
            crates_file: cargo_home.into().join(CRATES_FILE),
        }
    }

    /// `$CARGO_HOME`, falling back to `$HOME/.cargo`
    pub fn from_env() -> PkgsheetResult<Self> {
        if let Some(home) = env::var_os("CARGO_HOME").filter(|v| !v.is_empty()) {
            return Ok(Self::new(home));
        }
        let home = env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                PkgsheetError::Registry("neither CARGO_HOME nor HOME is set".to_string())
            })?;
        Ok(Self::new(PathBuf::from(home).join(".cargo")))
    }

    pub fn crates_file(&self) -> &std::path::Path {
        &self.crates_file
    }

    fn load(&self) -> PkgsheetResult<Option<CratesFile>> {
        let text = match fs::read_to_string(&self.crates_file) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.crates_file.display(), "no install tracking file");
                return Ok(None);
            }
            Err(e) => {
                return Err(PkgsheetError::Registry(format!(
                    "Failed to read {}: {}",
                    self.crates_file.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&text).map(Some).map_err(|e| {
            PkgsheetError::Registry(format!(
                "Corrupt install tracking file {}: {}",
                self.crates_file.display(),
                e
            ))
        })
    }
}

/// Split `"ripgrep 14.1.0 (registry+https://...)"` into name and version
fn parse_install_key(key: &str) -> Option<(&str, Option<&str>)> {
    let mut parts = key.split_whitespace();
    let name = parts.next()?;
    let version = parts.next().filter(|v| !v.starts_with('('));
    Some((name, version))
}

impl PackageRegistry for CargoInstallRegistry {
    fn find_distribution(&self, name: &PackageName) -> PkgsheetResult<Option<Distribution>> {
        let Some(crates) = self.load()? else {
            return Ok(None);
        };

        for (key, info) in &crates.installs {
            let Some((crate_name, version)) = parse_install_key(key) else {
                continue;
            };
            if name.matches(crate_name) {
                debug!(package = %name, bins = ?info.bins, "crate installed");
                return Ok(Some(
                    Distribution::new(crate_name, version.map(str::to_string))
                        .with_location(self.crates_file.clone()),
                ));
            }
        }

        Ok(None)
    }

    fn describe(&self) -> String {
        format!("cargo [{}]", self.crates_file.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_install_key() {
        assert_eq!(
            parse_install_key("ripgrep 14.1.0 (registry+https://github.com/rust-lang/crates.io-index)"),
            Some(("ripgrep", Some("14.1.0")))
        );
        assert_eq!(
            parse_install_key("tool (path+file:///src/tool)"),
            Some(("tool", None))
        );
        assert_eq!(parse_install_key("   "), None);
    }
}
