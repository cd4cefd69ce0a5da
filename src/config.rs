//! Registry configuration for the CLI

use crate::error::{PkgsheetError, PkgsheetResult};
use crate::package::{CargoInstallRegistry, DistInfoRegistry, PackageRegistry};
use clap::ValueEnum;
use std::path::PathBuf;

/// Env var holding the dist-info search path (OS path-list syntax)
pub const PATH_ENV: &str = "PKGSHEET_PATH";

/// Env var holding the tracing filter
pub const LOG_ENV: &str = "PKGSHEET_LOG";

/// Which installed-package registry to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RegistryKind {
    /// `*.dist-info` / `*.egg-info` entries in site directories
    #[default]
    DistInfo,
    /// Crates installed with `cargo install`
    Cargo,
}

/// Registry selection and search paths
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub kind: RegistryKind,
    pub paths: Vec<PathBuf>,
}

impl RegistryConfig {
    pub fn new(kind: RegistryKind, paths: Vec<PathBuf>) -> Self {
        Self { kind, paths }
    }

    /// Build the configured registry
    pub fn build(&self) -> PkgsheetResult<Box<dyn PackageRegistry>> {
        match self.kind {
            RegistryKind::DistInfo => {
                if self.paths.is_empty() {
                    return Err(PkgsheetError::Registry(format!(
                        "no search paths given (use --path or set {})",
                        PATH_ENV
                    )));
                }
                Ok(Box::new(DistInfoRegistry::new(self.paths.clone())))
            }
            RegistryKind::Cargo => match self.paths.first() {
                Some(cargo_home) => Ok(Box::new(CargoInstallRegistry::new(cargo_home.clone()))),
                None => Ok(Box::new(CargoInstallRegistry::from_env()?)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_info_requires_paths() {
        let err = RegistryConfig::default().build().err().unwrap();
        assert!(err.to_string().contains(PATH_ENV));
    }

    #[test]
    fn test_dist_info_describes_paths() {
        let config = RegistryConfig::new(RegistryKind::DistInfo, vec![PathBuf::from("/opt/site")]);
        let registry = config.build().unwrap();
        assert!(registry.describe().contains("/opt/site"));
    }

    #[test]
    fn test_cargo_with_explicit_home() {
        let config = RegistryConfig::new(RegistryKind::Cargo, vec![PathBuf::from("/opt/cargo")]);
        let registry = config.build().unwrap();
        assert!(registry.describe().contains(".crates2.json"));
    }
}
