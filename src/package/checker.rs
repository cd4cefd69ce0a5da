//! Package presence checks against an injected registry

use super::name::PackageName;
use super::registry::{Distribution, PackageRegistry};
use crate::error::PkgsheetResult;
use tracing::debug;

/// Answers "is this package installed?" for one registry
#[derive(Debug, Clone)]
pub struct PackagePresenceChecker<R> {
    registry: R,
}

impl<R: PackageRegistry> PackagePresenceChecker<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// `Ok(false)` when the registry reports not-found.
    ///
    /// An invalid name or a failing registry is returned as an error,
    /// never as `false`.
    pub fn has_package(&self, name: impl AsRef<[u8]>) -> PkgsheetResult<bool> {
        Ok(self.distribution(name)?.is_some())
    }

    /// The matching distribution record, if installed
    pub fn distribution(&self, name: impl AsRef<[u8]>) -> PkgsheetResult<Option<Distribution>> {
        let name = PackageName::new(name)?;
        let found = self.registry.find_distribution(&name)?;
        debug!(
            package = %name,
            registry = %self.registry.describe(),
            installed = found.is_some(),
            "package lookup"
        );
        Ok(found)
    }
}

/// One-shot check without building a checker
pub fn has_package<R: PackageRegistry + ?Sized>(
    registry: &R,
    name: impl AsRef<[u8]>,
) -> PkgsheetResult<bool> {
    PackagePresenceChecker::new(registry).has_package(name)
}
