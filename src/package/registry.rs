//! The registry seam and the in-memory registry

use super::name::PackageName;
use crate::error::PkgsheetResult;
use std::collections::HashMap;
use std::path::PathBuf;

/// An installed unit of package metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Name as recorded by the registry (not normalized)
    pub name: String,
    pub version: Option<String>,
    /// Where the metadata was found, if the registry is on disk
    pub location: Option<PathBuf>,
}

impl Distribution {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            location: None,
        }
    }

    pub fn with_location(mut self, location: PathBuf) -> Self {
        self.location = Some(location);
        self
    }
}

/// Source of installed-package metadata.
///
/// `Ok(None)` means the package is not installed. `Err` is reserved for
/// the registry itself being unusable.
pub trait PackageRegistry {
    fn find_distribution(&self, name: &PackageName) -> PkgsheetResult<Option<Distribution>>;

    /// Short human-readable description, used in logs and CLI output
    fn describe(&self) -> String;
}

impl<R: PackageRegistry + ?Sized> PackageRegistry for &R {
    fn find_distribution(&self, name: &PackageName) -> PkgsheetResult<Option<Distribution>> {
        (**self).find_distribution(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<R: PackageRegistry + ?Sized> PackageRegistry for Box<R> {
    fn find_distribution(&self, name: &PackageName) -> PkgsheetResult<Option<Distribution>> {
        (**self).find_distribution(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Registry held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    distributions: HashMap<String, Distribution>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, version: Option<&str>) -> Self {
        self.insert(Distribution::new(name, version.map(str::to_string)));
        self
    }

    pub fn insert(&mut self, distribution: Distribution) {
        let key = super::name::normalize(&distribution.name);
        self.distributions.insert(key, distribution);
    }

    pub fn remove(&mut self, name: &PackageName) -> Option<Distribution> {
        self.distributions.remove(name.normalized())
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}

impl PackageRegistry for MemoryRegistry {
    fn find_distribution(&self, name: &PackageName) -> PkgsheetResult<Option<Distribution>> {
        Ok(self.distributions.get(name.normalized()).cloned())
    }

    fn describe(&self) -> String {
        format!("memory ({} distributions)", self.distributions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_registry_lookup_is_normalized() {
        let registry = MemoryRegistry::new().with("Typing_Extensions", Some("4.12.2"));
        let name = PackageName::new("typing-extensions").unwrap();

        let dist = registry.find_distribution(&name).unwrap().unwrap();
        assert_eq!(dist.name, "Typing_Extensions");
        assert_eq!(dist.version.as_deref(), Some("4.12.2"));
    }

    #[test]
    fn test_memory_registry_remove() {
        let mut registry = MemoryRegistry::new().with("rich", None);
        let name = PackageName::new("Rich").unwrap();
        assert!(registry.remove(&name).is_some());
        assert!(registry.is_empty());
        assert_eq!(registry.find_distribution(&name).unwrap(), None);
    }

    #[test]
    fn test_boxed_registry_delegates() {
        let boxed: Box<dyn PackageRegistry> = Box::new(MemoryRegistry::new().with("a", None));
        let name = PackageName::new("A").unwrap();
        assert!(boxed.find_distribution(&name).unwrap().is_some());
        assert!(boxed.describe().starts_with("memory"));
    }
}
