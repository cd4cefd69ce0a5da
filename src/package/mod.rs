//! Installed-package lookups
//!
//! - `PackageName`: ASCII name with separator/case normalization
//! - `PackageRegistry`: where distribution metadata comes from
//! - `PackagePresenceChecker`: boolean presence checks over a registry

mod cargo;
mod checker;
mod dist_info;
mod name;
mod registry;

pub use cargo::CargoInstallRegistry;
pub use checker::{has_package, PackagePresenceChecker};
pub use dist_info::DistInfoRegistry;
pub use name::{normalize, PackageName};
pub use registry::{Distribution, MemoryRegistry, PackageRegistry};
