//! pkgsheet - installed-package checks and JSON → spreadsheet generation
//!
//! Two independent utilities:
//!
//! - [`package`]: report whether a package is installed, using an explicit
//!   [`PackageRegistry`] (site-directory metadata, Cargo installs, or memory)
//! - [`sheet`]: turn JSON text into a single-sheet OpenDocument `.ods`
//!   (or `.xlsx`) byte stream, and read it back
//!
//! # Example
//!
//! ```no_run
//! use pkgsheet::package::{DistInfoRegistry, PackagePresenceChecker};
//! use pkgsheet::sheet::SpreadsheetGenerator;
//!
//! let checker = PackagePresenceChecker::new(DistInfoRegistry::new(["/usr/lib/python3/dist-packages"]));
//! println!("requests installed: {}", checker.has_package("requests")?);
//!
//! let ods = SpreadsheetGenerator::new().generate(br#"[{"name": "ada", "age": 36}]"#)?;
//! println!("{} bytes", ods.len());
//! # Ok::<(), pkgsheet::error::PkgsheetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod package;
pub mod sheet;

// Re-export commonly used types
pub use error::{PkgsheetError, PkgsheetResult};
pub use package::{has_package, PackageName, PackagePresenceChecker, PackageRegistry};
pub use sheet::{generate, SheetReader, SpreadsheetGenerator};
