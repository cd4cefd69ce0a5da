//! Registry backed by `*.dist-info` / `*.egg-info` metadata directories

use super::name::{normalize, PackageName};
use super::registry::{Distribution, PackageRegistry};
use crate::error::{PkgsheetError, PkgsheetResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_INFO_SUFFIX: &str = ".egg-info";

/// Scans site directories in order; the first matching entry wins
#[derive(Debug, Clone)]
pub struct DistInfoRegistry {
    search_paths: Vec<PathBuf>,
}

impl DistInfoRegistry {
    pub fn new<I, P>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn scan_dir(&self, dir: &Path, name: &PackageName) -> PkgsheetResult<Option<Distribution>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "search path does not exist, skipping");
                return Ok(None);
            }
            Err(e) => {
                return Err(PkgsheetError::Registry(format!(
                    "Failed to read {}: {}",
                    dir.display(),
                    e
                )))
            }
        };

        // read_dir order is unspecified; sort so lookups are repeatable
        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                PkgsheetError::Registry(format!("Failed to read {}: {}", dir.display(), e))
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if let Some(entry) = MetadataEntry::parse(&file_name, entry.path()) {
                if entry.project_key == name.normalized() {
                    candidates.push(entry);
                }
            }
        }
        candidates.sort_by(|a, b| a.path.cmp(&b.path));

        match candidates.into_iter().next() {
            Some(entry) => {
                trace!(path = %entry.path.display(), "matched metadata entry");
                entry.load().map(Some)
            }
            None => Ok(None),
        }
    }
}

impl PackageRegistry for DistInfoRegistry {
    fn find_distribution(&self, name: &PackageName) -> PkgsheetResult<Option<Distribution>> {
        for dir in &self.search_paths {
            if let Some(dist) = self.scan_dir(dir, name)? {
                debug!(package = %name, dir = %dir.display(), "distribution found");
                return Ok(Some(dist));
            }
        }
        debug!(package = %name, "distribution not found");
        Ok(None)
    }

    fn describe(&self) -> String {
        let paths: Vec<String> = self
            .search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        format!("dist-info [{}]", paths.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    DistInfo,
    EggInfo,
}

/// A directory entry that looks like distribution metadata
#[derive(Debug)]
struct MetadataEntry {
    kind: EntryKind,
    path: PathBuf,
    project_key: String,
    dir_name: String,
    dir_version: Option<String>,
}

impl MetadataEntry {
    fn parse(file_name: &str, path: PathBuf) -> Option<Self> {
        let (kind, stem) = if let Some(stem) = file_name.strip_suffix(DIST_INFO_SUFFIX) {
            (EntryKind::DistInfo, stem)
        } else if let Some(stem) = file_name.strip_suffix(EGG_INFO_SUFFIX) {
            (EntryKind::EggInfo, stem)
        } else {
            return None;
        };

        let mut parts = stem.splitn(3, '-');
        let dir_name = parts.next().filter(|s| !s.is_empty())?.to_string();
        let dir_version = parts.next().filter(|s| !s.is_empty()).map(str::to_string);

        Some(Self {
            kind,
            path,
            project_key: normalize(&dir_name),
            dir_name,
            dir_version,
        })
    }

    fn metadata_path(&self) -> PathBuf {
        match self.kind {
            EntryKind::DistInfo => self.path.join("METADATA"),
            EntryKind::EggInfo if self.path.is_dir() => self.path.join("PKG-INFO"),
            EntryKind::EggInfo => self.path.clone(),
        }
    }

    fn load(self) -> PkgsheetResult<Distribution> {
        let metadata_path = self.metadata_path();
        let headers = match fs::read_to_string(&metadata_path) {
            Ok(text) => parse_metadata_headers(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %metadata_path.display(), "metadata file missing, using entry name");
                MetadataHeaders::default()
            }
            Err(e) => {
                return Err(PkgsheetError::Registry(format!(
                    "Failed to read {}: {}",
                    metadata_path.display(),
                    e
                )))
            }
        };

        let name = headers.name.unwrap_or(self.dir_name);
        let version = headers.version.or(self.dir_version);
        Ok(Distribution::new(name, version).with_location(self.path))
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct MetadataHeaders {
    name: Option<String>,
    version: Option<String>,
}

/// Read `Name:` and `Version:` from an RFC 822 style header block
fn parse_metadata_headers(text: &str) -> MetadataHeaders {
    let mut headers = MetadataHeaders::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "name" if headers.name.is_none() => headers.name = Some(value.to_string()),
            "version" if headers.version.is_none() => headers.version = Some(value.to_string()),
            _ => {}
        }
    }

    headers
}
