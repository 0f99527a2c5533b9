//! Project bundle discovery.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use walkdir::WalkDir;

/// Substring of a directory name that marks it as a project bundle.
pub const BUNDLE_MARKER: &str = ".xcodeproj";

/// One generated `.xcodeproj` bundle found under the search root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBundle {
    pub path: PathBuf,
    pub name: String,
}

impl ProjectBundle {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    /// The textual project descriptor inside the bundle.
    pub fn descriptor_path(&self) -> PathBuf {
        self.path.join("project.pbxproj")
    }

    /// Per-user scheme-management plist for the given operator identity.
    pub fn scheme_management_path(&self, user: &str) -> PathBuf {
        self.path
            .join("xcuserdata")
            .join(format!("{user}.xcuserdatad"))
            .join("xcschemes")
            .join("xcschememanagement.plist")
    }

    /// Directory holding shared executable schemes.
    pub fn shared_schemes_dir(&self) -> PathBuf {
        self.path.join("xcshareddata").join("xcschemes")
    }
}

/// Recursively collect every bundle under `root`, sorted by path.
///
/// Anything whose file name contains [`BUNDLE_MARKER`] counts as a bundle,
/// even a plain file (the descriptor read will then fail, which is the
/// desired fatal outcome for a tree in that state). Traversal does not
/// descend into bundle directories.
pub fn discover_bundles(root: &Path) -> Result<Vec<ProjectBundle>> {
    if !root.exists() {
        return Err(anyhow!("project root does not exist: {}", root.display()));
    }

    let mut bundles = Vec::new();
    let mut walker = WalkDir::new(root).into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        if is_bundle(entry.path()) {
            bundles.push(ProjectBundle::from_path(entry.path().to_path_buf()));
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
        }
    }

    bundles.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(bundles)
}

fn is_bundle(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.contains(BUNDLE_MARKER))
        .unwrap_or(false)
}
