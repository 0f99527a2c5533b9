//! The per-tree patch operation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::descriptor::{patch_descriptor, TargetIds};
use crate::discovery::{discover_bundles, ProjectBundle};
use crate::schemes::{
    render_executable_scheme, render_no_targets, render_single_target, uses_dependency_layout,
    SchemeKind,
};

/// Inputs resolved once at the CLI boundary.
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Operator identity used for the per-user scheme-management path.
    pub user: String,
    /// Repository root substituted into executable schemes.
    pub repo_root: PathBuf,
    /// Bundle names that additionally receive a shared executable scheme.
    pub executables: HashSet<String>,
}

/// Report entry for one patched bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchedBundle {
    pub name: String,
    pub path: PathBuf,
    pub targets: TargetIds,
    pub scheme: SchemeKind,
    pub executable_scheme: Option<PathBuf>,
}

/// Patch every bundle under `root`.
///
/// The first failure aborts the walk; bundles patched before the failure stay
/// patched. The build system re-runs the whole tool on failure, so there is
/// no per-bundle rollback.
pub fn patch_tree(root: &Path, opts: &PatchOptions) -> Result<Vec<PatchedBundle>> {
    let bundles = discover_bundles(root)?;
    let mut report = Vec::with_capacity(bundles.len());

    for bundle in &bundles {
        let patched = patch_bundle(bundle, opts)
            .with_context(|| format!("patching {}", bundle.path.display()))?;
        report.push(patched);
    }

    Ok(report)
}

fn patch_bundle(bundle: &ProjectBundle, opts: &PatchOptions) -> Result<PatchedBundle> {
    let descriptor_path = bundle.descriptor_path();
    let text = fs::read_to_string(&descriptor_path)
        .with_context(|| format!("reading descriptor {}", descriptor_path.display()))?;

    let patched = patch_descriptor(&text)?;
    fs::write(&descriptor_path, patched.to_text())
        .with_context(|| format!("writing descriptor {}", descriptor_path.display()))?;

    let scheme = write_scheme_management(bundle, &patched.targets, &opts.user)?;

    let executable_scheme = if opts.executables.contains(&bundle.name) {
        Some(write_executable_scheme(bundle, &opts.repo_root)?)
    } else {
        None
    };

    Ok(PatchedBundle {
        name: bundle.name.clone(),
        path: bundle.path.clone(),
        targets: patched.targets,
        scheme,
        executable_scheme,
    })
}

fn write_scheme_management(
    bundle: &ProjectBundle,
    targets: &TargetIds,
    user: &str,
) -> Result<SchemeKind> {
    let path = bundle.scheme_management_path(user);

    // Freshly generated projects have no xcuserdata tree yet.
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating scheme directory {}", parent.display()))?;
    }

    let (kind, rendered) = if uses_dependency_layout(&path) {
        (SchemeKind::NoTargets, render_no_targets(&bundle.name, targets)?)
    } else {
        (
            SchemeKind::SingleTarget,
            render_single_target(&bundle.name, targets)?,
        )
    };

    fs::write(&path, rendered)
        .with_context(|| format!("writing scheme management {}", path.display()))?;
    Ok(kind)
}

fn write_executable_scheme(bundle: &ProjectBundle, repo_root: &Path) -> Result<PathBuf> {
    let dir = bundle.shared_schemes_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating shared schemes dir {}", dir.display()))?;

    let path = dir.join(format!("{}.xcscheme", bundle.name));
    fs::write(&path, render_executable_scheme(&bundle.name, repo_root))
        .with_context(|| format!("writing executable scheme {}", path.display()))?;
    Ok(path)
}
