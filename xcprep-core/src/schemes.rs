//! Scheme template rendering.
//!
//! The three templates are fixed collaborators embedded at compile time.
//! Substitution is plain string replacement on the placeholder tokens; there
//! is deliberately no templating engine behind three static files.

use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::descriptor::TargetIds;

const SINGLE_TARGET_TEMPLATE: &str = include_str!("../templates/SingleTarget.plist");
const NO_TARGETS_TEMPLATE: &str = include_str!("../templates/NoTargets.plist");
const EXECUTABLE_TEMPLATE: &str = include_str!("../templates/ExecutableTarget.xcscheme");

/// Which scheme-management template a bundle received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemeKind {
    SingleTarget,
    NoTargets,
}

/// The inherited heuristic for choosing the no-targets template: a bundle
/// whose output path mentions "Dependencies" is a dependency project and gets
/// no runnable scheme. This is string containment on the path, nothing more;
/// kept in one place so it can be replaced wholesale.
pub fn uses_dependency_layout(path: &Path) -> bool {
    path.to_string_lossy().contains("Dependencies")
}

/// Render the scheme-management plist for a bundle's own target.
pub fn render_single_target(name: &str, ids: &TargetIds) -> Result<String> {
    let native = require_id(&ids.native, name, "native")?;
    Ok(SINGLE_TARGET_TEMPLATE
        .replace("{native_uuid}", native)
        .replace("{fbuild_target}", name))
}

/// Render the scheme-management plist for a dependency bundle, suppressing
/// autocreated schemes for both targets.
pub fn render_no_targets(name: &str, ids: &TargetIds) -> Result<String> {
    let native = require_id(&ids.native, name, "native")?;
    let legacy = require_id(&ids.legacy, name, "legacy")?;
    Ok(NO_TARGETS_TEMPLATE
        .replace("{native_uuid}", native)
        .replace("{fbuild_uuid}", legacy)
        .replace("{fbuild_target}", name))
}

/// Render a shared run-as-executable scheme for a bundle.
pub fn render_executable_scheme(name: &str, repo_root: &Path) -> String {
    EXECUTABLE_TEMPLATE
        .replace("{target}", name)
        .replace("{root}", &repo_root.to_string_lossy())
}

fn require_id<'a>(id: &'a Option<String>, name: &str, kind: &str) -> Result<&'a str> {
    id.as_deref()
        .ok_or_else(|| anyhow!("descriptor for {name} has no {kind} target id"))
}
