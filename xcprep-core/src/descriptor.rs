//! Descriptor (`project.pbxproj`) patching.
//!
//! The descriptor is rewritten in a single line-by-line pass driven by a
//! small scan-state machine. Three things happen along the way: bare
//! right-hand-side values are quoted, the warning build settings are inserted
//! into the first two build configurations, and the legacy/native target ids
//! are captured for the scheme templates.

use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Warning-related build settings injected into every configuration.
pub const WARNING_SETTINGS: [&str; 25] = [
    "            CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING = YES;",
    "            CLANG_WARN_BOOL_CONVERSION = YES;",
    "            CLANG_WARN_COMMA = YES;",
    "            CLANG_WARN_CONSTANT_CONVERSION = YES;",
    "            CLANG_WARN_EMPTY_BODY = YES;",
    "            CLANG_WARN_ENUM_CONVERSION = YES;",
    "            CLANG_WARN_INFINITE_RECURSION = YES;",
    "            CLANG_WARN_INT_CONVERSION = YES;",
    "            CLANG_WARN_NON_LITERAL_NULL_CONVERSION = YES;",
    "            CLANG_WARN_OBJC_LITERAL_CONVERSION = YES;",
    "            CLANG_WARN_RANGE_LOOP_ANALYSIS = YES;",
    "            CLANG_WARN_STRICT_PROTOTYPES = YES;",
    "            CLANG_WARN_SUSPICIOUS_MOVE = YES;",
    "            CLANG_WARN_UNREACHABLE_CODE = YES;",
    "            CLANG_WARN__DUPLICATE_METHOD_MATCH = YES;",
    "            ENABLE_STRICT_OBJC_MSGSEND = YES;",
    "            ENABLE_TESTABILITY = YES;",
    "            GCC_NO_COMMON_BLOCKS = YES;",
    "            GCC_WARN_64_TO_32_BIT_CONVERSION = YES;",
    "            GCC_WARN_ABOUT_RETURN_TYPE = YES;",
    "            GCC_WARN_UNDECLARED_SELECTOR = YES;",
    "            GCC_WARN_UNINITIALIZED_AUTOS = YES;",
    "            GCC_WARN_UNUSED_FUNCTION = YES;",
    "            GCC_WARN_UNUSED_VARIABLE = YES;",
    "            ONLY_ACTIVE_ARCH = YES;",
];

static BARE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"= ([A-Za-z0-9/+_.-]+)([\s;])").expect("bare-value regex"));

static TARGET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]{24}) /\*.*\*/ = \{").expect("target-id regex"));

/// Target identifiers captured while scanning a descriptor.
///
/// Either may stay unset when the corresponding section is absent; the scheme
/// renderers fail later if a template actually needs the missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetIds {
    pub legacy: Option<String>,
    pub native: Option<String>,
}

/// Result of one descriptor pass: the rebuilt lines plus captured ids.
#[derive(Debug, Clone)]
pub struct PatchedDescriptor {
    pub lines: Vec<String>,
    pub targets: TargetIds,
}

impl PatchedDescriptor {
    /// Newline-joined descriptor text. No trailing newline beyond the join.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    LegacyTarget,
    NativeTarget,
    DebugConfig,
    ReleaseConfig,
}

/// Quote a bare `= value` right-hand side, preserving the trailing delimiter.
///
/// Already-quoted values do not match the pattern, so applying this twice is
/// the same as applying it once.
pub fn quote_bare_values(line: &str) -> String {
    BARE_VALUE.replace_all(line, "= \"$1\"$2").into_owned()
}

/// Rewrite one descriptor and capture its target ids.
///
/// The insertion of [`WARNING_SETTINGS`] is intentionally not guarded by an
/// already-patched marker: running the patch twice against the same file
/// duplicates the blocks, matching the tool's one-shot-per-generation
/// contract.
pub fn patch_descriptor(text: &str) -> Result<PatchedDescriptor> {
    let mut out = Vec::new();
    let mut targets = TargetIds::default();
    let mut state = ScanState::Idle;

    for raw in text.lines() {
        let line = quote_bare_values(raw);
        out.push(line.clone());

        match state {
            ScanState::LegacyTarget => {
                targets.legacy = Some(capture_target_id(&line)?);
                state = ScanState::Idle;
            }
            ScanState::NativeTarget => {
                targets.native = Some(capture_target_id(&line)?);
                state = ScanState::Idle;
            }
            ScanState::DebugConfig if line.contains("buildSettings") => {
                out.extend(WARNING_SETTINGS.iter().map(|s| s.to_string()));
                state = ScanState::ReleaseConfig;
            }
            ScanState::ReleaseConfig if line.contains("buildSettings") => {
                out.extend(WARNING_SETTINGS.iter().map(|s| s.to_string()));
                state = ScanState::Idle;
            }
            _ => {
                if line.contains("Begin PBXLegacyTarget section") {
                    state = ScanState::LegacyTarget;
                } else if line.contains("Begin PBXNativeTarget section") {
                    state = ScanState::NativeTarget;
                } else if line.contains("Begin XCBuildConfiguration section") {
                    state = ScanState::DebugConfig;
                }
            }
        }
    }

    Ok(PatchedDescriptor {
        lines: out,
        targets,
    })
}

fn capture_target_id(line: &str) -> Result<String> {
    let captures = TARGET_ID
        .captures(line)
        .ok_or_else(|| anyhow!("malformed descriptor: expected a target id line, got: {line}"))?;
    Ok(captures[1].to_string())
}
