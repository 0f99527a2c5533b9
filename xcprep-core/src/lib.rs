//! xcprep-core: build-time normalization of generated Xcode projects.
//!
//! The project generator this tooling serves emits `.xcodeproj` bundles that
//! are close to usable but not quite: bare values in the `project.pbxproj`
//! descriptor are unquoted, the warning-related build settings are missing,
//! and no schemes exist, so the IDE invents its own on first open. This crate
//! walks a tree of generated bundles and fixes all of that in one pass:
//!
//! - [`discovery`] finds `.xcodeproj` bundles under a root directory;
//! - [`descriptor`] rewrites each `project.pbxproj` (value quoting, warning
//!   settings, target-id capture);
//! - [`schemes`] renders scheme-management plists and shared executable
//!   schemes from fixed templates;
//! - [`patch`] ties the above together into the per-tree patch operation;
//! - [`output`] serializes the patch report as JSON/NDJSON.
//!
//! Two small asset-embedding helpers for the rendering library's build ride
//! along: [`archive`] grows a packed asset blob and reports the appended
//! slice as a C declaration, [`shader`] turns GLSL source into a C raw-string
//! literal with `#version` stripped.
//!
//! Everything is synchronous and single-pass. Runs are expected to either
//! complete or fail outright; a failed run is simply re-run by the build
//! system, so there is no rollback or atomic-replace machinery.

pub mod archive;
pub mod descriptor;
pub mod discovery;
pub mod output;
pub mod patch;
pub mod schemes;
pub mod shader;
