//! Asset archive appender.
//!
//! Assets for the rendering library are packed into one flat blob; the build
//! links the blob in and indexes into it with generated offset/size
//! constants. Appending is the whole protocol: the pre-append archive length
//! is the new asset's start offset.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// One appended region of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub ident: String,
    pub start: u64,
    pub size: u64,
}

impl ArchiveEntry {
    /// Three-line C fragment declaring the region, ready for a generated
    /// header.
    pub fn declaration(&self) -> String {
        format!(
            "// {}\nstatic const uint32_t {}Start = {};\nstatic const uint32_t {}Size = {};",
            self.file_name, self.ident, self.start, self.ident, self.size
        )
    }
}

/// Append `input` to `archive` (creating it if absent) and describe the
/// appended region.
pub fn append_archive(archive: &Path, input: &Path) -> Result<ArchiveEntry> {
    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(archive)
        .with_context(|| format!("opening archive {}", archive.display()))?;

    let start = file
        .metadata()
        .with_context(|| format!("inspecting archive {}", archive.display()))?
        .len();

    file.write_all(&data)
        .with_context(|| format!("appending to archive {}", archive.display()))?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());

    Ok(ArchiveEntry {
        ident: identifier_for(input),
        file_name,
        start,
        size: data.len() as u64,
    })
}

/// Derive a C identifier from the input's file stem.
fn identifier_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut ident: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident
}
