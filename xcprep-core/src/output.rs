//! Patch report output helpers.

use std::io::Write;

use anyhow::Result;

use crate::patch::PatchedBundle;

/// Write the report as a prettified JSON array.
pub fn write_json_pretty(report: &[PatchedBundle], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

/// Write the report as newline-delimited JSON (NDJSON).
pub fn write_ndjson(report: &[PatchedBundle], mut w: impl Write) -> Result<()> {
    for item in report {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}
