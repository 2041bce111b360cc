//! Preset files: one serialized parameter snapshot, stored as JSON.
//!
//! Keys are the stable parameter keys (`threshold`, `ratio`, `attack`,
//! `release`, `makeupgain`, `bypass`). Out-of-range values are clamped
//! when the snapshot is applied, so hand-edited files stay safe.

use anyhow::Context;
use compresor_core::ParamSnapshot;
use std::path::Path;

/// Load a preset from a JSON file.
pub fn load(path: &Path) -> anyhow::Result<ParamSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading preset {}", path.display()))?;
    let snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("parsing preset {}", path.display()))?;
    Ok(snapshot)
}

/// Save a preset to a JSON file.
pub fn save(path: &Path, snapshot: &ParamSnapshot) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).with_context(|| format!("writing preset {}", path.display()))?;
    Ok(())
}
