use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.debtpace`, or `$DEBTPACE_HOME` when set.
pub fn debtpace_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("DEBTPACE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".debtpace"))
}

pub fn ensure_debtpace_home() -> Result<PathBuf> {
    let dir = debtpace_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
