use crate::model::ArchiveAnalysisResult;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn render_json(results: &[ArchiveAnalysisResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

pub fn write_json(results: &[ArchiveAnalysisResult], path: &Path) -> Result<()> {
    let json = render_json(results)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
