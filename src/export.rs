//! Plain-text export of generated prompts

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::assembler::Level;
use crate::session::GeneratedPrompt;

/// `prompt-{Level name}-{YYYY-MM-DD}.txt`, e.g. `prompt-Expert-2026-03-07.txt`
pub fn export_filename(level: Level, date: NaiveDate) -> String {
    format!("prompt-{}-{}.txt", level.name(), date.format("%Y-%m-%d"))
}

/// Export file name using today's UTC date
pub fn export_filename_today(level: Level) -> String {
    export_filename(level, Utc::now().date_naive())
}

/// Write the prompt text into `dir`, returning the file path
pub fn export_prompt(dir: &Path, generated: &GeneratedPrompt) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_filename_today(generated.level));
    fs::write(&path, &generated.prompt)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Exported prompt to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_pads_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            export_filename(Level::Intermediate, date),
            "prompt-Intermediate-2026-03-07.txt"
        );
    }
}
