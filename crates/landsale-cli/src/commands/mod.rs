//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;
pub mod update;

use std::path::{Path, PathBuf};

use glob::glob;

use landsale_core::LandsaleConfig;

/// Load the configuration named on the command line, else the default file
/// if it exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LandsaleConfig> {
    if let Some(path) = config_path {
        return Ok(LandsaleConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(LandsaleConfig::from_file(&default_path)?)
    } else {
        Ok(LandsaleConfig::default())
    }
}

/// Expand `input` into OCR text files, sorted by path.
///
/// A directory yields its files with `extension`; anything else is a glob.
pub fn collect_inputs(input: &str, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let path = Path::new(input);

    let mut files: Vec<PathBuf> = if path.is_dir() {
        std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_extension(p, extension))
            .collect()
    } else {
        glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect()
    };

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Document id of an OCR text file: its file stem.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string()
}
