//! Operations stage: writes the card text file for the configured pack.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use card_core::format::write_block;
use card_core::generate::generate_cards;

use crate::PressError;
use crate::config::RunConfig;

/// Illustration names (file stems of the pack's PNGs), sorted.
pub fn scan_assets(dir: &Path) -> Result<Vec<String>, PressError> {
    if !dir.is_dir() {
        return Err(PressError::EmptyInput(format!(
            "asset folder not found: {}",
            dir.display()
        )));
    }
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")))
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();
    names.sort();
    if names.is_empty() {
        return Err(PressError::EmptyInput(format!("no PNG assets in {}", dir.display())));
    }
    Ok(names)
}

/// Singular -> plural map. A missing file yields an empty map.
pub fn load_plurals(path: &Path) -> Result<HashMap<String, String>, PressError> {
    if !path.is_file() {
        log::debug!("no plural map at {}", path.display());
        return Ok(HashMap::new());
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn run_operations(config: &RunConfig) -> Result<PathBuf, PressError> {
    let paths = config.paths();
    let assets = scan_assets(&paths.pack_dir())?;
    let plurals_path = config.plurals.clone().unwrap_or_else(|| paths.plurals_path());
    let plurals = load_plurals(&plurals_path)?;

    let cards = generate_cards(config.operation, &assets, &plurals, config.seed);
    let text: String = cards.iter().map(write_block).collect();

    let out = paths.card_file();
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out, text)?;
    log::info!(
        "Wrote {} {} cards from {} assets to {}",
        cards.len(),
        config.operation,
        assets.len(),
        out.display()
    );
    Ok(out)
}
