//! Card stage: renders every card of the text file for one style.

use std::fs;
use std::path::Path;

use card_core::Style;
use card_core::format::parse_cards;
use card_render::{CardAssets, FaceCompositor};

use crate::PressError;
use crate::config::ProjectPaths;

pub fn card_assets(paths: &ProjectPaths) -> CardAssets {
    CardAssets {
        templates_dir: paths.templates_dir(),
        illustrations_dir: paths.pack_dir(),
        font_path: paths.font_path(),
    }
}

/// True when the style folder is missing or has no entries.
pub fn cards_missing(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Renders both faces of each card; a card that fails is logged and skipped.
/// Returns the number of cards written.
pub fn run_cards(paths: &ProjectPaths, style: Style) -> Result<usize, PressError> {
    let card_file = paths.card_file();
    if !card_file.is_file() {
        return Err(PressError::EmptyInput(format!(
            "card text file not found: {}",
            card_file.display()
        )));
    }
    let cards = parse_cards(&fs::read_to_string(&card_file)?);
    if cards.is_empty() {
        return Err(PressError::EmptyInput(format!(
            "no cards in {}",
            card_file.display()
        )));
    }

    let out_dir = paths.cards_dir(style);
    fs::create_dir_all(&out_dir)?;
    let compositor = FaceCompositor::new(card_assets(paths));

    let mut written = 0;
    for card in &cards {
        log::info!("Processing Card {}", card.index);
        match compositor.export(card, style, &out_dir) {
            Ok(_) => written += 1,
            Err(e) => log::error!("Card {} skipped: {e}", card.index),
        }
    }
    log::info!(
        "{written}/{} {} cards written to {}",
        cards.len(),
        style.folder_name(),
        out_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_absent_folder_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cards_missing(&dir.path().join("absent")));
        assert!(cards_missing(dir.path()));
        fs::write(dir.path().join("Card_1.png"), b"").unwrap();
        assert!(!cards_missing(dir.path()));
    }
}
