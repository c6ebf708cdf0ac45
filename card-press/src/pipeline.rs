//! Stage orchestration: operations -> card images -> PDFs.

use std::path::PathBuf;

use crate::assemble::assemble_deck;
use crate::cards::{cards_missing, run_cards};
use crate::config::{RunConfig, Stages};
use crate::operations::run_operations;
use crate::PressError;

/// Requested stages, with earlier stages switched on when their output is
/// missing.
pub fn plan_stages(config: &RunConfig) -> Stages {
    let paths = config.paths();
    let mut stages = config.stages;

    if !stages.operations && !paths.card_file().is_file() {
        log::warn!(
            "Operations file missing at {}; forcing the operations stage",
            paths.card_file().display()
        );
        stages.operations = true;
    }

    if !stages.cards {
        for style in config.styles.requested() {
            if cards_missing(&paths.cards_dir(style)) {
                log::warn!("'{}' card images are missing", style.folder_name());
                stages.cards = true;
            }
        }
        if stages.cards {
            log::warn!("Forcing the card stage");
        }
    }
    stages
}

/// Runs the configured pipeline and returns the PDFs it produced. Stage
/// failures are logged and the run continues; a missing merge input aborts.
pub fn run(config: &RunConfig) -> Result<Vec<PathBuf>, PressError> {
    log::info!(
        "Flashcard pipeline started: {} / {}",
        config.asset_pack,
        config.operation
    );
    let paths = config.paths();
    let styles = config.styles.requested();
    let stages = plan_stages(config);

    if stages.operations {
        log::info!("Starting operations file generation");
        if let Err(e) = run_operations(config) {
            log::error!("Operations stage failed: {e}");
        }
    } else {
        log::info!("Skipping operations; found {}", paths.card_file().display());
    }

    if stages.cards {
        for &style in &styles {
            log::info!("Starting {} {} card generation", style.folder_name(), config.operation);
            if let Err(e) = run_cards(&paths, style) {
                log::error!("{} card stage failed: {e}", style.folder_name());
            }
        }
    } else {
        log::info!("Skipping card generation; images verified");
    }

    let mut outputs = Vec::new();
    if stages.pdf {
        log::info!("Starting PDF generation");
        for &size in &config.sizes {
            for &style in &styles {
                match assemble_deck(&paths, size, style) {
                    Ok(path) => outputs.push(path),
                    Err(e @ PressError::MissingArtifact(_)) => return Err(e),
                    Err(e) => log::error!(
                        "FAILED to generate {} {} PDF: {e}",
                        size,
                        style.folder_name()
                    ),
                }
            }
        }
    }
    log::info!("Pipeline finished, {} PDF(s) written", outputs.len());
    Ok(outputs)
}
