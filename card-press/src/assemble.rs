//! Deck assembly: ordered card images -> front/back page documents -> one
//! merged PDF per profile and style.

use std::fs;
use std::path::{Path, PathBuf};

use card_core::deck::{back_name_for, natural_cmp, order_fronts};
use card_core::{DifficultyIndex, PageProfile, Style};
use card_render::{compose_page, prepare_card, raster};
use tiny_skia::Pixmap;

use crate::config::ProjectPaths;
use crate::document::write_page_pdf;
use crate::merge::merge_files;
use crate::mirror::mirror_file;
use crate::PressError;

/// Removes the listed temporary documents when dropped.
struct TempFiles(Vec<PathBuf>);

impl TempFiles {
    fn track(&mut self, path: PathBuf) -> &Path {
        self.0.push(path);
        &self.0[self.0.len() - 1]
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        for path in &self.0 {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }
    }
}

/// Reads the first difficulty source that exists.
pub fn load_difficulty_index(paths: &ProjectPaths) -> DifficultyIndex {
    for candidate in paths.difficulty_sources() {
        match fs::read_to_string(&candidate) {
            Ok(text) => {
                log::debug!("deck order from {}", candidate.display());
                return DifficultyIndex::parse(&text);
            }
            Err(_) => continue,
        }
    }
    log::warn!("No operations or difficulty file found; keeping natural card order");
    DifficultyIndex::default()
}

/// PNG names in `dir`, naturally sorted.
fn card_image_names(dir: &Path) -> Result<Vec<String>, PressError> {
    if !dir.is_dir() {
        return Err(PressError::EmptyInput(format!(
            "card folder not found: {}",
            dir.display()
        )));
    }
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    if names.is_empty() {
        return Err(PressError::EmptyInput(format!(
            "no card images in {}",
            dir.display()
        )));
    }
    Ok(names)
}

/// Prepared cards in `names` order; a missing image stays `None` so the
/// cards after it keep their slots.
fn load_batch(
    dir: &Path,
    names: &[String],
    profile: PageProfile,
    back: bool,
) -> Result<Vec<(String, Option<Pixmap>)>, PressError> {
    let mut batch = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            log::warn!("{name} not found, leaving its slot empty");
            batch.push((name.clone(), None));
            continue;
        }
        let card = raster::load_png(&path)?;
        batch.push((name.clone(), Some(prepare_card(&card, profile, back)?)));
    }
    Ok(batch)
}

/// Builds `<pdf_dir>/<ProfileName>.pdf` from the card images of `style`.
pub fn assemble_deck(
    paths: &ProjectPaths,
    profile: PageProfile,
    style: Style,
) -> Result<PathBuf, PressError> {
    let cards_dir = paths.cards_dir(style);
    let names = card_image_names(&cards_dir)?;
    let index = load_difficulty_index(paths);
    let fronts = order_fronts(&names, &index);
    let backs: Vec<String> = fronts.iter().map(|n| back_name_for(n)).collect();

    let templates = paths.templates_dir();
    let front_template = raster::load_png(&templates.join(profile.front_template()))?;
    let back_template = raster::load_png(&templates.join(profile.back_template()))?;

    let pdf_dir = paths.pdf_dir(style);
    fs::create_dir_all(&pdf_dir)?;
    log::info!(
        "Generating PDF for {} {} cards ({})",
        profile.key(),
        style.folder_name(),
        cards_dir.display()
    );

    let per_page = profile.cards_per_page();
    let mut temps = TempFiles(Vec::new());
    for (page_idx, (front_chunk, back_chunk)) in fronts
        .chunks(per_page)
        .zip(backs.chunks(per_page))
        .enumerate()
    {
        let first = page_idx * per_page + 1;
        let last = page_idx * per_page + front_chunk.len();

        let front_batch = load_batch(&cards_dir, front_chunk, profile, false)?;
        let page = compose_page(&front_template, &front_batch, profile)?;
        let path = temps.track(pdf_dir.join(format!("temp_front_{first}_{last}.pdf")));
        write_page_pdf(&page, path)?;

        let back_batch = load_batch(&cards_dir, back_chunk, profile, true)?;
        let page = compose_page(&back_template, &back_batch, profile)?;
        let path = temps.track(pdf_dir.join(format!("temp_back_{first}_{last}.pdf")));
        write_page_pdf(&page, path)?;
        mirror_file(path)?;

        log::info!("Page {} generated", page_idx + 1);
    }

    log::info!("Merging pages...");
    let output = pdf_dir.join(format!("{}.pdf", profile.name()));
    let pages = merge_files(&temps.0, &output)?;
    log::info!("Final PDF ({pages} pages) created at {}", output.display());
    Ok(output)
}
