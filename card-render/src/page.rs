//! Page composition: cards scaled per profile and pasted into slots.

use card_core::PageProfile;
use tiny_skia::Pixmap;

use crate::raster;
use crate::RenderError;

/// Orients (backs only) and scales a card bitmap for `profile`.
pub fn prepare_card(
    card: &Pixmap,
    profile: PageProfile,
    back: bool,
) -> Result<Pixmap, RenderError> {
    if back {
        let oriented = raster::apply_back_transform(card, profile.back_transform())?;
        raster::scale(&oriented, profile.scale())
    } else {
        raster::scale(card, profile.scale())
    }
}

/// Pastes each prepared card into its slot on a copy of `template`. Entry i
/// always fills slot i; a `None` entry leaves its slot blank.
pub fn compose_page(
    template: &Pixmap,
    batch: &[(String, Option<Pixmap>)],
    profile: PageProfile,
) -> Result<Pixmap, RenderError> {
    let mut page = template.clone();
    for (i, (name, card)) in batch.iter().enumerate() {
        let slot = profile.slot(i).ok_or(RenderError::Overflow {
            capacity: profile.cards_per_page(),
            given: batch.len(),
        })?;
        let Some(card) = card else {
            log::debug!("{name} -> slot {i} left empty");
            continue;
        };
        let placed = raster::rotate(card, slot.rotation)?;
        log::debug!("{name} -> slot {i} at ({}, {})", slot.x, slot.y);
        raster::paste(&mut page, &placed, slot.x, slot.y);
    }
    Ok(page)
}
