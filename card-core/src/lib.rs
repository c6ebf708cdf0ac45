//! Layout and model logic for printable math flashcards.
//!
//! Everything in this crate is pure: no file or image I/O. Rendering lives in
//! `card-render`, document assembly in `card-press`.

mod error;

pub mod card;
pub mod constants;
pub mod deck;
pub mod format;
pub mod generate;
pub mod geometry;
pub mod profile;
pub mod text;

pub use card::{Card, Difficulty, Operation, OperationKind, Operator, Style};
pub use deck::{DifficultyIndex, OrderScore};
pub use error::CardError;
pub use geometry::{Placement, Position, Region};
pub use profile::{BackTransform, PageProfile, Rotation, Slot};

/// Text colour used on the back face for a difficulty tier.
pub fn back_text_color(difficulty: Difficulty) -> &'static str {
    // One colour per tier; the unified style draws in blue.
    match difficulty {
        Difficulty::Easy => "#4F8BC6",
        Difficulty::Medium => "#59A96A",
        Difficulty::Hard => "#D94E4E",
        Difficulty::Standard => "#2967CA",
    }
}
