use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CardError;

/// Rotation applied to a card bitmap before it is pasted into a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    None,
    /// 90° counter-clockwise; width and height swap.
    Quarter,
    Half,
}

/// Pre-transform for back faces so a sheet flipped along its short edge
/// lines up with the fronts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackTransform {
    Rotate180,
    FlipVerticalThenRotate180,
}

/// Where one card lands on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

/// The three A4 layouts. Offsets are page-template pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageProfile {
    Small,
    Medium,
    Large,
}

const SMALL_SHIFTS: [i32; 5] = [306, 2324, 4337, 324, 3675];

impl PageProfile {
    pub const ALL: [PageProfile; 3] = [PageProfile::Small, PageProfile::Medium, PageProfile::Large];

    /// Size key as used in configuration (`Small`, `Medium`, `Large`).
    pub fn key(self) -> &'static str {
        match self {
            PageProfile::Small => "Small",
            PageProfile::Medium => "Medium",
            PageProfile::Large => "Large",
        }
    }

    /// Output document stem.
    pub fn name(self) -> &'static str {
        match self {
            PageProfile::Small => "A4_Small",
            PageProfile::Medium => "A4_Medium",
            PageProfile::Large => "A4_Large",
        }
    }

    /// Uniform scale applied to every card bitmap.
    pub fn scale(self) -> f32 {
        match self {
            PageProfile::Small => 0.4087,
            PageProfile::Medium => 0.5101,
            PageProfile::Large => 0.5792,
        }
    }

    pub fn cards_per_page(self) -> usize {
        match self {
            PageProfile::Small => 5,
            PageProfile::Medium => 4,
            PageProfile::Large => 2,
        }
    }

    pub fn front_template(self) -> &'static str {
        match self {
            PageProfile::Small => "A4_Page_Small.png",
            PageProfile::Medium => "A4_Page_Medium.png",
            PageProfile::Large => "A4_Page_Large.png",
        }
    }

    pub fn back_template(self) -> &'static str {
        match self {
            PageProfile::Small => "A4_Page_Small_Back.png",
            PageProfile::Medium => "A4_Page_Medium.png",
            PageProfile::Large => "A4_Page_Large.png",
        }
    }

    pub fn back_transform(self) -> BackTransform {
        match self {
            PageProfile::Large => BackTransform::Rotate180,
            PageProfile::Small | PageProfile::Medium => BackTransform::FlipVerticalThenRotate180,
        }
    }

    /// Slot for the `index`-th card of a page, `None` past the page capacity.
    pub fn slot(self, index: usize) -> Option<Slot> {
        if index >= self.cards_per_page() {
            return None;
        }
        let slot = match self {
            PageProfile::Large => Slot {
                x: 627,
                y: if index == 0 { 505 } else { 3516 },
                rotation: Rotation::Quarter,
            },
            PageProfile::Medium => Slot {
                x: if index % 2 == 0 { 175 } else { 2262 },
                y: if index / 2 == 0 { 259 } else { 3195 },
                rotation: Rotation::None,
            },
            PageProfile::Small if index < 3 => Slot {
                x: 178,
                y: SMALL_SHIFTS[index],
                rotation: Rotation::Quarter,
            },
            PageProfile::Small => Slot {
                x: 2668,
                y: SMALL_SHIFTS[index],
                rotation: Rotation::None,
            },
        };
        Some(slot)
    }
}

impl FromStr for PageProfile {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Small" => Ok(PageProfile::Small),
            "Medium" => Ok(PageProfile::Medium),
            "Large" => Ok(PageProfile::Large),
            other => Err(CardError::Configuration(format!(
                "invalid size {other:?}; choose Large, Medium, or Small"
            ))),
        }
    }
}

impl fmt::Display for PageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
