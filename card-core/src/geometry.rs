use serde::{Deserialize, Serialize};

use crate::constants::{
    BOX_AREA_HEIGHT, BOX_AREA_WIDTH, FRAME_BOTTOM_Y, FRAME_TOP_Y, MAX_IMAGES_PER_ROW,
    TEMPLATE_WIDTH, VERTICAL_SHIFT_BOTTOM, VERTICAL_SHIFT_TOP,
};

/// Top-left pixel coordinate of one illustration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned box inside a card template where illustrations may go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl Region {
    pub fn contains(&self, p: Position, size: i32) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x + size <= self.x + self.width
            && p.y + size <= self.y + self.height
    }
}

pub type Placement = Vec<Position>;

/// Operand bands of the front template: (top, bottom).
pub fn front_regions() -> (Region, Region) {
    let x = (TEMPLATE_WIDTH - BOX_AREA_WIDTH) / 2;
    let top = Region {
        width: BOX_AREA_WIDTH,
        height: BOX_AREA_HEIGHT,
        x,
        y: FRAME_TOP_Y + VERTICAL_SHIFT_TOP,
    };
    let bottom = Region {
        width: BOX_AREA_WIDTH,
        height: BOX_AREA_HEIGHT,
        x,
        y: FRAME_BOTTOM_Y + VERTICAL_SHIFT_BOTTOM - BOX_AREA_HEIGHT,
    };
    (top, bottom)
}

/// Square illustration edge shared by both operand bands.
///
/// Up to four per band the images grow to fill the widest row, capped at the
/// band height; past that both bands fall back to the fixed five-per-row size.
pub fn illustration_size(top_count: u32, bottom_count: u32, region: &Region) -> i32 {
    if top_count <= 4 && bottom_count <= 4 {
        let widest = top_count.max(bottom_count).max(1) as i32;
        (region.width / widest).min(region.height)
    } else {
        region.width / MAX_IMAGES_PER_ROW
    }
}

/// Positions for `count` square images of edge `size` inside `region`.
pub fn plan_placement(count: u32, region: &Region, size: i32) -> Placement {
    if count <= 4 {
        return row_positions(count, region, size, (region.height - size).div_euclid(2));
    }
    let top_row = count.div_ceil(2);
    let bottom_row = count / 2;
    let gap = (region.height - 2 * size).div_euclid(3);
    let mut out = row_positions(top_row, region, size, gap);
    out.extend(row_positions(bottom_row, region, size, 2 * gap + size));
    out
}

/// One row spread with equal margins, `offset_y` below the region top.
pub fn row_positions(count: u32, region: &Region, size: i32, offset_y: i32) -> Placement {
    let n = count as i32;
    let margin = (region.width - size * n).div_euclid(n + 1);
    (0..n)
        .map(|i| Position {
            x: region.x + margin * (i + 1) + size * i,
            y: region.y + offset_y,
        })
        .collect()
}
