/// Card template layout constants.
/// Values are template pixels unless noted otherwise.
pub const TEMPLATE_WIDTH: i32 = 3875;
pub const TEMPLATE_HEIGHT: i32 = 5463;

/// Upper bound of illustrations in one row once an operand needs two rows.
pub const MAX_IMAGES_PER_ROW: i32 = 5;

// Front face: operand bands
pub const FRAME_TOP_Y: i32 = 250;
pub const FRAME_BOTTOM_Y: i32 = TEMPLATE_HEIGHT - 1225;
pub const BOX_AREA_WIDTH: i32 = 3000;
pub const BOX_AREA_HEIGHT: i32 = TEMPLATE_HEIGHT / 3 - 250;
/// Nudges that keep the operand bands clear of the symbol overlay.
pub const VERTICAL_SHIFT_TOP: i32 = 100;
pub const VERTICAL_SHIFT_BOTTOM: i32 = -100;

// Front face: question text
pub const TEXT_BOX_WIDTH: i32 = 3000;
pub const TEXT_BOX_HEIGHT: i32 = 900;
pub const TEXT_BOX_BOTTOM_MARGIN: i32 = 170;
pub const FRONT_FONT_SIZE: f32 = 300.0;
pub const FRONT_ROW_WORDS: usize = 3;

// Back face
pub const TOP_TEXT_VERTICAL_OFFSET: i32 = 1075;
pub const TEXT_ROW_STEP: i32 = 325;
pub const IMAGE_VERTICAL_OFFSET: i32 = 2375;
pub const IMAGE_BOX_DIMENSIONS: i32 = 1200;
pub const IMAGE_SCALE_FACTOR: f32 = 1.65;
pub const BOTTOM_TEXT_VERTICAL_OFFSET: i32 = 3760;
pub const BOTTOM_TEXT_BOX_HEIGHT: i32 = 300;
/// Extra drop of the operation line on standard-style backs.
pub const STANDARD_OPERATION_NUDGE: i32 = 50;
/// Second rear-text segment longer than this switches to the reduced sizes.
pub const LONG_SEGMENT_CHARS: usize = 23;

/// Largest operand or result a card may show; number words stop at twenty.
pub const MAX_OPERAND: u32 = 20;
