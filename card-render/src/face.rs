use std::path::{Path, PathBuf};

use card_core::constants::*;
use card_core::geometry::{front_regions, illustration_size, plan_placement};
use card_core::text::{BackFontSizes, back_font_sizes, front_rows, split_rear_text};
use card_core::{Card, Difficulty, Operator, Style, back_text_color};
use tiny_skia::Pixmap;

use crate::raster;
use crate::text::TextRenderer;
use crate::RenderError;

const FRONT_TEXT_COLOR: &str = "#FFFFFF";

/// Where the compositor finds its templates, illustrations and font.
#[derive(Clone, Debug)]
pub struct CardAssets {
    pub templates_dir: PathBuf,
    pub illustrations_dir: PathBuf,
    pub font_path: PathBuf,
}

impl CardAssets {
    pub fn front_template(&self, difficulty: Difficulty) -> PathBuf {
        self.templates_dir.join(format!("FC Front {}.png", difficulty.label()))
    }

    pub fn back_template(&self, difficulty: Difficulty) -> PathBuf {
        self.templates_dir.join(format!("FC Back {}.png", difficulty.label()))
    }

    pub fn symbol(&self, operator: Operator, difficulty: Difficulty) -> PathBuf {
        let stem = match operator {
            Operator::Plus => "Plus",
            Operator::Minus => "Minus",
        };
        self.templates_dir.join(format!("{stem} {}.png", difficulty.label()))
    }

    pub fn illustration(&self, name: &str) -> PathBuf {
        self.illustrations_dir.join(format!("{name}.png"))
    }
}

/// Renders both faces of a card onto the 3875×5463 templates.
pub struct FaceCompositor {
    assets: CardAssets,
    text: TextRenderer,
}

impl FaceCompositor {
    pub fn new(assets: CardAssets) -> Self {
        let text = TextRenderer::new(&assets.font_path);
        FaceCompositor { assets, text }
    }

    pub fn render_front(&self, card: &Card, difficulty: Difficulty) -> Result<Pixmap, RenderError> {
        let mut canvas = raster::load_png(&self.assets.front_template(difficulty))?;
        let operation = card.parsed_operation()?;

        let (top, bottom) = front_regions();
        let size = illustration_size(operation.top, operation.bottom, &top);
        let source = raster::load_png(&self.assets.illustration(&card.image))?;
        let illustration = raster::resize(&source, size as u32, size as u32)?;
        let positions = plan_placement(operation.top, &top, size)
            .into_iter()
            .chain(plan_placement(operation.bottom, &bottom, size));
        for p in positions {
            raster::paste(&mut canvas, &illustration, p.x, p.y);
        }

        self.draw_front_text(&mut canvas, &card.front_text);

        let symbol = raster::load_png(&self.assets.symbol(operation.operator, difficulty))?;
        raster::paste(&mut canvas, &symbol, 0, 0);
        Ok(canvas)
    }

    fn draw_front_text(&self, canvas: &mut Pixmap, front_text: &str) {
        let box_x = (TEMPLATE_WIDTH - TEXT_BOX_WIDTH) / 2;
        let box_y = TEMPLATE_HEIGHT - TEXT_BOX_HEIGHT - TEXT_BOX_BOTTOM_MARGIN;
        let band = TEXT_BOX_HEIGHT / 2;
        for (i, row) in front_rows(front_text).iter().enumerate() {
            let Some(layout) = self.text.layout(row, FRONT_FONT_SIZE, FRONT_TEXT_COLOR) else {
                continue;
            };
            let x = box_x + (TEXT_BOX_WIDTH - layout.width() as i32).div_euclid(2);
            let y = box_y + i as i32 * band + (band / 2 - layout.height() as i32 / 2);
            self.text.draw(canvas, &layout, x as f32, y as f32);
        }
    }

    pub fn render_back(&self, card: &Card, difficulty: Difficulty) -> Result<Pixmap, RenderError> {
        let mut canvas = raster::load_png(&self.assets.back_template(difficulty))?;
        let text = BackText::for_card(card)?;
        let color = back_text_color(difficulty);
        let width = canvas.width() as i32;

        for (i, row) in text.rows.iter().enumerate() {
            if let Some(layout) = self.text.layout(row, text.sizes.rows, color) {
                let x = (width - layout.width() as i32).div_euclid(2);
                self.text.draw(&mut canvas, &layout, x as f32, back_row_top(i) as f32);
            }
        }

        if let Some(layout) = self.text.layout(&text.operation, text.sizes.operation, color) {
            let x = (width - layout.width() as i32).div_euclid(2);
            let y = operation_top(difficulty, layout.height() as i32);
            self.text.draw(&mut canvas, &layout, x as f32, y as f32);
        }

        let source = raster::load_png(&self.assets.illustration(&card.image))?;
        let illustration = raster::scale(&source, IMAGE_SCALE_FACTOR)?;
        let (x, y) = back_illustration_origin(width, &illustration);
        raster::paste(&mut canvas, &illustration, x, y);
        Ok(canvas)
    }

    /// Writes `Card_<n>.png` and `Card_<n>_Back.png` into `dir`.
    pub fn export(
        &self,
        card: &Card,
        style: Style,
        dir: &Path,
    ) -> Result<(PathBuf, PathBuf), RenderError> {
        let difficulty = style.face_difficulty(card.difficulty);

        let front_path = dir.join(card.front_file_name());
        raster::save_png(&self.render_front(card, difficulty)?, &front_path)?;

        let back_path = dir.join(card.back_file_name());
        raster::save_png(&self.render_back(card, difficulty)?, &back_path)?;

        Ok((front_path, back_path))
    }
}

/// Text drawn on a back face and the font sizes chosen for it.
#[derive(Clone, Debug, PartialEq)]
struct BackText {
    rows: [String; 3],
    operation: String,
    sizes: BackFontSizes,
}

impl BackText {
    fn for_card(card: &Card) -> Result<Self, RenderError> {
        let segments = split_rear_text(&card.rear_text)?;
        Ok(BackText {
            sizes: back_font_sizes(&segments),
            rows: segments.rows().map(str::to_string),
            operation: card.operation.trim_matches('"').to_string(),
        })
    }
}

fn back_row_top(row: usize) -> i32 {
    TOP_TEXT_VERTICAL_OFFSET + row as i32 * TEXT_ROW_STEP
}

/// Top of the operation line, centred in the bottom band; standard backs
/// sit a little lower.
fn operation_top(difficulty: Difficulty, text_height: i32) -> i32 {
    let nudge = if difficulty == Difficulty::Standard {
        STANDARD_OPERATION_NUDGE
    } else {
        0
    };
    BOTTOM_TEXT_VERTICAL_OFFSET + (BOTTOM_TEXT_BOX_HEIGHT - text_height).div_euclid(2) + nudge
}

/// Centres the scaled illustration horizontally and inside the image band.
fn back_illustration_origin(canvas_width: i32, illustration: &Pixmap) -> (i32, i32) {
    let x = (canvas_width - illustration.width() as i32).div_euclid(2);
    let y = IMAGE_VERTICAL_OFFSET
        + (IMAGE_BOX_DIMENSIONS - illustration.height() as i32).div_euclid(2);
    (x, y)
}
