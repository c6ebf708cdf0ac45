//! Text rasterization through a one-element SVG document.
//!
//! Each string becomes a bold `<text>` node rendered with resvg. The ink
//! bounding box of the parsed tree is the measured size, and drawing places
//! the ink top-left corner at the requested point.

use std::path::Path;
use std::sync::Arc;

use tiny_skia::{Pixmap, Transform};
use usvg::fontdb;

const FALLBACK_FAMILY: &str = "sans-serif";

pub(crate) fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Measured string, ready to draw.
pub struct TextLayout {
    tree: usvg::Tree,
    ink: usvg::Rect,
}

impl TextLayout {
    pub fn width(&self) -> f32 {
        self.ink.width()
    }

    pub fn height(&self) -> f32 {
        self.ink.height()
    }
}

pub struct TextRenderer {
    options: usvg::Options<'static>,
    family: String,
    fallback: bool,
}

impl TextRenderer {
    /// Loads the card font; when it cannot be read, system fonts are used
    /// instead and a warning is logged.
    pub fn new(font_path: &Path) -> Self {
        let mut db = fontdb::Database::new();
        let loaded = match db.load_font_file(font_path) {
            Ok(()) => db.len() > 0,
            Err(e) => {
                log::debug!("font load failed for {}: {e}", font_path.display());
                false
            }
        };
        let family = if loaded {
            db.faces()
                .next()
                .and_then(|face| face.families.first().map(|(n, _)| n.clone()))
        } else {
            None
        };
        let (family, fallback) = match family {
            Some(name) => {
                db.set_sans_serif_family(name.clone());
                (name, false)
            }
            None => {
                log::warn!(
                    "Font {} unavailable, falling back to system fonts",
                    font_path.display()
                );
                db.load_system_fonts();
                (FALLBACK_FAMILY.to_string(), true)
            }
        };
        let mut options = usvg::Options::default();
        options.fontdb = Arc::new(db);
        TextRenderer {
            options,
            family,
            fallback,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn uses_fallback(&self) -> bool {
        self.fallback
    }

    /// `None` when nothing would be drawn (empty string or no usable glyphs).
    pub fn layout(&self, text: &str, size: f32, fill: &str) -> Option<TextLayout> {
        if text.trim().is_empty() {
            return None;
        }
        let chars = text.chars().count() as f32;
        let w = ((chars + 2.0) * size).ceil();
        let h = (size * 2.0).ceil();
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="0" y="{size}" font-family="{family}" font-weight="bold" font-size="{size}" fill="{fill}" xml:space="preserve">{text}</text></svg>"#,
            family = svg_escape(&self.family),
            fill = svg_escape(fill),
            text = svg_escape(text),
        );
        let tree = match usvg::Tree::from_str(&svg, &self.options) {
            Ok(tree) => tree,
            Err(e) => {
                log::warn!("cannot lay out {text:?}: {e}");
                return None;
            }
        };
        if !tree.root().has_children() {
            return None;
        }
        let ink = tree.root().abs_bounding_box();
        if ink.width() <= 0.0 || ink.height() <= 0.0 {
            return None;
        }
        Some(TextLayout { tree, ink })
    }

    /// Draws with the ink top-left corner at (`left`, `top`).
    pub fn draw(&self, canvas: &mut Pixmap, layout: &TextLayout, left: f32, top: f32) {
        let transform = Transform::from_translate(left - layout.ink.x(), top - layout.ink.y());
        resvg::render(&layout.tree, transform, &mut canvas.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(svg_escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn missing_font_falls_back() {
        let renderer = TextRenderer::new(Path::new("/no/such/font.ttf"));
        assert!(renderer.uses_fallback());
        assert_eq!(renderer.family(), FALLBACK_FAMILY);
    }

    #[test]
    fn blank_text_has_no_layout() {
        let renderer = TextRenderer::new(Path::new("/no/such/font.ttf"));
        assert!(renderer.layout("", 40.0, "#FFFFFF").is_none());
        assert!(renderer.layout("   ", 40.0, "#FFFFFF").is_none());
    }

    #[test]
    fn drawn_ink_starts_at_target() {
        let renderer = TextRenderer::new(Path::new("/no/such/font.ttf"));
        // hosts without any system font have nothing to measure
        let Some(layout) = renderer.layout("Hello", 40.0, "#000000") else {
            return;
        };
        assert!(layout.width() > layout.height());
        let mut canvas = Pixmap::new(400, 200).unwrap();
        renderer.draw(&mut canvas, &layout, 50.0, 60.0);
        let inked = |x: u32, y: u32| canvas.pixel(x, y).map(|p| p.alpha() > 0).unwrap_or(false);
        for y in 0..200 {
            for x in 0..400 {
                if inked(x, y) {
                    assert!(x >= 49 && y >= 59, "ink at ({x}, {y})");
                }
            }
        }
    }
}
