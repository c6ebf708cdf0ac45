//! Bitmap helpers on top of `tiny_skia::Pixmap`.

use std::fs;
use std::path::Path;

use card_core::{BackTransform, Rotation};
use png::{BitDepth, ColorType, Encoder};
use tiny_skia::{FilterQuality, IntRect, Pixmap, PixmapPaint, Transform};

use crate::RenderError;

pub fn new_canvas(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })
}

pub fn load_png(path: &Path) -> Result<Pixmap, RenderError> {
    if !path.is_file() {
        return Err(RenderError::MissingAsset(path.to_path_buf()));
    }
    Pixmap::load_png(path).map_err(|e| RenderError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

// Shared PNG encoder: straight RGBA, deterministic for the same pixels
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for p in pixmap.pixels() {
        let c = p.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(&rgba)?;
    }
    Ok(buf)
}

pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<(), RenderError> {
    fs::write(path, encode_png(pixmap)?)?;
    Ok(())
}

/// Resamples to exactly `width`×`height`, ignoring aspect ratio.
pub fn resize(src: &Pixmap, width: u32, height: u32) -> Result<Pixmap, RenderError> {
    if (src.width(), src.height()) == (width, height) {
        return Ok(src.clone());
    }
    let mut out = new_canvas(width, height)?;
    let sx = width as f32 / src.width() as f32;
    let sy = height as f32 / src.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..Default::default()
    };
    out.draw_pixmap(0, 0, src.as_ref(), &paint, Transform::from_scale(sx, sy), None);
    Ok(out)
}

/// Uniform scale; dimensions are truncated like integer pixel sizes.
pub fn scale(src: &Pixmap, factor: f32) -> Result<Pixmap, RenderError> {
    let width = (src.width() as f32 * factor) as u32;
    let height = (src.height() as f32 * factor) as u32;
    resize(src, width, height)
}

// Copies pixels so that out(x, y) = src(pick(x, y)).
fn remap<F>(src: &Pixmap, width: u32, height: u32, pick: F) -> Result<Pixmap, RenderError>
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let mut out = new_canvas(width, height)?;
    let src_w = src.width();
    let pixels = src.pixels();
    let dst = out.pixels_mut();
    for y in 0..height {
        for x in 0..width {
            let (sx, sy) = pick(x, y);
            dst[(y * width + x) as usize] = pixels[(sy * src_w + sx) as usize];
        }
    }
    Ok(out)
}

pub fn rotate(src: &Pixmap, rotation: Rotation) -> Result<Pixmap, RenderError> {
    let (w, h) = (src.width(), src.height());
    match rotation {
        Rotation::None => Ok(src.clone()),
        // counter-clockwise with the canvas expanded to fit
        Rotation::Quarter => remap(src, h, w, |x, y| (w - 1 - y, x)),
        Rotation::Half => remap(src, w, h, |x, y| (w - 1 - x, h - 1 - y)),
    }
}

pub fn flip_vertical(src: &Pixmap) -> Result<Pixmap, RenderError> {
    let h = src.height();
    remap(src, src.width(), h, |x, y| (x, h - 1 - y))
}

pub fn apply_back_transform(src: &Pixmap, transform: BackTransform) -> Result<Pixmap, RenderError> {
    match transform {
        BackTransform::Rotate180 => rotate(src, Rotation::Half),
        BackTransform::FlipVerticalThenRotate180 => rotate(&flip_vertical(src)?, Rotation::Half),
    }
}

/// Source-over paste; the source alpha acts as the mask. Parts outside the
/// canvas are clipped.
pub fn paste(dst: &mut Pixmap, src: &Pixmap, x: i32, y: i32) {
    dst.draw_pixmap(
        x,
        y,
        src.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

pub fn crop(src: &Pixmap, x: i32, y: i32, width: u32, height: u32) -> Option<Pixmap> {
    src.clone_rect(IntRect::from_xywh(x, y, width, height)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tiny_skia::Color;

    /// Opaque pixmap whose pixel (x, y) encodes its own coordinates.
    pub(crate) fn gradient(width: u32, height: u32) -> Pixmap {
        let mut p = new_canvas(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let c = Color::from_rgba8(x as u8, y as u8, 7, 255)
                    .premultiply()
                    .to_color_u8();
                p.pixels_mut()[(y * width + x) as usize] = c;
            }
        }
        p
    }

    fn at(p: &Pixmap, x: u32, y: u32) -> (u8, u8) {
        let c = p.pixel(x, y).unwrap();
        (c.red(), c.green())
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let src = gradient(3, 2);
        let out = rotate(&src, Rotation::Quarter).unwrap();
        assert_eq!((out.width(), out.height()), (2, 3));
        // the top-right source corner ends up top-left
        assert_eq!(at(&out, 0, 0), (2, 0));
        assert_eq!(at(&out, 0, 2), (0, 0));
        assert_eq!(at(&out, 1, 2), (0, 1));
    }

    #[test]
    fn half_turn_and_flip_are_involutions() {
        let src = gradient(5, 4);
        let twice = rotate(&rotate(&src, Rotation::Half).unwrap(), Rotation::Half).unwrap();
        assert_eq!(twice.data(), src.data());
        let flipped = flip_vertical(&flip_vertical(&src).unwrap()).unwrap();
        assert_eq!(flipped.data(), src.data());
    }

    #[test]
    fn flip_then_half_turn_mirrors_horizontally() {
        let src = gradient(4, 3);
        let out = apply_back_transform(&src, BackTransform::FlipVerticalThenRotate180).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(at(&out, x, y), at(&src, 3 - x, y));
            }
        }
    }

    #[test]
    fn scale_truncates_dimensions() {
        let src = gradient(100, 50);
        let out = scale(&src, 0.4087).unwrap();
        assert_eq!((out.width(), out.height()), (40, 20));
    }

    #[test]
    fn paste_skips_transparent_pixels() {
        let mut dst = gradient(4, 4);
        let before = dst.clone();
        let clear = new_canvas(2, 2).unwrap();
        paste(&mut dst, &clear, 1, 1);
        assert_eq!(dst.data(), before.data());
    }

    #[test]
    fn png_bytes_decode_to_same_pixels() {
        let src = gradient(6, 5);
        let bytes = encode_png(&src).unwrap();
        let back = Pixmap::decode_png(&bytes).unwrap();
        assert_eq!(back.data(), src.data());
    }

    #[test]
    fn missing_file_is_a_missing_asset() {
        let err = load_png(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, RenderError::MissingAsset(_)));
    }
}
