//! One composed page bitmap as a single-page A4 PDF.

use std::fs;
use std::path::Path;

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use tiny_skia::Pixmap;

use crate::PressError;

pub const A4_WIDTH_PT: f32 = 595.2756;
pub const A4_HEIGHT_PT: f32 = 841.8898;

const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// Straight RGB and alpha planes.
fn split_planes(pixmap: &Pixmap) -> (Vec<u8>, Vec<u8>) {
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    let mut alpha = Vec::with_capacity(pixmap.pixels().len());
    for p in pixmap.pixels() {
        let c = p.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        alpha.push(c.alpha());
    }
    (rgb, alpha)
}

/// The bitmap is stretched over the whole A4 page.
pub fn page_pdf_bytes(page: &Pixmap) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let mask_id = Ref::new(5);
    let content_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    let mut pdf_page = pdf.page(page_id);
    pdf_page.media_box(Rect::new(0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT));
    pdf_page.parent(pages_id);
    pdf_page.contents(content_id);
    pdf_page.resources().x_objects().pair(IMAGE_NAME, image_id);
    pdf_page.finish();

    let (rgb, alpha) = split_planes(page);
    let has_alpha = alpha.iter().any(|&a| a < 255);
    let (width, height) = (page.width() as i32, page.height() as i32);

    let compressed_rgb = compress_to_vec_zlib(&rgb, 6);
    let mut image = pdf.image_xobject(image_id, &compressed_rgb);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if has_alpha {
        image.s_mask(mask_id);
    }
    image.finish();

    if has_alpha {
        let compressed_alpha = compress_to_vec_zlib(&alpha, 6);
        let mut mask = pdf.image_xobject(mask_id, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }

    let mut content = Content::new();
    content.save_state();
    content.transform([A4_WIDTH_PT, 0.0, 0.0, A4_HEIGHT_PT, 0.0, 0.0]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

pub fn write_page_pdf(page: &Pixmap, path: &Path) -> Result<(), PressError> {
    fs::write(path, page_pdf_bytes(page))?;
    Ok(())
}
