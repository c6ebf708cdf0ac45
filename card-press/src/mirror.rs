//! Back-page mirroring for duplex printing.
//!
//! Every page is turned 180° through `/Rotate` and its content is flipped
//! vertically by wrapping it in a `q 1 0 0 -1 0 h cm ... Q` pair. Applying
//! the step twice gives back the original appearance.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::PressError;

fn flip_height(page: &Dictionary) -> Result<f32, PressError> {
    let media_box = page.get(b"MediaBox")?.as_array()?;
    if media_box.len() != 4 {
        return Err(PressError::Malformed(format!(
            "MediaBox has {} entries",
            media_box.len()
        )));
    }
    Ok(media_box[1].as_float()? + media_box[3].as_float()?)
}

fn mirror_page(doc: &mut Document, page_id: ObjectId) -> Result<(), PressError> {
    let height = flip_height(doc.get_object(page_id)?.as_dict()?)?;
    let open = doc.add_object(Stream::new(
        dictionary! {},
        format!("q 1 0 0 -1 0 {height} cm\n").into_bytes(),
    ));
    let close = doc.add_object(Stream::new(dictionary! {}, b"\nQ\n".to_vec()));

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let rotate = page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0);
    page.set("Rotate", (rotate + 180).rem_euclid(360));

    let mut contents = match page.get(b"Contents") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(single) => vec![single.clone()],
        Err(_) => Vec::new(),
    };
    contents.insert(0, Object::Reference(open));
    contents.push(Object::Reference(close));
    page.set("Contents", Object::Array(contents));
    Ok(())
}

pub fn mirror_document(doc: &mut Document) -> Result<(), PressError> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for page_id in page_ids {
        mirror_page(doc, page_id)?;
    }
    Ok(())
}

/// Mirrors the document at `path` in place.
pub fn mirror_file(path: &Path) -> Result<(), PressError> {
    let mut doc = Document::load(path)?;
    mirror_document(&mut doc)?;
    doc.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{A4_HEIGHT_PT, page_pdf_bytes};
    use lopdf::content::Content;
    use tiny_skia::Pixmap;

    type Matrix = [f32; 6];

    fn multiply(a: Matrix, b: Matrix) -> Matrix {
        [
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
            a[4] * b[0] + a[5] * b[2] + b[4],
            a[4] * b[1] + a[5] * b[3] + b[5],
        ]
    }

    // CTM in effect at the image draw operator.
    fn ctm_at_draw(doc: &Document, page_id: ObjectId) -> Matrix {
        let bytes = doc.get_page_content(page_id).unwrap();
        let content = Content::decode(&bytes).unwrap();
        let mut stack = vec![[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]];
        for op in content.operations {
            match op.operator.as_str() {
                "q" => stack.push(*stack.last().unwrap()),
                "Q" => {
                    stack.pop();
                }
                "cm" => {
                    let m: Vec<f32> = op.operands.iter().map(|o| o.as_float().unwrap()).collect();
                    let top = stack.last_mut().unwrap();
                    *top = multiply([m[0], m[1], m[2], m[3], m[4], m[5]], *top);
                }
                "Do" => return *stack.last().unwrap(),
                _ => {}
            }
        }
        panic!("no image drawn");
    }

    fn rotate_of(doc: &Document, page_id: ObjectId) -> i64 {
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0)
    }

    fn sample() -> (Document, ObjectId) {
        let page = Pixmap::new(3, 3).unwrap();
        let doc = Document::load_mem(&page_pdf_bytes(&page)).unwrap();
        let id = doc.get_pages()[&1];
        (doc, id)
    }

    #[test]
    fn mirroring_turns_and_flips() {
        let (mut doc, id) = sample();
        let before = ctm_at_draw(&doc, id);
        mirror_document(&mut doc).unwrap();
        assert_eq!(rotate_of(&doc, id), 180);
        let after = ctm_at_draw(&doc, id);
        assert!((after[3] + before[3]).abs() < 0.01);
        assert!((after[5] - A4_HEIGHT_PT).abs() < 0.01);
    }

    #[test]
    fn mirroring_twice_is_identity() {
        let (mut doc, id) = sample();
        let before = ctm_at_draw(&doc, id);
        mirror_document(&mut doc).unwrap();
        mirror_document(&mut doc).unwrap();
        assert_eq!(rotate_of(&doc, id), 0);
        let after = ctm_at_draw(&doc, id);
        for (a, b) in after.iter().zip(before) {
            assert!((a - b).abs() < 0.01, "{after:?} vs {before:?}");
        }
    }
}
