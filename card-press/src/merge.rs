//! Concatenation of single-page documents into the final deck document.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::PressError;

/// Copies objects between documents, following references and copying each
/// source object once.
struct ObjectCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            id_map: HashMap::new(),
        }
    }

    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }
        // Reserve the id first so reference cycles terminate.
        let new_id = self.target.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;
        self.target.objects.insert(new_id, new_obj);
        Ok(new_id)
    }

    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(items) => Ok(Object::Array(
                items
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }

    /// Copies a page without its `Parent`, so the source page tree stays
    /// behind.
    fn copy_page(&mut self, page_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        let mut page = self.source.get_object(page_id)?.as_dict()?.clone();
        page.remove(b"Parent");
        let page = self.remap_references(Object::Dictionary(page))?;
        Ok(self.target.add_object(page))
    }
}

/// Empty document with a catalog and an empty page tree.
fn empty_document() -> (Document, ObjectId) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0i64,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    (doc, pages_id)
}

/// Appends every page of `source`, in page order, to the page tree rooted at
/// `pages_id`.
fn append_pages(
    target: &mut Document,
    pages_id: ObjectId,
    source: &Document,
) -> Result<(), PressError> {
    let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
    let mut copier = ObjectCopier::new(source, target);
    let mut new_kids = Vec::with_capacity(source_pages.len());
    for page_id in source_pages {
        new_kids.push(copier.copy_page(page_id)?);
    }

    for &kid in &new_kids {
        if let Ok(Object::Dictionary(page)) = target.get_object_mut(kid) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }
    let pages = target.get_object_mut(pages_id)?.as_dict_mut()?;
    let mut kids = pages.get(b"Kids")?.as_array()?.clone();
    kids.extend(new_kids.into_iter().map(Object::Reference));
    let count = kids.len() as i64;
    pages.set("Kids", Object::Array(kids));
    pages.set("Count", count);
    Ok(())
}

/// Merges `inputs` in order into `output`. Every input must exist; on
/// success the inputs are deleted.
pub fn merge_files(inputs: &[PathBuf], output: &Path) -> Result<usize, PressError> {
    if let Some(missing) = inputs.iter().find(|p| !p.is_file()) {
        return Err(PressError::MissingArtifact(missing.clone()));
    }
    let (mut merged, pages_id) = empty_document();
    for input in inputs {
        let source = Document::load(input)?;
        append_pages(&mut merged, pages_id, &source)?;
    }
    let page_count = merged.get_pages().len();
    merged.save(output)?;

    for input in inputs {
        if let Err(e) = fs::remove_file(input) {
            log::warn!("could not remove {}: {e}", input.display());
        }
    }
    Ok(page_count)
}
