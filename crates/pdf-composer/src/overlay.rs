//! Page-level composition: appending drawn content on top of existing pages.

use crate::ComposerError;
use careform_types::{Rect, Size};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Page tree inheritance is never deeper than this in practice.
const MAX_TREE_DEPTH: usize = 32;

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Looks up a page attribute, following `/Parent` for inherited keys.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return doc.dereference(value).ok().map(|(_, obj)| obj);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// The page's media box, falling back to US Letter when none is declared.
pub fn page_size(doc: &Document, page_id: ObjectId) -> Size {
    inherited(doc, page_id, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .and_then(|arr| {
            let values: Vec<f32> = arr.iter().filter_map(number).collect();
            match values.as_slice() {
                [llx, lly, urx, ury] => Some(Rect::from_corners(*llx, *lly, *urx, *ury).size()),
                _ => None,
            }
        })
        .unwrap_or(Size::LETTER)
}

/// Resolves the object id of a page by zero-based index.
pub fn page_id_at(doc: &Document, index: usize) -> Option<ObjectId> {
    let page_number = u32::try_from(index).ok()?.checked_add(1)?;
    doc.get_pages().get(&page_number).copied()
}

/// Registers a non-embedded standard font under `key` in the page's resources.
///
/// Resources shared by reference are updated in place; inherited inline
/// resources are copied onto the page first.
pub fn register_standard_font(
    doc: &mut Document,
    page_id: ObjectId,
    key: &str,
    base_font: &str,
) -> Result<(), ComposerError> {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    });

    let (shared_id, mut resources) = match inherited(doc, page_id, b"Resources") {
        Some(obj) => {
            let shared_id = doc
                .get_dictionary(page_id)?
                .get(b"Resources")
                .and_then(Object::as_reference)
                .ok();
            (shared_id, obj.as_dict()?.clone())
        }
        None => (None, Dictionary::new()),
    };

    match resources.get(b"Font").ok().cloned() {
        Some(Object::Reference(fonts_id)) => {
            doc.get_object_mut(fonts_id)?
                .as_dict_mut()?
                .set(key, Object::Reference(font_id));
        }
        Some(Object::Dictionary(mut fonts)) => {
            fonts.set(key, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }
        _ => {
            resources.set("Font", dictionary! { key => Object::Reference(font_id) });
        }
    }

    match shared_id {
        Some(id) => *doc.get_object_mut(id)? = Object::Dictionary(resources),
        None => doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Resources", Object::Dictionary(resources)),
    }
    Ok(())
}

fn page_contents(page_dict: &Dictionary) -> Vec<Object> {
    match page_dict.get(b"Contents") {
        Ok(Object::Array(arr)) => arr.clone(),
        Ok(obj @ Object::Reference(_)) => vec![obj.clone()],
        _ => Vec::new(),
    }
}

/// Wraps the page's existing content in `q`/`Q` so graphics state it leaves
/// behind (transforms, colours) cannot leak into content appended later.
pub fn isolate_page_content(doc: &mut Document, page_id: ObjectId) -> Result<(), ComposerError> {
    let push_id = doc.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
    let pop_id = doc.add_object(Stream::new(dictionary! {}, b"\nQ\n".to_vec()));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let mut contents = vec![Object::Reference(push_id)];
    contents.extend(page_contents(page_dict));
    contents.push(Object::Reference(pop_id));
    page_dict.set("Contents", Object::Array(contents));
    Ok(())
}

/// Adds a new content stream to an existing page, drawn on top of it.
pub fn overlay_content(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<ObjectId, ComposerError> {
    let new_content_id = doc.add_object(Stream::new(dictionary! {}, content_stream));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    if page_dict.get(b"Type").and_then(Object::as_name).ok() != Some(b"Page".as_slice()) {
        return Err(ComposerError::Other(format!(
            "Object {:?} is not a page",
            page_id
        )));
    }

    let mut contents = page_contents(page_dict);
    contents.push(Object::Reference(new_content_id));
    page_dict.set("Contents", Object::Array(contents));

    Ok(new_content_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::single_page_doc;

    #[test]
    fn overlay_is_drawn_after_existing_content() {
        let mut doc = single_page_doc(b"BT (Original Content) Tj ET");
        let page_id = page_id_at(&doc, 0).unwrap();

        overlay_content(&mut doc, page_id, b"BT (Overlay Content) Tj ET".to_vec()).unwrap();

        let page_dict = doc.get_dictionary(page_id).unwrap();
        let contents = page_dict.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 2);

        let full = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&full);
        let original = text.find("Original Content").unwrap();
        let overlay = text.find("Overlay Content").unwrap();
        assert!(original < overlay);
    }

    #[test]
    fn isolation_brackets_existing_content() {
        let mut doc = single_page_doc(b"1 0 0 1 50 50 cm");
        let page_id = page_id_at(&doc, 0).unwrap();

        isolate_page_content(&mut doc, page_id).unwrap();

        let full = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&full);
        assert!(text.trim_start().starts_with('q'));
        assert!(text.trim_end().ends_with('Q'));
        assert!(text.contains("50 50 cm"));
    }

    #[test]
    fn page_size_reads_media_box() {
        let doc = single_page_doc(b"");
        let page_id = page_id_at(&doc, 0).unwrap();
        assert_eq!(page_size(&doc, page_id), Size::LETTER);
    }

    #[test]
    fn page_index_out_of_range_is_none() {
        let doc = single_page_doc(b"");
        assert!(page_id_at(&doc, 1).is_none());
    }

    #[test]
    fn registers_font_in_shared_resources() {
        let mut doc = single_page_doc(b"");
        let page_id = page_id_at(&doc, 0).unwrap();

        register_standard_font(&mut doc, page_id, "FCare", "Helvetica").unwrap();

        let resources_id = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Resources")
            .unwrap()
            .as_reference()
            .unwrap();
        let resources = doc.get_dictionary(resources_id).unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert!(fonts.has(b"F1"));
        let font_id = fonts.get(b"FCare").unwrap().as_reference().unwrap();
        let font = doc.get_dictionary(font_id).unwrap();
        assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");
    }
}
