//! AcroForm text field filling and inspection.
//!
//! Fields are addressed by their fully qualified name: the partial `/T` names
//! of a field and its ancestors joined with `.`. Only terminal fields (those
//! whose kids, if any, are widget annotations) can be filled.

use crate::RenderError;
use careform_types::{decode_text_string, encode_text_string, is_utf16_text_string};
use lopdf::{Document, Object, ObjectId, StringFormat};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field hierarchies deeper than this are treated as malformed and cut off.
const MAX_FIELD_DEPTH: usize = 32;

/// The `/FT` field type of an AcroForm field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Button,
    Choice,
    Signature,
    Unknown(String),
}

impl FieldKind {
    fn from_name(name: Option<&[u8]>) -> Self {
        match name {
            Some(b"Tx") => FieldKind::Text,
            Some(b"Btn") => FieldKind::Button,
            Some(b"Ch") => FieldKind::Choice,
            Some(b"Sig") => FieldKind::Signature,
            Some(other) => FieldKind::Unknown(String::from_utf8_lossy(other).into_owned()),
            None => FieldKind::Unknown(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Button => "button",
            FieldKind::Choice => "choice",
            FieldKind::Signature => "signature",
            FieldKind::Unknown(name) if name.is_empty() => "untyped",
            FieldKind::Unknown(name) => name,
        }
    }
}

/// A terminal form field as reported by [`list_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub kind: FieldKind,
    /// `/MaxLen`, if the field declares one. Never enforced when filling.
    pub max_len: Option<i64>,
}

#[derive(Debug)]
struct FieldNode {
    id: ObjectId,
    name: String,
    field_type: Option<Vec<u8>>,
    max_len: Option<i64>,
    widgets: Vec<ObjectId>,
}

fn array_refs(doc: &Document, obj: &Object) -> Vec<ObjectId> {
    doc.dereference(obj)
        .ok()
        .and_then(|(_, obj)| obj.as_array().ok())
        .map(|arr| arr.iter().filter_map(|o| o.as_reference().ok()).collect())
        .unwrap_or_default()
}

fn acro_form_fields(doc: &Document) -> Option<Vec<ObjectId>> {
    let catalog = doc.catalog().ok()?;
    let (_, acro_form) = doc.dereference(catalog.get(b"AcroForm").ok()?).ok()?;
    let fields = acro_form.as_dict().ok()?.get(b"Fields").ok()?;
    Some(array_refs(doc, fields))
}

fn walk(
    doc: &Document,
    id: ObjectId,
    parent: Option<&FieldNode>,
    depth: usize,
    out: &mut Vec<FieldNode>,
) -> Result<(), RenderError> {
    if depth > MAX_FIELD_DEPTH {
        log::warn!("Form field tree deeper than {} levels, ignoring the rest", MAX_FIELD_DEPTH);
        return Ok(());
    }
    let dict = doc.get_dictionary(id)?;

    let partial = dict
        .get(b"T")
        .and_then(Object::as_str)
        .ok()
        .map(decode_text_string);
    let name = match (parent.map(|p| p.name.as_str()), partial) {
        (Some(p), Some(t)) if !p.is_empty() => format!("{}.{}", p, t),
        (_, Some(t)) => t,
        (Some(p), None) => p.to_string(),
        (None, None) => String::new(),
    };
    let field_type = dict
        .get(b"FT")
        .and_then(Object::as_name)
        .ok()
        .map(<[u8]>::to_vec)
        .or_else(|| parent.and_then(|p| p.field_type.clone()));
    let max_len = dict
        .get(b"MaxLen")
        .and_then(Object::as_i64)
        .ok()
        .or_else(|| parent.and_then(|p| p.max_len));

    let kids = dict.get(b"Kids").map(|k| array_refs(doc, k)).unwrap_or_default();
    let (child_fields, widgets): (Vec<ObjectId>, Vec<ObjectId>) = kids
        .into_iter()
        .partition(|kid| doc.get_dictionary(*kid).is_ok_and(|d| d.has(b"T")));

    let node = FieldNode {
        id,
        name,
        field_type,
        max_len,
        widgets,
    };
    if child_fields.is_empty() {
        out.push(node);
    } else {
        for kid in child_fields {
            walk(doc, kid, Some(&node), depth + 1, out)?;
        }
    }
    Ok(())
}

fn collect_fields(doc: &Document) -> Result<Vec<FieldNode>, RenderError> {
    let mut out = Vec::new();
    for id in acro_form_fields(doc).unwrap_or_default() {
        walk(doc, id, None, 0, &mut out)?;
    }
    Ok(out)
}

fn text_string(text: &str) -> Object {
    let bytes = encode_text_string(text);
    if is_utf16_text_string(&bytes) {
        Object::String(bytes, StringFormat::Hexadecimal)
    } else {
        Object::String(bytes, StringFormat::Literal)
    }
}

/// Lists every terminal field of the document's AcroForm.
///
/// A document without an AcroForm has no fields.
pub fn list_fields(doc: &Document) -> Result<Vec<FieldInfo>, RenderError> {
    Ok(collect_fields(doc)?
        .into_iter()
        .map(|node| FieldInfo {
            kind: FieldKind::from_name(node.field_type.as_deref()),
            name: node.name,
            max_len: node.max_len,
        })
        .collect())
}

/// Reads the current `/V` of every terminal field that has a string value.
pub fn read_field_values(doc: &Document) -> Result<BTreeMap<String, String>, RenderError> {
    let mut values = BTreeMap::new();
    for node in collect_fields(doc)? {
        let dict = doc.get_dictionary(node.id)?;
        let Ok(value) = dict.get(b"V") else {
            continue;
        };
        if let Ok((_, Object::String(bytes, _))) = doc.dereference(value) {
            values.entry(node.name).or_insert_with(|| decode_text_string(bytes));
        }
    }
    Ok(values)
}

fn set_need_appearances(doc: &mut Document) -> Result<(), RenderError> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let shared_id = doc
        .get_dictionary(root_id)?
        .get(b"AcroForm")?
        .as_reference()
        .ok();
    let target = match shared_id {
        Some(id) => doc.get_object_mut(id)?.as_dict_mut()?,
        None => doc
            .get_object_mut(root_id)?
            .as_dict_mut()?
            .get_mut(b"AcroForm")?
            .as_dict_mut()?,
    };
    target.set("NeedAppearances", Object::Boolean(true));
    Ok(())
}

/// Sets the value of named text fields, consuming and returning the document.
///
/// Every name is resolved before anything is modified, so a failure leaves no
/// partial fill behind. Stale appearance streams are removed from each filled
/// field and `/NeedAppearances` is set so viewers regenerate them.
pub fn fill_fields<I, K, V>(mut doc: Document, values: I) -> Result<Document, RenderError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let values: Vec<(K, V)> = values.into_iter().collect();
    let fields = collect_fields(&doc)?;

    let mut resolved = Vec::with_capacity(values.len());
    for (name, text) in &values {
        let name = name.as_ref();
        let node = fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| RenderError::FieldNotFound(name.to_string()))?;
        let kind = FieldKind::from_name(node.field_type.as_deref());
        if kind != FieldKind::Text {
            return Err(RenderError::NotATextField {
                name: name.to_string(),
                kind: kind.as_str().to_string(),
            });
        }
        resolved.push((node, text.as_ref()));
    }

    for (node, text) in resolved {
        let dict = doc.get_object_mut(node.id)?.as_dict_mut()?;
        dict.set("V", text_string(text));
        dict.remove(b"AP");
        for widget in &node.widgets {
            if let Ok(widget) = doc.get_object_mut(*widget).and_then(Object::as_dict_mut) {
                widget.remove(b"AP");
            }
        }
        log::debug!("Filled field '{}' with {} chars", node.name, text.chars().count());
    }

    if !values.is_empty() {
        set_need_appearances(&mut doc)?;
    }
    Ok(doc)
}
