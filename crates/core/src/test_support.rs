use lopdf::{dictionary, Document, Object, ObjectId, Stream};

fn build(doc: &mut Document, contents: Vec<Vec<u8>>) -> (ObjectId, Vec<ObjectId>) {
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let kids: Vec<ObjectId> = contents
        .into_iter()
        .map(|content| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            })
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => kids.len() as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    (pages_id, kids)
}

fn finish(mut doc: Document, catalog: lopdf::Dictionary) -> Vec<u8> {
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("in-memory save");
    bytes
}

/// One page whose content stream shows each `(fill, len)` run as a string.
pub(crate) fn placeholder_template(runs: &[(u8, usize)]) -> Vec<u8> {
    let mut content = b"BT /F1 9 Tf 70 700 Td".to_vec();
    for (fill, len) in runs {
        content.extend_from_slice(b"\n(");
        content.extend(std::iter::repeat_n(*fill, *len));
        content.extend_from_slice(b") Tj 0 -12 Td");
    }
    content.extend_from_slice(b"\nET");

    let mut doc = Document::with_version("1.5");
    let (pages_id, _) = build(&mut doc, vec![content]);
    finish(doc, dictionary! { "Type" => "Catalog", "Pages" => pages_id })
}

/// `count` pages, each labelled with its page number.
pub(crate) fn paged_template(count: usize) -> Vec<u8> {
    let contents = (1..=count)
        .map(|n| format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", n).into_bytes())
        .collect();
    let mut doc = Document::with_version("1.5");
    let (pages_id, _) = build(&mut doc, contents);
    finish(doc, dictionary! { "Type" => "Catalog", "Pages" => pages_id })
}

/// One page with the three `My*Txt` text fields of the fillable guide.
pub(crate) fn form_template() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let (pages_id, kids) = build(&mut doc, vec![b"BT /F1 12 Tf 72 720 Td (My Voice) Tj ET".to_vec()]);
    let fields: Vec<Object> = ["MyBeliefsTxt", "MyValuesTxt", "MyWishesTxt"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let bottom = 500 - (i as i64) * 200;
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "Ff" => 4096,
                "T" => Object::string_literal(*name),
                "Rect" => vec![50.into(), bottom.into(), 560.into(), (bottom + 180).into()],
                "P" => kids[0],
            }))
        })
        .collect();
    doc.get_object_mut(kids[0])
        .and_then(Object::as_dict_mut)
        .expect("page exists")
        .set("Annots", fields.clone());
    let acro_form_id = doc.add_object(dictionary! { "Fields" => fields });
    finish(
        doc,
        dictionary! { "Type" => "Catalog", "Pages" => pages_id, "AcroForm" => acro_form_id },
    )
}
