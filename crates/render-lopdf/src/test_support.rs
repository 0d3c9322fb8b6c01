use lopdf::{dictionary, Document, Object, ObjectId, Stream};

fn add_pages(doc: &mut Document, count: usize) -> (ObjectId, Vec<ObjectId>) {
    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(count);
    for i in 0..count {
        let content = format!("BT /F1 12 Tf 72 720 Td (Template page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        kids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => count as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        }),
    );
    (pages_id, kids)
}

/// Letter-sized pages with inherited media box and resources, and no form.
pub(crate) fn blank_doc(pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let (pages_id, _) = add_pages(&mut doc, pages);
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// One page carrying three terminal fields: a top-level text field with a
/// stale appearance, a text field nested under `plan` that inherits its type,
/// and a check box.
pub(crate) fn form_doc() -> Document {
    let mut doc = Document::with_version("1.7");
    let (pages_id, kids) = add_pages(&mut doc, 1);
    let page_id = kids[0];

    let stale_ap = doc.add_object(Stream::new(dictionary! {}, b"BT (old) Tj ET".to_vec()));
    let beliefs_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal("MyBeliefsTxt"),
        "MaxLen" => 1262,
        "Rect" => vec![50.into(), 400.into(), 560.into(), 700.into()],
        "P" => page_id,
        "AP" => dictionary! { "N" => stale_ap },
    });

    let plan_id = doc.new_object_id();
    let values_widget = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![50.into(), 50.into(), 560.into(), 350.into()],
        "P" => page_id,
        "AP" => dictionary! { "N" => stale_ap },
    });
    let values_id = doc.add_object(dictionary! {
        "T" => Object::string_literal("MyValuesTxt"),
        "Parent" => plan_id,
        "Kids" => vec![values_widget.into()],
    });
    doc.objects.insert(
        plan_id,
        Object::Dictionary(dictionary! {
            "T" => Object::string_literal("plan"),
            "FT" => "Tx",
            "Kids" => vec![values_id.into()],
        }),
    );
    doc.get_object_mut(values_widget)
        .and_then(Object::as_dict_mut)
        .expect("widget exists")
        .set("Parent", values_id);

    let consent_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Btn",
        "T" => Object::string_literal("Consent"),
        "Rect" => vec![50.into(), 20.into(), 70.into(), 40.into()],
        "P" => page_id,
    });

    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .expect("page exists")
        .set(
            "Annots",
            vec![beliefs_id.into(), values_widget.into(), consent_id.into()],
        );

    let acro_form_id = doc.add_object(dictionary! {
        "Fields" => vec![beliefs_id.into(), plan_id.into(), consent_id.into()],
        "DA" => Object::string_literal("/Helv 10 Tf 0 g"),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acro_form_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}
