//! Synthetic templates shaped like the three variants of the guide.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

pub const GUIDE_PAGES: usize = 34;

struct Guide {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Guide {
    fn new(contents: Vec<Vec<u8>>) -> Self {
        let mut doc = Document::with_version("1.6");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let page_ids = contents
            .into_iter()
            .map(|content| {
                let content_id = doc.add_object(Stream::new(dictionary! {}, content));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                    "Contents" => content_id,
                    "Resources" => resources_id,
                })
            })
            .collect::<Vec<_>>();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
                "Count" => page_ids.len() as i64,
            }),
        );
        Self {
            doc,
            pages_id,
            page_ids,
        }
    }

    fn save(mut self, extra_catalog: Dictionary) -> Vec<u8> {
        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        catalog.extend(&extra_catalog);
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes).expect("in-memory save");
        bytes
    }
}

fn page_label(n: usize) -> Vec<u8> {
    format!("BT /F1 14 Tf 72 740 Td (My Voice - page {}) Tj ET", n).into_bytes()
}

/// The plain guide: `pages` labelled pages and nothing else.
pub fn plain_guide(pages: usize) -> Vec<u8> {
    Guide::new((1..=pages).map(page_label).collect()).save(Dictionary::new())
}

/// A guide whose page 33 shows one string per `(fill, len)` run.
///
/// Runs are separated by ordinary text so no two are adjacent.
pub fn placeholder_guide(runs: &[(u8, usize)]) -> Vec<u8> {
    let mut contents: Vec<Vec<u8>> = (1..=GUIDE_PAGES).map(page_label).collect();
    let mut content = b"BT /F1 10 Tf 70 540 Td".to_vec();
    for (fill, len) in runs {
        content.extend_from_slice(b"\n(Your answer:) Tj 0 -12 Td\n(");
        content.extend(std::iter::repeat_n(*fill, *len));
        content.extend_from_slice(b") Tj 0 -24 Td");
    }
    content.extend_from_slice(b"\nET");
    contents[32] = content;
    Guide::new(contents).save(Dictionary::new())
}

/// A guide whose pages 33 and 34 carry the `MyBeliefsTxt`, `MyValuesTxt` and
/// `MyWishesTxt` multiline text fields.
pub fn fillable_guide() -> Vec<u8> {
    let mut guide = Guide::new((1..=GUIDE_PAGES).map(page_label).collect());
    let placements = [
        ("MyBeliefsTxt", 32, 100),
        ("MyValuesTxt", 33, 420),
        ("MyWishesTxt", 33, 60),
    ];
    let mut fields = Vec::new();
    for (name, page_index, bottom) in placements {
        let page_id = guide.page_ids[page_index];
        let appearance = guide
            .doc
            .add_object(Stream::new(dictionary! {}, b"/Tx BMC EMC".to_vec()));
        let field_id = guide.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "Ff" => 4096,
            "MaxLen" => 1262,
            "T" => Object::string_literal(name),
            "DA" => Object::string_literal("/Helv 10 Tf 0 g"),
            "Rect" => vec![50.into(), bottom.into(), 562.into(), (bottom + 300).into()],
            "P" => page_id,
            "AP" => dictionary! { "N" => appearance },
        });
        if let Ok(page) = guide.doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
            let mut annots = page
                .get(b"Annots")
                .and_then(Object::as_array)
                .cloned()
                .unwrap_or_default();
            annots.push(field_id.into());
            page.set("Annots", annots);
        }
        fields.push(Object::Reference(field_id));
    }
    let acro_form_id = guide.doc.add_object(dictionary! {
        "Fields" => fields,
        "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
    });
    guide.save(dictionary! { "AcroForm" => acro_form_id })
}
