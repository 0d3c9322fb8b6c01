pub mod fixtures;
pub mod pdf_assertions;

use careform::{NormalizerConfig, SectionTexts, ValidatedSections, validate_sections};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around merged PDF bytes with helper methods
pub struct MergedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl MergedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Decoded content of a 1-based page.
    pub fn page_content(&self, page_number: u32) -> String {
        let page_id = self.doc.get_pages()[&page_number];
        String::from_utf8_lossy(&self.doc.get_page_content(page_id).unwrap_or_default())
            .into_owned()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Validates sections against the default 1262-character limit.
pub fn validated(beliefs: &str, values: &str, wishes: &str) -> ValidatedSections {
    validate_sections(
        &SectionTexts::new(beliefs, values, wishes),
        &NormalizerConfig::default(),
    )
    .expect("test input within limits")
}
