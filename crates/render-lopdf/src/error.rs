use careform_layout::LayoutError;
use careform_pdf_composer::ComposerError;
use careform_types::Section;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error(transparent)]
    Composer(#[from] ComposerError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Form field '{0}' not found in template")]
    FieldNotFound(String),

    #[error("Form field '{name}' is a {kind} field, not a text field")]
    NotATextField { name: String, kind: String },

    #[error("{section} is placed on page {page}, but the template has {page_count} pages")]
    PageNotFound {
        section: Section,
        page: usize,
        page_count: usize,
    },

    #[error("{0}")]
    Other(String),
}
