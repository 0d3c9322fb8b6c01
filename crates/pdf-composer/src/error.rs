use careform_types::Section;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Placeholder for {section} was not found in the template")]
    PlaceholderNotFound { section: Section },

    #[error("Invalid placeholder for {section}: {reason}")]
    InvalidPlaceholder { section: Section, reason: String },

    #[error("Region {offset}..{end} lies outside the {len}-byte buffer")]
    OutOfBounds { offset: usize, end: usize, len: usize },

    #[error(
        "Placeholder regions overlap: {first} at byte {first_offset} and {second} at byte {second_offset}"
    )]
    OverlappingPlaceholders {
        first: Section,
        first_offset: usize,
        second: Section,
        second_offset: usize,
    },

    #[error("Placeholder for {section} at byte {offset} does not match its fixed-length region in the template")]
    PlaceholderMismatch { section: Section, offset: usize },

    #[error("Output document failed structural validation: {0}")]
    Corruption(String),

    #[error("{0}")]
    Other(String),
}
