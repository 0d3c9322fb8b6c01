//! # careform-core
//!
//! Merges the three free-text sections of the "My Voice" care planning guide
//! into a template PDF.
//!
//! - **normalize**: length validation at the input boundary
//! - **profile**: template profiles and strategy selection
//! - **strategy**: field fill, byte substitution and page annotation
//! - **merge**: template loading, the merge itself and output revalidation
//!
//! The crate does no I/O of its own beyond what a `TemplateSource` performs.

// Re-export foundation crates
pub use careform_traits as traits;
pub use careform_types as types;

pub mod error;
pub mod merge;
pub mod normalize;
pub mod profile;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::MergeError;
pub use merge::{
    CONTENT_TYPE, MergeEngine, MergeOutput, MergeReport, OUTPUT_FILENAME, merge, merge_from_source,
};
pub use normalize::{
    NormalizerConfig, Overage, SectionOverage, ValidatedSections, ValidationError, char_len,
    normalize, normalize_padded, remaining, validate_sections,
};
pub use profile::{FieldBinding, StrategyKind, TemplateProfile};
pub use strategy::MergeStrategy;

pub use careform_pdf_composer::{MissingPlaceholderPolicy, PlaceholderSpec, Truncation};
pub use careform_render_lopdf::{AnnotationRegion, MaskSpec};
pub use careform_types::{MAX_SECTION_CHARS, Section, SectionTexts};
