//! # careform
//!
//! Merges the beliefs, values and wishes sections of the "My Voice" advance
//! care planning guide into a template PDF.
//!
//! ```no_run
//! use careform::{FilesystemTemplateSource, MergeEngine, SectionTexts, TemplateProfile};
//!
//! # fn main() -> Result<(), careform::CareformError> {
//! let engine = MergeEngine::new(FilesystemTemplateSource::new("templates"));
//! let texts = SectionTexts::new("My faith", "My family", "To be at home");
//! let sections = engine.validate(&texts)?;
//! let output = engine.merge_from_source(&TemplateProfile::fillable(), &sections)?;
//! std::fs::write(careform::OUTPUT_FILENAME, &output.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod inspect;

pub use error::CareformError;
pub use inspect::{PlaceholderSighting, inspect_placeholders, load_profile};

pub use careform_core::{
    AnnotationRegion, CONTENT_TYPE, FieldBinding, MAX_SECTION_CHARS, MaskSpec, MergeEngine,
    MergeError, MergeOutput, MergeReport, MergeStrategy, MissingPlaceholderPolicy,
    NormalizerConfig, OUTPUT_FILENAME, PlaceholderSpec, Section, SectionOverage, SectionTexts,
    StrategyKind, TemplateProfile, Truncation, ValidatedSections, ValidationError, merge,
    merge_from_source, normalize, normalize_padded, remaining, validate_sections,
};
pub use careform_render_lopdf::{FieldInfo, FieldKind, list_fields, read_field_values};
pub use careform_resource::{
    CachedTemplateSource, FilesystemTemplateSource, InMemoryTemplateSource,
};
pub use careform_traits::{TemplateError, TemplateSource};
