//! lopdf-backed document transformations for careform templates.
//!
//! Two of the three merge strategies live here: [`fill_fields`] writes section
//! text into AcroForm text fields, and [`PageAnnotator`] draws wrapped text
//! directly onto template pages.

mod annotate;
mod error;
mod form;

#[cfg(test)]
pub(crate) mod test_support;

pub use annotate::{AnnotationRegion, AnnotationReport, MaskSpec, OVERLAY_FONT_KEY, PageAnnotator};
pub use error::RenderError;
pub use form::{FieldInfo, FieldKind, fill_fields, list_fields, read_field_values};
