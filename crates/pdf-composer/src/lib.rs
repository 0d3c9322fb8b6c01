//! Low-level PDF composition for merging section text into templates.
//!
//! - Exact byte-pattern location of placeholders in raw template bytes
//! - Fixed-length, in-place substitution that never changes the byte count
//! - Structural re-validation of merged output
//! - Content overlays for drawing on existing pages

mod error;
pub mod locate;
pub mod overlay;
pub mod patch;
pub mod placeholder;
pub mod substitute;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use error::ComposerError;
pub use locate::{Occurrences, locate, pages_containing};
pub use overlay::{
    isolate_page_content, overlay_content, page_id_at, page_size, register_standard_font,
};
pub use patch::{MissingPlaceholderPolicy, PatchReport, PlaceholderPatcher, Truncation};
pub use placeholder::{PlaceholderDef, PlaceholderSpec};
pub use substitute::{Fitted, encode_replacement, fit_replacement, substitute};
pub use validate::{Expectations, page_count, validate_structure};
