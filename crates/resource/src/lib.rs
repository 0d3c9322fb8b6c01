//! Template sources for careform.
//!
//! - [`FilesystemTemplateSource`]: loads templates from a template directory
//! - [`CachedTemplateSource`]: read-through cache over another source
//! - [`InMemoryTemplateSource`]: pre-populated in-memory storage (re-exported)

mod cached;
mod filesystem;

pub use cached::CachedTemplateSource;
pub use filesystem::FilesystemTemplateSource;

pub use careform_traits::InMemoryTemplateSource;
