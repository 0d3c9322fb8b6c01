//! TemplateSource trait for abstracting template loading.
//!
//! The merge engine only ever sees template bytes; where they come from
//! (disk, memory, a network fetch) is the source's concern.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for template loading operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to load template '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TemplateError {
    fn from(err: std::io::Error) -> Self {
        TemplateError::Io(err.to_string())
    }
}

/// Shared, read-only template bytes.
///
/// Merges never write through this handle; each merge copies the bytes into
/// a buffer it owns before patching.
pub type SharedTemplateData = Arc<Vec<u8>>;

/// A trait for loading template documents.
///
/// # Implementations
///
/// - `FilesystemTemplateSource` (careform-resource): loads from a template directory
/// - `InMemoryTemplateSource`: pre-populated memory, used by tests and embedders
pub trait TemplateSource: Send + Sync + Debug {
    /// Load a template by its path or name.
    fn load(&self, path: &str) -> Result<SharedTemplateData, TemplateError>;

    /// Check if a template exists.
    fn exists(&self, path: &str) -> bool;

    /// Returns a human-readable name for this source (for logging).
    fn name(&self) -> &'static str;
}

impl<T: TemplateSource + ?Sized> TemplateSource for Arc<T> {
    fn load(&self, path: &str) -> Result<SharedTemplateData, TemplateError> {
        (**self).load(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// An in-memory template source.
#[derive(Debug, Default)]
pub struct InMemoryTemplateSource {
    templates: RwLock<HashMap<String, SharedTemplateData>>,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template to the store.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), TemplateError> {
        let path = path.into();
        let mut templates = self
            .templates
            .write()
            .map_err(|_| TemplateError::LoadFailed {
                path: path.clone(),
                message: "template store lock poisoned".to_string(),
            })?;
        templates.insert(path, Arc::new(data));
        Ok(())
    }

    /// Number of stored templates; 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load(&self, path: &str) -> Result<SharedTemplateData, TemplateError> {
        let templates = self
            .templates
            .read()
            .map_err(|_| TemplateError::LoadFailed {
                path: path.to_string(),
                message: "template store lock poisoned".to_string(),
            })?;
        templates
            .get(path)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryTemplateSource"
    }
}
