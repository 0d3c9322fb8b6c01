//! Read-through cache over another template source.

use careform_traits::{SharedTemplateData, TemplateError, TemplateSource};
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps every successfully loaded template in memory.
///
/// Cached buffers are shared read-only; each merge copies what it patches.
/// Failed loads are not cached.
#[derive(Debug)]
pub struct CachedTemplateSource<S> {
    inner: S,
    templates: RwLock<HashMap<String, SharedTemplateData>>,
}

impl<S: TemplateSource> CachedTemplateSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            templates: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cached_len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut templates) = self.templates.write() {
            templates.clear();
        }
    }
}

impl<S: TemplateSource> TemplateSource for CachedTemplateSource<S> {
    fn load(&self, path: &str) -> Result<SharedTemplateData, TemplateError> {
        if let Ok(templates) = self.templates.read()
            && let Some(data) = templates.get(path)
        {
            return Ok(data.clone());
        }

        let data = self.inner.load(path)?;
        if let Ok(mut templates) = self.templates.write() {
            templates.entry(path.to_string()).or_insert_with(|| data.clone());
        }
        log::debug!("Cached template '{}' ({} bytes)", path, data.len());
        Ok(data)
    }

    fn exists(&self, path: &str) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(path))
            .unwrap_or(false)
            || self.inner.exists(path)
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}
