//! Filesystem-based template source.
//!
//! Templates are resolved relative to a base directory. Resolved paths must
//! stay inside that directory, so a request naming `../../etc/passwd` is
//! treated as not found.

use careform_traits::{SharedTemplateData, TemplateError, TemplateSource};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemTemplateSource {
    base_path: PathBuf,
    canonical_base: Option<PathBuf>,
}

impl FilesystemTemplateSource {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` if the path would escape the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        if Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(full_path)
    }
}

impl TemplateSource for FilesystemTemplateSource {
    fn load(&self, path: &str) -> Result<SharedTemplateData, TemplateError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| TemplateError::NotFound(format!("{} (path traversal blocked)", path)))?;

        log::debug!("Loading template from {}", full_path.display());

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TemplateError::NotFound(path.to_string())
            } else {
                TemplateError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemTemplateSource"
    }
}
