use crate::config::Config;
use careform_core::{MergeEngine, NormalizerConfig, TemplateProfile};
use careform_resource::{CachedTemplateSource, FilesystemTemplateSource};
use careform_traits::TemplateSource;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub type SharedSource = Arc<dyn TemplateSource>;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Validation rules plus the template source every merge loads from
    pub engine: Arc<MergeEngine<SharedSource>>,

    /// Built-in profiles with the configured missing-placeholder policy applied
    pub profiles: Arc<HashMap<String, TemplateProfile>>,

    /// Limits concurrent merges; each runs on the blocking pool
    pub merge_permits: Arc<Semaphore>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(source: SharedSource, config: Config) -> Self {
        let engine = MergeEngine::new(source).with_normalizer(NormalizerConfig {
            max_chars: config.merge.max_chars,
            require_all_sections: config.merge.require_all_sections,
        });

        let mut profiles = HashMap::new();
        for name in ["fillable", "placeholders", "annotated"] {
            match TemplateProfile::builtin(name) {
                Ok(mut profile) => {
                    profile.missing_placeholders = config.merge.missing_placeholders;
                    profiles.insert(name.to_string(), profile);
                }
                Err(e) => tracing::error!("Skipping built-in profile '{}': {}", name, e),
            }
        }

        Self {
            engine: Arc::new(engine),
            profiles: Arc::new(profiles),
            merge_permits: Arc::new(Semaphore::new(config.concurrency.max_sync_merges)),
            config: Arc::new(config),
        }
    }

    /// State backed by the configured template directory, cached in memory.
    pub fn from_config(config: Config) -> Self {
        let source = CachedTemplateSource::new(FilesystemTemplateSource::new(
            &config.merge.template_dir,
        ));
        Self::new(Arc::new(source), config)
    }

    /// Resolves a requested profile name, falling back to the configured default.
    pub fn profile(&self, name: Option<&str>) -> Option<&TemplateProfile> {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.config.merge.default_profile);
        self.profiles.get(name)
    }
}
