use careform_core::MissingPlaceholderPolicy;
use careform_types::MAX_SECTION_CHARS;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub concurrency: ConcurrencyConfig,
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_kb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConcurrencyConfig {
    /// Merges allowed to run at once; further requests wait for a permit.
    pub max_sync_merges: usize,
    /// How long a request may wait for a permit before it is turned away.
    pub queue_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    pub template_dir: PathBuf,
    /// Built-in profile used when a request names none.
    pub default_profile: String,
    pub max_chars: usize,
    pub require_all_sections: bool,
    pub missing_placeholders: MissingPlaceholderPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
                max_request_size_kb: 64,
            },
            concurrency: ConcurrencyConfig {
                max_sync_merges: 8,
                queue_timeout_ms: 2000,
            },
            merge: MergeConfig {
                template_dir: PathBuf::from("./templates"),
                default_profile: "placeholders".to_string(),
                max_chars: MAX_SECTION_CHARS,
                require_all_sections: true,
                missing_placeholders: MissingPlaceholderPolicy::Fail,
            },
        }
    }
}

impl Config {
    /// Loads `config/default.toml` (or the file named by `CAREFORM_CONFIG`),
    /// then applies `CAREFORM__SECTION__KEY` environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", u64::from(defaults.server.port))?
            .set_default(
                "server.max_request_size_kb",
                defaults.server.max_request_size_kb as u64,
            )?
            .set_default(
                "concurrency.max_sync_merges",
                defaults.concurrency.max_sync_merges as u64,
            )?
            .set_default(
                "concurrency.queue_timeout_ms",
                defaults.concurrency.queue_timeout_ms,
            )?
            .set_default(
                "merge.template_dir",
                defaults.merge.template_dir.to_string_lossy().into_owned(),
            )?
            .set_default("merge.default_profile", defaults.merge.default_profile)?
            .set_default("merge.max_chars", defaults.merge.max_chars as u64)?
            .set_default(
                "merge.require_all_sections",
                defaults.merge.require_all_sections,
            )?
            .set_default("merge.missing_placeholders", "fail")?;

        let config_path = std::env::var("CAREFORM_CONFIG")
            .ok()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| "config/default".to_string());
        builder = builder.add_source(config::File::with_name(&config_path).required(false));

        builder = builder.add_source(config::Environment::with_prefix("CAREFORM").separator("__"));

        builder.build()?.try_deserialize()
    }
}
