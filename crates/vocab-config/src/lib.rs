use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::network::HttpConfig;
use self::providers::ProvidersConfig;
use self::render::RenderConfig;
use self::store::StoreConfig;
use self::telegram::TelegramConfig;

pub mod cache;
pub mod network;
pub mod providers;
pub mod render;
pub mod store;
pub mod telegram;

pub use providers::ProviderKind;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub providers: ProvidersConfig,
    pub cache: CacheConfig,
    pub render: RenderConfig,
    pub store: StoreConfig,
    pub http: HttpConfig,
    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
}

impl Config {
    /// Build config from defaults and environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Load config from a JSON file, then overlay secrets from the environment
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(token) = env::var("TELEGRAM_API_TOKEN") {
            self.telegram.token = token;
        }
        if let Ok(key) = env::var("LINGUA_ROBOT_API_TOKEN") {
            self.providers.lingua_robot.api_key = key;
        }
        if let Ok(key) = env::var("MW_DICTIONARY_API_TOKEN") {
            self.providers.merriam_webster.api_key = key;
        }
        if let Ok(key) = env::var("XF_DICTIONARY_API_TOKEN") {
            self.providers.xf.api_key = key;
        }
        if let Ok(path) = env::var("STORE_PATH") {
            self.store.path = path;
        }

        if let Some(secs) = env::var("CACHE_TTL_SECS").ok().and_then(|v| v.parse().ok()) {
            self.cache.ttl_secs = secs;
        }
        if let Some(secs) = env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()) {
            self.http.timeout_secs = secs;
        }
        if let Ok(order) = env::var("DICTIONARY_PROVIDERS") {
            let parsed: Vec<ProviderKind> = order
                .split(',')
                .filter_map(|name| ProviderKind::from_name(name.trim()))
                .collect();
            if !parsed.is_empty() {
                self.providers.order = parsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "cache": {{ "ttl_secs": 60 }}, "providers": {{ "order": ["merriam_webster"] }} }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.providers.order, vec![ProviderKind::MerriamWebster]);
        assert_eq!(config.render.max_block_len, 4096);
        assert_eq!(config.render.max_senses, 5);
        assert_eq!(config.render.max_examples, 3);
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn xf_provider_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "providers": {{ "order": ["xf", "lingua_robot"], "xf": {{ "api_key": "k" }} }} }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.providers.order,
            vec![ProviderKind::Xf, ProviderKind::LinguaRobot]
        );
        assert_eq!(config.providers.xf.api_key, "k");
        assert_eq!(
            config.providers.xf.api_host,
            "xf-english-dictionary1.p.rapidapi.com"
        );
        assert_eq!(ProviderKind::from_name("xf"), Some(ProviderKind::Xf));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("absent.json")).is_err());
    }
}
