use std::sync::Arc;

use vocab_config::providers::ProvidersConfig;
use vocab_config::{Config, ProviderKind};
use vocab_core::preprocess::DefaultPreprocessor;
use vocab_core::{Dictionary, DictionaryService, OutputBuilder, Renderer, TokenCache};
use vocab_lingua_robot::LinguaRobot;
use vocab_merriam_webster::MerriamWebster;
use vocab_store::Persistence;
use vocab_telegram::ChatPort;
use vocab_xf_dictionary::XfDictionary;

pub struct AppState {
    pub dictionary: DictionaryService,
    pub preprocessor: DefaultPreprocessor,
    pub renderer: Renderer,
    pub output: OutputBuilder,
    pub cache: TokenCache,
    pub store: Arc<dyn Persistence>,
    pub chat: Arc<dyn ChatPort>,
}

impl AppState {
    pub fn new(
        config: &Config,
        dictionary: DictionaryService,
        store: Arc<dyn Persistence>,
        chat: Arc<dyn ChatPort>,
    ) -> Self {
        let renderer = Renderer::new(config.render.max_senses, config.render.max_examples);
        let output = OutputBuilder::new(config.render.max_block_len);
        let cache = TokenCache::new(config.cache.ttl());

        Self {
            dictionary,
            preprocessor: DefaultPreprocessor,
            renderer,
            output,
            cache,
            store,
            chat,
        }
    }
}

/// Providers in configured order. Ones without an API key are skipped.
pub fn dictionaries_from_config(config: &ProvidersConfig) -> Vec<Box<dyn Dictionary>> {
    let mut dictionaries: Vec<Box<dyn Dictionary>> = Vec::new();
    for kind in &config.order {
        match kind {
            ProviderKind::LinguaRobot if config.lingua_robot.api_key.is_empty() => {
                tracing::warn!("LINGUA_ROBOT_API_TOKEN is not set, skipping Lingua Robot");
            }
            ProviderKind::LinguaRobot => {
                dictionaries.push(Box::new(LinguaRobot::new(&config.lingua_robot)));
            }
            ProviderKind::MerriamWebster if config.merriam_webster.api_key.is_empty() => {
                tracing::warn!("MW_DICTIONARY_API_TOKEN is not set, skipping Merriam-Webster");
            }
            ProviderKind::MerriamWebster => {
                dictionaries.push(Box::new(MerriamWebster::new(&config.merriam_webster)));
            }
            ProviderKind::Xf if config.xf.api_key.is_empty() => {
                tracing::warn!("XF_DICTIONARY_API_TOKEN is not set, skipping XF Dictionary");
            }
            ProviderKind::Xf => {
                dictionaries.push(Box::new(XfDictionary::new(&config.xf)));
            }
        }
    }
    dictionaries
}
