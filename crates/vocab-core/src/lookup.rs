use std::sync::Arc;

use vocab_types::DictionaryResponse;

use crate::dictionary::Dictionary;
use crate::error::LookupError;
use crate::fetch::Fetcher;

/// Queries configured dictionaries in order until one has something to say
pub struct DictionaryService {
    dictionaries: Vec<Box<dyn Dictionary>>,
    fetcher: Arc<dyn Fetcher>,
}

impl DictionaryService {
    pub fn new(dictionaries: Vec<Box<dyn Dictionary>>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            dictionaries,
            fetcher,
        }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.dictionaries.iter().map(|d| d.name()).collect()
    }

    /// Look up a term. The first non-empty response wins; a failing provider
    /// hands over to the next one. If every provider failed the last error is
    /// returned, if any answered with zero entries the result is `NotFound`.
    pub async fn lookup(&self, term: &str) -> Result<DictionaryResponse, LookupError> {
        let mut last_error = None;
        let mut answered = false;

        for dictionary in &self.dictionaries {
            let provider = dictionary.name();
            match self.lookup_one(dictionary.as_ref(), term).await {
                Ok(response) if response.is_empty() => {
                    tracing::debug!(provider, term, "provider returned no entries");
                    answered = true;
                }
                Ok(response) => {
                    tracing::info!(
                        provider,
                        term,
                        entries = response.entries.len(),
                        "lookup succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    tracing::error!(provider, term, "lookup failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ if answered => Err(LookupError::NotFound(term.to_string())),
            _ => Err(LookupError::NoProviders),
        }
    }

    async fn lookup_one(
        &self,
        dictionary: &dyn Dictionary,
        term: &str,
    ) -> Result<DictionaryResponse, LookupError> {
        let request = dictionary.request(term);
        let bytes = self.fetcher.fetch(&request).await?;
        tracing::debug!(provider = dictionary.name(), bytes = bytes.len(), "fetched");
        Ok(dictionary.decode(&bytes)?)
    }
}
