use vocab_config::providers::LinguaRobotConfig;
use vocab_core::fetch::encode_path_segment;
use vocab_core::{FetchRequest, ParseError, Provider};
use vocab_types::{DictionaryResponse, Entry, Lexeme, Pronunciation, SenseDefinition};

use crate::schema::{LinguaRobotResponse, LrEntry, LrPronunciation, LrSense};

const NAME: &str = "lingua_robot";

#[derive(Clone)]
pub struct LinguaRobot {
    api_key: String,
    api_host: String,
    base_url: String,
}

impl LinguaRobot {
    pub fn new(config: &LinguaRobotConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Provider for LinguaRobot {
    type Response = LinguaRobotResponse;

    fn name(&self) -> &'static str {
        NAME
    }

    fn request(&self, term: &str) -> FetchRequest {
        FetchRequest::get(format!(
            "{}/language/v1/entries/en/{}",
            self.base_url,
            encode_path_segment(term)
        ))
        .header("x-rapidapi-host", &self.api_host)
        .header("x-rapidapi-key", &self.api_key)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Self::Response, ParseError> {
        serde_json::from_slice(bytes).map_err(|e| ParseError::new(NAME, e))
    }

    fn normalize(&self, response: Self::Response) -> DictionaryResponse {
        DictionaryResponse::new(response.entries.into_iter().filter_map(map_entry).collect())
    }
}

/// Entries without a headword are dropped
fn map_entry(entry: LrEntry) -> Option<Entry> {
    if entry.entry.trim().is_empty() {
        return None;
    }
    Some(Entry {
        item: entry.entry,
        pronunciations: entry
            .pronunciations
            .into_iter()
            .map(map_pronunciation)
            .collect(),
        lexemes: entry
            .lexemes
            .into_iter()
            .map(|lexeme| Lexeme {
                lemma: lexeme.lemma,
                part_of_speech: lexeme.part_of_speech,
                senses: lexeme.senses.into_iter().map(map_sense).collect(),
            })
            .collect(),
    })
}

fn map_pronunciation(pronunciation: LrPronunciation) -> Pronunciation {
    Pronunciation {
        audio_url: pronunciation
            .audio
            .map(|a| a.url)
            .filter(|url| !url.is_empty()),
        regions: pronunciation
            .context
            .map(|c| c.regions)
            .unwrap_or_default(),
        transcriptions: pronunciation
            .transcriptions
            .into_iter()
            .filter(|t| !t.transcription.is_empty())
            .map(|t| {
                if t.notation.is_empty() {
                    t.transcription
                } else {
                    format!("{} ({})", t.transcription, t.notation)
                }
            })
            .collect(),
    }
}

fn map_sense(sense: LrSense) -> SenseDefinition {
    SenseDefinition {
        definition: sense.definition,
        examples: sense.examples,
        synonyms: sense.synonyms.into_iter().collect(),
        antonyms: sense.antonyms.into_iter().collect(),
    }
}
