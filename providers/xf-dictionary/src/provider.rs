use vocab_config::providers::XfConfig;
use vocab_core::{FetchRequest, ParseError, Provider};
use vocab_types::{DictionaryResponse, Entry, Lexeme, Pronunciation, SenseDefinition};

use crate::schema::{XfDefinition, XfItem, XfPronunciationEntry, XfPronunciationSection, XfResponse};

const NAME: &str = "xf";

#[derive(Clone)]
pub struct XfDictionary {
    api_key: String,
    api_host: String,
    base_url: String,
}

impl XfDictionary {
    pub fn new(config: &XfConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Provider for XfDictionary {
    type Response = XfResponse;

    fn name(&self) -> &'static str {
        NAME
    }

    fn request(&self, term: &str) -> FetchRequest {
        let body = serde_json::json!({ "selection": term }).to_string();
        FetchRequest::post_json(format!("{}/v1/dictionary", self.base_url), body.into_bytes())
            .header("x-rapidapi-host", &self.api_host)
            .header("x-rapidapi-key", &self.api_key)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Self::Response, ParseError> {
        serde_json::from_slice(bytes).map_err(|e| ParseError::new(NAME, e))
    }

    fn normalize(&self, response: Self::Response) -> DictionaryResponse {
        let XfResponse {
            items,
            pronunciations,
            ..
        } = response;

        DictionaryResponse::new(
            items
                .into_iter()
                .filter_map(|item| map_item(item, &pronunciations))
                .collect(),
        )
    }
}

fn map_item(item: XfItem, sections: &[XfPronunciationSection]) -> Option<Entry> {
    if item.word.trim().is_empty() {
        tracing::debug!("skipping item without word");
        return None;
    }

    let pronunciations = pronunciations_for(&item, sections)
        .into_iter()
        .flat_map(map_pronunciation)
        .collect();

    let mut senses: Vec<SenseDefinition> = item.definitions.into_iter().map(map_definition).collect();
    // item level synonyms apply to every sense of the item
    for sense in &mut senses {
        sense.synonyms.extend(item.synonyms.iter().cloned());
        sense.antonyms.extend(item.antonyms.iter().cloned());
    }

    let mut lexemes = Vec::new();
    if !senses.is_empty() {
        lexemes.push(Lexeme {
            lemma: item.word.clone(),
            part_of_speech: item.part_of_speech,
            senses,
        });
    }
    lexemes.extend(
        item.phrases
            .into_iter()
            .filter(|phrase| !phrase.phrase.is_empty() && !phrase.definitions.is_empty())
            .map(|phrase| Lexeme {
                lemma: phrase.phrase,
                part_of_speech: phrase.part_of_speech,
                senses: phrase.definitions.into_iter().map(map_definition).collect(),
            }),
    );

    Some(Entry {
        item: item.word,
        pronunciations,
        lexemes,
    })
}

/// The item's own section when it names one, otherwise the unsectioned
/// entries spelled like the item
fn pronunciations_for<'a>(
    item: &XfItem,
    sections: &'a [XfPronunciationSection],
) -> Vec<&'a XfPronunciationEntry> {
    if !item.pronunciation_section_id.is_empty() {
        let linked: Vec<_> = sections
            .iter()
            .filter(|section| section.section_id == item.pronunciation_section_id)
            .flat_map(|section| &section.entries)
            .collect();
        if !linked.is_empty() {
            return linked;
        }
    }

    sections
        .iter()
        .filter(|section| section.section_id.is_empty())
        .flat_map(|section| &section.entries)
        .filter(|entry| entry.entry == item.word)
        .collect()
}

/// The first recording carries the transcriptions, further recordings
/// become audio-only pronunciations
fn map_pronunciation(entry: &XfPronunciationEntry) -> Vec<Pronunciation> {
    let transcriptions: Vec<String> = entry
        .textual
        .iter()
        .map(|t| t.pronunciation.clone())
        .filter(|t| !t.is_empty())
        .collect();

    let mut audio = entry.audio_files.iter().filter(|a| !a.link.is_empty());
    let mut result = vec![match audio.next() {
        Some(first) => Pronunciation {
            audio_url: Some(first.link.clone()),
            regions: labels(&first.label),
            transcriptions,
        },
        None => Pronunciation {
            transcriptions,
            ..Default::default()
        },
    }];
    result.extend(audio.map(|a| Pronunciation {
        audio_url: Some(a.link.clone()),
        regions: labels(&a.label),
        transcriptions: Vec::new(),
    }));
    result
}

fn labels(label: &str) -> Vec<String> {
    if label.is_empty() {
        Vec::new()
    } else {
        vec![label.to_string()]
    }
}

fn map_definition(definition: XfDefinition) -> SenseDefinition {
    SenseDefinition {
        definition: definition.definition,
        examples: definition.examples,
        synonyms: definition.synonyms.into_iter().collect(),
        antonyms: definition.antonyms.into_iter().collect(),
    }
}
