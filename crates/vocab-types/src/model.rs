//! Canonical dictionary model shared by every provider.
//!
//! Providers decode their own JSON shape and map it onto these types; the
//! renderer only ever sees this representation.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Highest spaced-repetition iteration a unit can reach
pub const MAX_ITERATION: u32 = 7;

/// Normalized result of one lookup, entries kept in provider order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryResponse {
    pub entries: Vec<Entry>,
}

impl DictionaryResponse {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One headword's full record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub item: String,
    pub pronunciations: Vec<Pronunciation>,
    pub lexemes: Vec<Lexeme>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pronunciation {
    pub audio_url: Option<String>,
    /// Region labels such as "US" or "UK"
    pub regions: Vec<String>,
    /// Already formatted as `"<ipa> (<notation>)"`
    pub transcriptions: Vec<String>,
}

impl Pronunciation {
    /// A pronunciation with neither audio nor transcriptions has nothing to show
    pub fn is_renderable(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|url| !url.is_empty())
            || self.transcriptions.iter().any(|t| !t.is_empty())
    }
}

/// Part-of-speech grouping of senses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexeme {
    pub lemma: String,
    pub part_of_speech: String,
    pub senses: Vec<SenseDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseDefinition {
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: BTreeSet<String>,
    #[serde(default)]
    pub antonyms: BTreeSet<String>,
}

/// The unit a user can save for later review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingUnit {
    pub item: String,
    pub sense: SenseDefinition,
    pub iteration: u32,
}

impl TrainingUnit {
    pub fn new(item: impl Into<String>, sense: SenseDefinition) -> Self {
        Self {
            item: item.into(),
            sense,
            iteration: 1,
        }
    }

    /// Move to the next review iteration, saturating at [`MAX_ITERATION`]
    pub fn next_iteration(&mut self) {
        self.iteration = (self.iteration + 1).min(MAX_ITERATION);
    }
}

/// A save-token and the unit it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveBinding {
    pub token: String,
    pub unit: TrainingUnit,
}

/// One rendered line, the smallest piece the chunker may move between blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub binding: Option<SaveBinding>,
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            binding: None,
        }
    }

    pub fn bound(text: impl Into<String>, binding: SaveBinding) -> Self {
        Self {
            text: text.into(),
            binding: Some(binding),
        }
    }
}

/// One chat message worth of markup plus the save-tokens it introduced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBlock {
    pub text: String,
    pub bindings: HashMap<String, TrainingUnit>,
}
