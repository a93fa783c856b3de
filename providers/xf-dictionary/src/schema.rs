//! XF English Dictionary `/v1/dictionary` response.
//!
//! Pronunciations live beside the items, grouped into sections that items
//! point at through `pronunciationSectionID`.
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct XfResponse {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub items: Vec<XfItem>,
    #[serde(default)]
    pub pronunciations: Vec<XfPronunciationSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XfItem {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<XfDefinition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default, rename = "pronunciationSectionID")]
    pub pronunciation_section_id: String,
    #[serde(default)]
    pub phrases: Vec<XfPhrase>,
}

#[derive(Debug, Deserialize)]
pub struct XfDefinition {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XfPhrase {
    #[serde(default)]
    pub phrase: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<XfDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct XfPronunciationSection {
    #[serde(default, rename = "sectionID")]
    pub section_id: String,
    #[serde(default)]
    pub entries: Vec<XfPronunciationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XfPronunciationEntry {
    #[serde(default)]
    pub entry: String,
    #[serde(default, rename = "audioFiles")]
    pub audio_files: Vec<XfAudio>,
    #[serde(default)]
    pub textual: Vec<XfTextual>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XfAudio {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XfTextual {
    #[serde(default)]
    pub pronunciation: String,
}
