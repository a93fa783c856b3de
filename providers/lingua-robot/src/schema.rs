//! Lingua Robot `entries` response, fields we don't use are ignored
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LinguaRobotResponse {
    #[serde(default)]
    pub entries: Vec<LrEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LrEntry {
    pub entry: String,
    #[serde(default)]
    pub pronunciations: Vec<LrPronunciation>,
    #[serde(default)]
    pub lexemes: Vec<LrLexeme>,
}

#[derive(Debug, Deserialize)]
pub struct LrPronunciation {
    #[serde(default)]
    pub transcriptions: Vec<LrTranscription>,
    pub audio: Option<LrAudio>,
    pub context: Option<LrContext>,
}

#[derive(Debug, Deserialize)]
pub struct LrTranscription {
    pub transcription: String,
    #[serde(default)]
    pub notation: String,
}

#[derive(Debug, Deserialize)]
pub struct LrAudio {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct LrContext {
    #[serde(default)]
    pub regions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrLexeme {
    pub lemma: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub senses: Vec<LrSense>,
}

#[derive(Debug, Deserialize)]
pub struct LrSense {
    #[serde(default)]
    pub definition: String,
    #[serde(default, rename = "usageExamples")]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}
