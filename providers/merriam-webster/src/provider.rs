use vocab_config::providers::MerriamWebsterConfig;
use vocab_core::fetch::encode_path_segment;
use vocab_core::{FetchRequest, ParseError, Provider};
use vocab_types::{DictionaryResponse, Entry, Lexeme, Pronunciation, SenseDefinition};

use crate::schema::{
    DefiningText, MerriamWebsterResponse, MwDefinitionSection, MwEntry, MwPronunciation, MwSense,
    NoteContent, SenseSequenceItem,
};
use crate::tagged::TaggedSeq;

const NAME: &str = "merriam_webster";

#[derive(Clone)]
pub struct MerriamWebster {
    api_key: String,
    base_url: String,
    audio_url: String,
}

impl MerriamWebster {
    pub fn new(config: &MerriamWebsterConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            audio_url: config.audio_url.trim_end_matches('/').to_string(),
        }
    }

    fn map_entry(&self, entry: MwEntry) -> Option<Entry> {
        let mut item = entry.hwi.hw.replace('*', "");
        if item.is_empty() {
            item = entry.meta.id.split(':').next().unwrap_or_default().to_string();
        }
        if item.is_empty() {
            tracing::debug!("skipping entry without headword");
            return None;
        }

        let pronunciations = entry
            .hwi
            .prs
            .into_iter()
            .map(|p| self.map_pronunciation(p))
            .collect();

        let mut lexemes: Vec<Lexeme> = entry
            .def
            .into_iter()
            .map(|section| map_section(&item, &entry.fl, section))
            .collect();

        if lexemes.is_empty() && !entry.shortdef.is_empty() {
            lexemes.push(Lexeme {
                lemma: item.clone(),
                part_of_speech: entry.fl.clone(),
                senses: entry
                    .shortdef
                    .into_iter()
                    .map(|definition| SenseDefinition {
                        definition,
                        ..Default::default()
                    })
                    .collect(),
            });
        }

        Some(Entry {
            item,
            pronunciations,
            lexemes,
        })
    }

    fn map_pronunciation(&self, pronunciation: MwPronunciation) -> Pronunciation {
        let audio_url = pronunciation
            .sound
            .map(|s| s.audio)
            .filter(|file| !file.is_empty())
            .map(|file| {
                format!(
                    "{}/{}/{}.mp3",
                    self.audio_url,
                    audio_subdirectory(&file),
                    file
                )
            });

        let mut transcriptions = Vec::new();
        if !pronunciation.mw.is_empty() {
            transcriptions.push(format!("\\{}\\ (MW)", pronunciation.mw));
        }

        let mut regions = Vec::new();
        if !pronunciation.l.is_empty() {
            regions.push(pronunciation.l);
        }

        Pronunciation {
            audio_url,
            regions,
            transcriptions,
        }
    }
}

impl Provider for MerriamWebster {
    type Response = MerriamWebsterResponse;

    fn name(&self) -> &'static str {
        NAME
    }

    fn request(&self, term: &str) -> FetchRequest {
        FetchRequest::get(format!("{}/{}", self.base_url, encode_path_segment(term)))
            .query("key", &self.api_key)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Self::Response, ParseError> {
        serde_json::from_slice(bytes).map_err(|e| ParseError::new(NAME, e))
    }

    fn normalize(&self, response: Self::Response) -> DictionaryResponse {
        if response.entries.is_empty() && !response.suggestions.is_empty() {
            tracing::debug!(suggestions = response.suggestions.len(), "no exact match");
        }

        DictionaryResponse::new(
            response
                .entries
                .into_iter()
                .filter_map(|entry| self.map_entry(entry))
                .collect(),
        )
    }
}

/// Each definition section becomes a lexeme; a verb divider narrows the label
fn map_section(item: &str, fl: &str, section: MwDefinitionSection) -> Lexeme {
    let part_of_speech = section
        .vd
        .filter(|vd| !vd.is_empty())
        .unwrap_or_else(|| fl.to_string());

    let mut senses = Vec::new();
    for seq_item in section.sseq {
        flatten_sequence_item(seq_item, &mut senses);
    }

    Lexeme {
        lemma: item.to_string(),
        part_of_speech,
        senses: senses.into_iter().map(map_sense).collect(),
    }
}

/// Binding substitution first, then each parenthesized group (its own binding
/// substitution, then its senses), then the item's plain senses.
fn flatten_sequence_item(item: SenseSequenceItem, out: &mut Vec<MwSense>) {
    out.extend(item.binding_substitution);
    for pseq in item.parenthesized {
        out.extend(pseq.binding_substitution);
        out.extend(pseq.senses);
    }
    out.extend(item.senses);
}

fn map_sense(sense: MwSense) -> SenseDefinition {
    let mut definition = String::new();
    let mut examples = Vec::new();

    if let Some(sn) = sense.sn.filter(|sn| !sn.is_empty()) {
        definition.push_str(&format!("{{b}}{sn}{{/b}} "));
    }

    collect_defining_text(sense.dt, &mut definition, &mut examples);

    if let Some(divided) = sense.sdsense {
        definition.push_str(&format!("; {{it}}{}{{/it}} ", divided.sd));
        collect_defining_text(divided.dt, &mut definition, &mut examples);
    }

    SenseDefinition {
        definition: definition.trim().to_string(),
        examples,
        ..Default::default()
    }
}

fn collect_defining_text(
    dt: TaggedSeq<DefiningText>,
    definition: &mut String,
    examples: &mut Vec<String>,
) {
    for element in dt {
        match element {
            DefiningText::Text(text) => definition.push_str(&text),
            DefiningText::Examples(vis) => {
                examples.extend(vis.into_iter().map(|v| v.t).filter(|t| !t.is_empty()))
            }
            DefiningText::UsageNotes(notes) => {
                for note in notes {
                    collect_note(note, definition, examples);
                }
            }
            DefiningText::SupplementalNote(note) => collect_note(note, definition, examples),
        }
    }
}

fn collect_note(note: TaggedSeq<NoteContent>, definition: &mut String, examples: &mut Vec<String>) {
    for content in note {
        match content {
            NoteContent::Text(text) if !text.is_empty() => {
                definition.push_str(" \u{2014} ");
                definition.push_str(&text);
            }
            NoteContent::Text(_) => {}
            NoteContent::Examples(vis) => {
                examples.extend(vis.into_iter().map(|v| v.t).filter(|t| !t.is_empty()))
            }
        }
    }
}

/// Audio files are sharded by a subdirectory derived from the file name
pub fn audio_subdirectory(file: &str) -> String {
    if file.starts_with("bix") {
        return "bix".to_string();
    }
    if file.starts_with("gg") {
        return "gg".to_string();
    }
    match file.chars().next() {
        Some(c) if c.is_ascii_digit() || c.is_ascii_punctuation() => "number".to_string(),
        Some(c) => c.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FOX: &str = r#"[
      {
        "meta": {"id": "fox:1", "stems": ["fox", "foxes"], "offensive": false},
        "hwi": {
          "hw": "fox",
          "prs": [{"mw": "ˈfäks", "sound": {"audio": "fox00001"}}, {"mw": "", "l": "British"}]
        },
        "fl": "noun",
        "def": [{
          "sseq": [
            [["sense", {
              "sn": "1 a",
              "dt": [
                ["text", "{bc}any of various carnivorous mammals"],
                ["vis", [{"t": "a {wi}fox{/wi} in the henhouse"}]],
                ["uns", [[["text", "often used figuratively"], ["vis", [{"t": "sly as a fox"}]]]]]
              ]
            }],
            ["sense", {
              "sn": "b",
              "dt": [["text", "{bc}the fur of a fox"]],
              "sdsense": {"sd": "also", "dt": [["text", "a garment made of it"]]}
            }]],
            [["sense", {"sn": "2", "dt": [["text", "{bc}a clever crafty person"], ["snote", [["t", "compare {a_link|vixen}"], ["vis", [{"t": "an old fox"}]]]]]}]]
          ]
        }],
        "shortdef": ["any of various carnivorous mammals"]
      },
      {
        "meta": {"id": "fox:2"},
        "hwi": {"hw": "fox"},
        "fl": "verb",
        "def": [
          {"vd": "transitive verb", "sseq": [[["sense", {"sn": "1", "dt": [["text", "{bc}to trick by ingenuity"]]}]]]},
          {"vd": "intransitive verb", "sseq": [[["sense", {"dt": [["text", "{bc}to act slyly"]]}]]]}
        ]
      },
      {
        "meta": {"id": "Fox"},
        "hwi": {"hw": "Fox"},
        "fl": "noun",
        "shortdef": ["a member of an American Indian people"]
      }
    ]"#;

    fn provider() -> MerriamWebster {
        MerriamWebster::new(&MerriamWebsterConfig {
            api_key: "k".into(),
            ..Default::default()
        })
    }

    fn decode(json: &str) -> DictionaryResponse {
        let mw = provider();
        mw.normalize(mw.parse(json.as_bytes()).unwrap())
    }

    fn definitions(lexeme: &Lexeme) -> Vec<&str> {
        lexeme.senses.iter().map(|s| s.definition.as_str()).collect()
    }

    #[test]
    fn maps_full_response() {
        let response = decode(FOX);
        assert_eq!(response.entries.len(), 3);

        let noun = &response.entries[0];
        assert_eq!(noun.item, "fox");
        assert_eq!(
            noun.pronunciations[0],
            Pronunciation {
                audio_url: Some(
                    "https://media.merriam-webster.com/audio/prons/en/us/mp3/f/fox00001.mp3"
                        .into()
                ),
                regions: vec![],
                transcriptions: vec!["\\ˈfäks\\ (MW)".into()],
            }
        );
        assert!(!noun.pronunciations[1].is_renderable());

        let lexeme = &noun.lexemes[0];
        assert_eq!(lexeme.part_of_speech, "noun");
        assert_eq!(
            definitions(lexeme),
            vec![
                "{b}1 a{/b} {bc}any of various carnivorous mammals \u{2014} often used figuratively",
                "{b}b{/b} {bc}the fur of a fox; {it}also{/it} a garment made of it",
                "{b}2{/b} {bc}a clever crafty person \u{2014} compare {a_link|vixen}",
            ]
        );
        assert_eq!(
            lexeme.senses[0].examples,
            vec!["a {wi}fox{/wi} in the henhouse", "sly as a fox"]
        );
        assert_eq!(lexeme.senses[2].examples, vec!["an old fox"]);
    }

    #[test]
    fn verb_dividers_split_lexemes() {
        let verb = &decode(FOX).entries[1];
        let labels: Vec<&str> = verb.lexemes.iter().map(|l| l.part_of_speech.as_str()).collect();
        assert_eq!(labels, vec!["transitive verb", "intransitive verb"]);
        assert_eq!(definitions(&verb.lexemes[1]), vec!["{bc}to act slyly"]);
    }

    #[test]
    fn shortdef_fallback() {
        let people = &decode(FOX).entries[2];
        assert_eq!(people.lexemes.len(), 1);
        assert_eq!(
            definitions(&people.lexemes[0]),
            vec!["a member of an American Indian people"]
        );
    }

    #[test]
    fn binding_substitution_and_pseq_order() {
        let json = r#"[{
          "hwi": {"hw": "run"}, "fl": "verb",
          "def": [{"sseq": [[
            ["bs", {"sense": {"sn": "1", "dt": [["text", "bs"]]}}],
            ["sense", {"sn": "b", "dt": [["text", "top"]]}],
            ["pseq", [
              ["bs", {"sense": {"sn": "a", "dt": [["text", "pseq bs"]]}}],
              ["sense", {"sn": "(1)", "dt": [["text", "first"]]}],
              ["sense", {"sn": "(2)", "dt": [["text", "second"]]}]
            ]]
          ]]}]
        }]"#;
        let response = decode(json);
        assert_eq!(
            definitions(&response.entries[0].lexemes[0]),
            vec![
                "{b}1{/b} bs",
                "{b}a{/b} pseq bs",
                "{b}(1){/b} first",
                "{b}(2){/b} second",
                "{b}b{/b} top",
            ]
        );
    }

    #[test]
    fn malformed_and_unknown_tuples_are_skipped() {
        let good = |n: usize| format!(r#"["sense", {{"dt": [["text", "s{n}"]]}}]"#);
        let noise = [
            r#"["sen", {"dt": []}]"#,
            r#"["sense"]"#,
            r#"["sense", {"dt": []}, "extra"]"#,
            r#"["sense", 17]"#,
            r#""sense""#,
            r#"[1, 2]"#,
        ];

        for offset in 0..noise.len() {
            let mut tuples = Vec::new();
            for n in 0..4 {
                tuples.push(good(n));
                for k in 0..=n {
                    tuples.push(noise[(offset + n + k) % noise.len()].to_string());
                }
            }
            let json = format!(
                r#"[{{"hwi": {{"hw": "x"}}, "def": [{{"sseq": [[{}]]}}]}}]"#,
                tuples.join(",")
            );
            let response = decode(&json);
            assert_eq!(
                definitions(&response.entries[0].lexemes[0]),
                vec!["s0", "s1", "s2", "s3"]
            );
        }
    }

    #[test]
    fn suggestions_are_not_entries() {
        let response = decode(r#"["fix", "fax", "fox terrier"]"#);
        assert!(response.is_empty());
    }

    #[test]
    fn unexpected_top_level_is_parse_error() {
        let err = provider().parse(br#"{"error": "bad key"}"#).unwrap_err();
        assert_eq!(err.provider, "merriam_webster");
        assert!(provider().parse(b"<html>").is_err());
    }

    #[test]
    fn headword_markers_are_stripped() {
        let response = decode(r#"[{"meta": {"id": "fox*trot:1"}, "hwi": {"hw": "fox*trot"}, "fl": "noun"}]"#);
        assert_eq!(response.entries[0].item, "foxtrot");
        assert!(response.entries[0].lexemes.is_empty());

        let response = decode(r#"[{"meta": {"id": "vixen:2"}, "fl": "noun"}]"#);
        assert_eq!(response.entries[0].item, "vixen");
    }

    #[test]
    fn audio_subdirectories() {
        assert_eq!(audio_subdirectory("bixabc01"), "bix");
        assert_eq!(audio_subdirectory("ggxyz001"), "gg");
        assert_eq!(audio_subdirectory("3d000001"), "number");
        assert_eq!(audio_subdirectory("_fox0001"), "number");
        assert_eq!(audio_subdirectory("vixen001"), "v");
    }

    #[test]
    fn request_url() {
        let request = provider().request("fox terrier");
        assert_eq!(
            request.url,
            "https://dictionaryapi.com/api/v3/references/collegiate/json/fox%20terrier"
        );
        assert_eq!(request.query, vec![("key".to_string(), "k".to_string())]);
    }
}
