//! Merriam-Webster Collegiate JSON, as far as lookups need it.
//!
//! The top level is an array. Known words give entry objects; unknown words
//! give an array of spelling suggestions (plain strings).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::tagged::{TaggedSeq, TaggedVariant, payload};

#[derive(Debug, Default)]
pub struct MerriamWebsterResponse {
    pub entries: Vec<MwEntry>,
    pub suggestions: Vec<String>,
}

impl<'de> Deserialize<'de> for MerriamWebsterResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Item {
            Suggestion(String),
            Entry(Box<MwEntry>),
        }

        let items = Vec::<Item>::deserialize(deserializer)?;
        let mut response = MerriamWebsterResponse::default();
        for item in items {
            match item {
                Item::Suggestion(s) => response.suggestions.push(s),
                Item::Entry(entry) => response.entries.push(*entry),
            }
        }
        Ok(response)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MwEntry {
    pub meta: MwMeta,
    pub hwi: MwHeadwordInfo,
    /// Functional label, i.e. part of speech
    pub fl: String,
    pub def: Vec<MwDefinitionSection>,
    pub shortdef: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MwMeta {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MwHeadwordInfo {
    pub hw: String,
    pub prs: Vec<MwPronunciation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MwPronunciation {
    /// Written pronunciation in Merriam-Webster notation
    pub mw: String,
    pub sound: Option<MwSound>,
    /// Label before the pronunciation, e.g. "British"
    pub l: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MwSound {
    pub audio: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MwDefinitionSection {
    /// Verb divider, e.g. "transitive verb"
    pub vd: Option<String>,
    pub sseq: Vec<SenseSequenceItem>,
}

/// One element of `sseq`, grouped by kind
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SenseSequenceItem {
    pub binding_substitution: Option<MwSense>,
    pub parenthesized: Vec<ParenthesizedSequence>,
    pub senses: Vec<MwSense>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SenseSequenceTuple {
    Sense(MwSense),
    BindingSubstitution(MwSense),
    Parenthesized(ParenthesizedSequence),
}

impl TaggedVariant for SenseSequenceTuple {
    fn decode(tag: &str, value: Value) -> Option<Result<Self, serde_json::Error>> {
        match tag {
            "sense" => Some(payload(value).map(Self::Sense)),
            "bs" => Some(
                payload::<BindingSubstitution>(value).map(|bs| Self::BindingSubstitution(bs.sense)),
            ),
            "pseq" => Some(payload(value).map(Self::Parenthesized)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for SenseSequenceItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tuples = TaggedSeq::<SenseSequenceTuple>::deserialize(deserializer)?;
        let mut item = SenseSequenceItem::default();
        for tuple in tuples {
            match tuple {
                SenseSequenceTuple::Sense(sense) => item.senses.push(sense),
                SenseSequenceTuple::BindingSubstitution(sense) => {
                    item.binding_substitution.get_or_insert(sense);
                }
                SenseSequenceTuple::Parenthesized(pseq) => item.parenthesized.push(pseq),
            }
        }
        Ok(item)
    }
}

#[derive(Debug, Deserialize)]
struct BindingSubstitution {
    sense: MwSense,
}

/// A `pseq` group: an optional binding substitution and its senses
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParenthesizedSequence {
    pub binding_substitution: Option<MwSense>,
    pub senses: Vec<MwSense>,
}

#[derive(Debug, Clone, PartialEq)]
enum ParenthesizedTuple {
    Sense(MwSense),
    BindingSubstitution(MwSense),
}

impl TaggedVariant for ParenthesizedTuple {
    fn decode(tag: &str, value: Value) -> Option<Result<Self, serde_json::Error>> {
        match tag {
            "sense" => Some(payload(value).map(Self::Sense)),
            "bs" => Some(
                payload::<BindingSubstitution>(value).map(|bs| Self::BindingSubstitution(bs.sense)),
            ),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ParenthesizedSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tuples = TaggedSeq::<ParenthesizedTuple>::deserialize(deserializer)?;
        let mut pseq = ParenthesizedSequence::default();
        for tuple in tuples {
            match tuple {
                ParenthesizedTuple::Sense(sense) => pseq.senses.push(sense),
                ParenthesizedTuple::BindingSubstitution(sense) => {
                    pseq.binding_substitution.get_or_insert(sense);
                }
            }
        }
        Ok(pseq)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MwSense {
    /// Sense number, e.g. "1 a" or "(2)"
    pub sn: Option<String>,
    pub dt: TaggedSeq<DefiningText>,
    /// Divided sense, e.g. "also" followed by more defining text
    pub sdsense: Option<MwDividedSense>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MwDividedSense {
    pub sd: String,
    pub dt: TaggedSeq<DefiningText>,
}

/// Elements of a defining text (`dt`)
#[derive(Debug, Clone, PartialEq)]
pub enum DefiningText {
    Text(String),
    Examples(Vec<VerbalIllustration>),
    UsageNotes(Vec<TaggedSeq<NoteContent>>),
    SupplementalNote(TaggedSeq<NoteContent>),
}

impl TaggedVariant for DefiningText {
    fn decode(tag: &str, value: Value) -> Option<Result<Self, serde_json::Error>> {
        match tag {
            "text" => Some(payload(value).map(Self::Text)),
            "vis" => Some(payload(value).map(Self::Examples)),
            "uns" => Some(payload(value).map(Self::UsageNotes)),
            "snote" => Some(payload(value).map(Self::SupplementalNote)),
            _ => None,
        }
    }
}

/// Contents of usage notes (`uns`) and supplemental notes (`snote`)
#[derive(Debug, Clone, PartialEq)]
pub enum NoteContent {
    Text(String),
    Examples(Vec<VerbalIllustration>),
}

impl TaggedVariant for NoteContent {
    fn decode(tag: &str, value: Value) -> Option<Result<Self, serde_json::Error>> {
        match tag {
            // usage notes say "text", supplemental notes say "t"
            "text" | "t" => Some(payload(value).map(Self::Text)),
            "vis" => Some(payload(value).map(Self::Examples)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerbalIllustration {
    pub t: String,
}
