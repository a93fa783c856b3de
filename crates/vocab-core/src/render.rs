use std::collections::HashSet;

use vocab_types::{
    DictionaryResponse, Entry, Fragment, Lexeme, Pronunciation, SaveBinding, SenseDefinition,
    TrainingUnit,
};

use crate::markup::{escape_html, substitute};
use crate::token::new_save_token;

pub const DEFAULT_MAX_SENSES: usize = 5;
pub const DEFAULT_MAX_EXAMPLES: usize = 3;

/// Turns the canonical model into chat HTML, one fragment per line.
///
/// Per entry: headword, pronunciations, a blank line, then for each lexeme its
/// header and the first `max_senses` senses (definition bound to a fresh
/// save-token, antonyms, synonyms, first `max_examples` examples).
#[derive(Debug, Clone)]
pub struct Renderer {
    max_senses: usize,
    max_examples: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SENSES, DEFAULT_MAX_EXAMPLES)
    }
}

impl Renderer {
    pub fn new(max_senses: usize, max_examples: usize) -> Self {
        Self {
            max_senses,
            max_examples,
        }
    }

    pub fn render(&self, response: &DictionaryResponse) -> Vec<Fragment> {
        // Escape tokens are rewritten only once every line is assembled. A
        // token never spans two lines, so this matches rewriting the joined text.
        self.render_raw(response)
            .into_iter()
            .map(|fragment| Fragment {
                text: substitute(&fragment.text),
                binding: fragment.binding,
            })
            .collect()
    }

    fn render_raw(&self, response: &DictionaryResponse) -> Vec<Fragment> {
        let mut lines = LineWriter::default();
        for entry in &response.entries {
            self.render_entry(entry, &mut lines);
        }
        lines.fragments
    }

    fn render_entry(&self, entry: &Entry, lines: &mut LineWriter) {
        lines.push(format!("\u{25ab}\u{fe0f}<b>{}</b>\n", escape_html(&entry.item)));

        for pronunciation in entry.pronunciations.iter().filter(|p| p.is_renderable()) {
            lines.push(pronunciation_line(pronunciation));
        }

        lines.push("\n".to_string());

        for lexeme in &entry.lexemes {
            self.render_lexeme(&entry.item, lexeme, lines);
        }
    }

    fn render_lexeme(&self, item: &str, lexeme: &Lexeme, lines: &mut LineWriter) {
        let lemma = escape_html(&lexeme.lemma);
        if lexeme.part_of_speech.is_empty() {
            lines.push(format!("{lemma}\n"));
        } else {
            lines.push(format!(
                "{lemma} (<i>{}</i>)\n",
                escape_html(&lexeme.part_of_speech)
            ));
        }

        for sense in lexeme.senses.iter().take(self.max_senses) {
            self.render_sense(item, sense, lines);
        }
    }

    fn render_sense(&self, item: &str, sense: &SenseDefinition, lines: &mut LineWriter) {
        let token = lines.issue_token();
        let text = format!("<b>def</b> {} {token}\n", escape_html(&sense.definition));
        lines.push_bound(
            text,
            SaveBinding {
                token,
                unit: TrainingUnit::new(item, sense.clone()),
            },
        );

        if !sense.antonyms.is_empty() {
            lines.push(format!("<b>ant</b> {}\n", join_escaped(&sense.antonyms)));
        }

        if !sense.synonyms.is_empty() {
            lines.push(format!("<b>syn</b> {}\n", join_escaped(&sense.synonyms)));
        }

        for example in sense.examples.iter().take(self.max_examples) {
            lines.push(format!("<b>ex</b> {}\n", escape_html(example)));
        }
    }
}

/// Concatenated text of rendered fragments
pub fn render_text(fragments: &[Fragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

fn pronunciation_line(pronunciation: &Pronunciation) -> String {
    let mut line = pronunciation
        .regions
        .iter()
        .map(|r| escape_html(r))
        .collect::<Vec<_>>()
        .join(", ");

    if let Some(url) = pronunciation.audio_url.as_deref().filter(|u| !u.is_empty()) {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!(
            "(<a href=\"{}\">\u{1f3a7} listen</a>)",
            escape_html(url).replace('"', "&quot;")
        ));
    }

    let transcriptions: Vec<String> = pronunciation
        .transcriptions
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| escape_html(t))
        .collect();
    if !transcriptions.is_empty() {
        if !line.is_empty() {
            line.push_str(": ");
        }
        line.push_str(&transcriptions.join("; "));
    }

    line.push('\n');
    line
}

fn join_escaped<'a>(words: impl IntoIterator<Item = &'a String>) -> String {
    words
        .into_iter()
        .map(|w| escape_html(w))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Default)]
struct LineWriter {
    fragments: Vec<Fragment>,
    issued: HashSet<String>,
}

impl LineWriter {
    fn push(&mut self, text: String) {
        self.fragments.push(Fragment::plain(text));
    }

    fn push_bound(&mut self, text: String, binding: SaveBinding) {
        self.fragments.push(Fragment::bound(text, binding));
    }

    /// A save-token not yet used in this render
    fn issue_token(&mut self) -> String {
        loop {
            let token = new_save_token();
            if self.issued.insert(token.clone()) {
                return token;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vocab_types::Entry;

    use super::*;

    fn sense(definition: &str, examples: usize) -> SenseDefinition {
        SenseDefinition {
            definition: definition.to_string(),
            examples: (0..examples).map(|i| format!("example {i}")).collect(),
            ..Default::default()
        }
    }

    fn single_lexeme(senses: Vec<SenseDefinition>) -> DictionaryResponse {
        DictionaryResponse::new(vec![Entry {
            item: "fox".into(),
            pronunciations: vec![],
            lexemes: vec![Lexeme {
                lemma: "fox".into(),
                part_of_speech: "noun".into(),
                senses,
            }],
        }])
    }

    fn count_prefix(fragments: &[Fragment], prefix: &str) -> usize {
        fragments.iter().filter(|f| f.text.starts_with(prefix)).count()
    }

    #[test]
    fn caps_senses_at_five() {
        let senses = (0..8).map(|i| sense(&format!("sense {i}"), 0)).collect();
        let fragments = Renderer::default().render(&single_lexeme(senses));

        assert_eq!(count_prefix(&fragments, "<b>def</b>"), 5);
        assert_eq!(fragments.iter().filter(|f| f.binding.is_some()).count(), 5);
        let text = render_text(&fragments);
        assert!(text.contains("sense 4"));
        assert!(!text.contains("sense 5"));
        assert!(!text.contains("..."));
    }

    #[test]
    fn caps_examples_at_three() {
        let fragments = Renderer::default().render(&single_lexeme(vec![sense("a fox", 7)]));
        assert_eq!(count_prefix(&fragments, "<b>ex</b>"), 3);
        assert!(!render_text(&fragments).contains("example 3"));
    }

    #[test]
    fn definition_tokens_are_substituted() {
        let fragments =
            Renderer::default().render(&single_lexeme(vec![sense("{b}fox{/b} {it}n.{/it}", 0)]));
        let def = fragments
            .iter()
            .find(|f| f.binding.is_some())
            .unwrap();
        let token = &def.binding.as_ref().unwrap().token;
        assert_eq!(
            def.text,
            format!("<b>def</b> <b>fox</b> <i>n.</i> {token}\n")
        );
    }

    #[test]
    fn substitution_per_line_matches_whole_text() {
        let mut s = sense("{bc}a {d_link|carnivorous|x} animal", 2);
        s.examples.push("the {wi}fox{/wi} ran".into());
        s.synonyms.insert("{it}vulpine{/it}".into());
        let response = single_lexeme(vec![s]);

        let raw = Renderer::default().render_raw(&response);
        let whole = substitute(&render_text(&raw));
        let per_line: String = raw.iter().map(|f| substitute(&f.text)).collect();
        assert_eq!(whole, per_line);
        assert!(!whole.contains('{'));
        assert!(whole.contains("<b><i>fox</i></b>"));
    }

    #[test]
    fn line_order_for_a_sense() {
        let mut s = sense("quick", 1);
        s.synonyms.insert("swift".into());
        s.antonyms.insert("slow".into());
        let mut response = single_lexeme(vec![s]);
        response.entries[0].pronunciations = vec![
            Pronunciation {
                audio_url: Some("https://a.example/fox.mp3".into()),
                regions: vec!["US".into(), "CA".into()],
                transcriptions: vec!["fɑks (IPA)".into()],
            },
            Pronunciation::default(),
        ];

        let fragments = Renderer::default().render(&response);
        let token = fragments[4].binding.as_ref().unwrap().token.clone();
        let def_line = format!("<b>def</b> quick {token}\n");
        let lines: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            lines,
            vec![
                "\u{25ab}\u{fe0f}<b>fox</b>\n",
                "US, CA (<a href=\"https://a.example/fox.mp3\">\u{1f3a7} listen</a>): fɑks (IPA)\n",
                "\n",
                "fox (<i>noun</i>)\n",
                def_line.as_str(),
                "<b>ant</b> slow\n",
                "<b>syn</b> swift\n",
                "<b>ex</b> example 0\n",
            ]
        );
    }

    #[test]
    fn provider_html_is_escaped() {
        let fragments =
            Renderer::default().render(&single_lexeme(vec![sense("R&D <lab>", 0)]));
        assert!(render_text(&fragments).contains("R&amp;D &lt;lab&gt;"));
    }

    #[test]
    fn tokens_are_unique_within_a_render() {
        let senses = (0..5).map(|i| sense(&i.to_string(), 0)).collect();
        let fragments = Renderer::default().render(&single_lexeme(senses));
        let tokens: HashSet<_> = fragments
            .iter()
            .filter_map(|f| f.binding.as_ref().map(|b| b.token.clone()))
            .collect();
        assert_eq!(tokens.len(), 5);
    }
}
