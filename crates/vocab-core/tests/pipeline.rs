//! Render -> chunk -> cache, the way a lookup reply is produced

use std::time::Duration;

use vocab_core::output::{OutputBuilder, text_len};
use vocab_core::render::{Renderer, render_text};
use vocab_core::{TokenCache, TokenNotFound};
use vocab_types::{DictionaryResponse, Entry, Lexeme, Pronunciation, SenseDefinition};

fn fox() -> DictionaryResponse {
    DictionaryResponse::new(vec![Entry {
        item: "fox".into(),
        pronunciations: vec![Pronunciation {
            audio_url: None,
            regions: vec![],
            transcriptions: vec!["fɒks".into()],
        }],
        lexemes: vec![Lexeme {
            lemma: "fox".into(),
            part_of_speech: "noun".into(),
            senses: vec![
                SenseDefinition {
                    definition: "a wild carnivorous mammal".into(),
                    examples: vec![
                        "the fox ran".into(),
                        "a red fox".into(),
                        "fox hunting".into(),
                        "foxes everywhere".into(),
                    ],
                    ..Default::default()
                },
                SenseDefinition {
                    definition: "a cunning person".into(),
                    ..Default::default()
                },
            ],
        }],
    }])
}

#[tokio::test]
async fn fox_renders_into_one_block_with_two_tokens() {
    let fragments = Renderer::default().render(&fox());
    let blocks = OutputBuilder::default().build(fragments);
    assert_eq!(blocks.len(), 1);

    let block = &blocks[0];
    let lines: Vec<&str> = block.text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines[0].contains("fox"));
    assert_eq!(lines[1], "fɒks");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "fox (<i>noun</i>)");
    assert!(lines[4].starts_with("<b>def</b> a wild carnivorous mammal /save_"));
    assert_eq!(lines[5], "<b>ex</b> the fox ran");
    assert_eq!(lines[6], "<b>ex</b> a red fox");
    assert_eq!(lines[7], "<b>ex</b> fox hunting");
    assert!(lines[8].starts_with("<b>def</b> a cunning person /save_"));

    assert_eq!(block.bindings.len(), 2);
    for (token, unit) in &block.bindings {
        assert!(block.text.contains(token.as_str()));
        assert_eq!(unit.item, "fox");
        assert_eq!(unit.iteration, 1);
    }

    let cache = TokenCache::new(Duration::from_secs(3600));
    cache.put(7, block.bindings.clone()).await;
    assert_eq!(cache.len().await, 2);

    let (token, expected) = block
        .bindings
        .iter()
        .find(|(_, unit)| unit.sense.definition == "a cunning person")
        .unwrap();
    assert_eq!(&cache.resolve(7, token).await.unwrap(), expected);
    assert_eq!(
        cache.resolve(7, token).await,
        Err(TokenNotFound {
            token: token.clone()
        })
    );
}

#[test]
fn large_response_chunks_losslessly() {
    let mut response = fox();
    let lexeme = response.entries[0].lexemes[0].clone();
    for i in 0..60 {
        let mut entry = response.entries[0].clone();
        entry.item = format!("fox {i}");
        entry.lexemes = vec![lexeme.clone(); 3];
        response.entries.push(entry);
    }

    let renderer = Renderer::default();
    let fragments = renderer.render(&response);
    let unchunked = render_text(&fragments);
    let sense_lines = fragments.iter().filter(|f| f.binding.is_some()).count();

    let blocks = OutputBuilder::default().build(fragments);
    assert!(blocks.len() > 1);
    assert!(blocks.iter().all(|b| text_len(&b.text) <= 4096));
    assert_eq!(
        blocks.iter().map(|b| b.text.as_str()).collect::<String>(),
        unchunked
    );
    assert_eq!(
        blocks.iter().map(|b| b.bindings.len()).sum::<usize>(),
        sense_lines
    );
}
