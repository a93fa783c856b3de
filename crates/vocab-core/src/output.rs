use vocab_types::{Fragment, OutputBlock};

/// Chat transport limit for a single message
pub const MAX_BLOCK_LEN: usize = 4096;

pub const NOTHING_FOUND: &str = "Nothing has been found ... \u{1f61e}";

/// Length as the chat transport counts it, in UTF-16 code units
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Packs rendered fragments into messages no longer than `max_len`.
///
/// Fragments are whole lines and are never split, except for a single line
/// that alone is longer than a block.
#[derive(Debug, Clone)]
pub struct OutputBuilder {
    max_len: usize,
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new(MAX_BLOCK_LEN)
    }
}

impl OutputBuilder {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
        }
    }

    pub fn build(&self, fragments: Vec<Fragment>) -> Vec<OutputBlock> {
        if fragments.is_empty() {
            return vec![OutputBlock {
                text: NOTHING_FOUND.to_string(),
                ..Default::default()
            }];
        }

        let mut blocks = Vec::new();
        let mut current = OutputBlock::default();
        let mut current_len = 0;

        for fragment in fragments {
            let pieces = if text_len(&fragment.text) > self.max_len {
                split_oversized(&fragment.text, self.max_len)
            } else {
                vec![fragment.text]
            };

            for piece in pieces {
                let len = text_len(&piece);
                if current_len + len >= self.max_len && current_len > 0 {
                    blocks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.text.push_str(&piece);
                current_len += len;
            }

            // An oversized line keeps its token with the block holding its tail
            if let Some(binding) = fragment.binding {
                current.bindings.insert(binding.token, binding.unit);
            }
        }

        if current_len > 0 || !current.bindings.is_empty() {
            blocks.push(current);
        }

        tracing::debug!(blocks = blocks.len(), "output built");
        blocks
    }
}

/// Cut a line longer than `max_len` into pieces that fit, preferring the last
/// space outside a markup tag and never cutting inside a tag or an entity.
/// Elements open at a cut are closed at the end of the piece and reopened at
/// the start of the next one, so every piece is well-formed on its own.
fn split_oversized(text: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut reopen = String::new();
    let mut rest = text;

    while text_len(&reopen) + text_len(rest) > max_len {
        let room = max_len.saturating_sub(text_len(&reopen)).max(1);
        let mut budget = room;
        let (cut, open, closers) = loop {
            let cut = cut_point(rest, budget);
            let open = open_elements(&format!("{reopen}{}", &rest[..cut]));
            let closers: String = open
                .iter()
                .rev()
                .map(|(name, _)| format!("</{name}>"))
                .collect();
            let len = text_len(&rest[..cut]) + text_len(&closers);
            if len <= room || budget == 1 {
                break (cut, open, closers);
            }
            budget = budget.saturating_sub(len - room).max(1);
        };

        pieces.push(format!("{reopen}{}{closers}", &rest[..cut]));
        reopen = open.into_iter().map(|(_, tag)| tag).collect();
        rest = &rest[cut..];
    }

    if !rest.is_empty() {
        pieces.push(format!("{reopen}{rest}"));
    }
    pieces
}

/// Elements left open at the end of `html`, outermost first, as
/// (name, opening tag)
fn open_elements(html: &str) -> Vec<(String, String)> {
    let mut open: Vec<(String, String)> = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        let tag = &rest[start..=start + len];
        let inner = &tag[1..tag.len() - 1];
        if let Some(name) = inner.strip_prefix('/') {
            if let Some(pos) = open.iter().rposition(|(open_name, _)| open_name == name.trim()) {
                open.truncate(pos);
            }
        } else {
            let name = inner.split_whitespace().next().unwrap_or_default();
            if !name.is_empty() {
                open.push((name.to_string(), tag.to_string()));
            }
        }
        rest = &rest[start + len + 1..];
    }
    open
}

/// Byte index to cut at, such that `text[..cut]` fits into `max_len` units
fn cut_point(text: &str, max_len: usize) -> usize {
    let mut units = 0;
    let mut in_tag = false;
    let mut in_entity = false;
    let mut last_space = None;
    let mut last_safe = None;

    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_len {
            break;
        }
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '&' => in_entity = true,
            ';' => in_entity = false,
            _ => {}
        }
        if in_tag || in_entity {
            continue;
        }
        let end = idx + c.len_utf8();
        last_safe = Some(end);
        if c == ' ' {
            last_space = Some(end);
        }
    }

    last_space
        .or(last_safe)
        .filter(|cut| *cut > 0)
        .unwrap_or_else(|| {
            // No safe point at all, fall back to the widest char boundary
            let mut units = 0;
            let mut end = 0;
            for (idx, c) in text.char_indices() {
                units += c.len_utf16();
                if units > max_len {
                    break;
                }
                end = idx + c.len_utf8();
            }
            end.max(text.chars().next().map_or(text.len(), char::len_utf8))
        })
}
