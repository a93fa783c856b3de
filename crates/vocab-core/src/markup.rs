//! Provider escape tokens to chat HTML.
//!
//! Dictionary text carries inline directives in curly braces (`{b}`, `{it}`,
//! `{dx_def}`, `{a_link|fox}`). They are kept verbatim by the parsers and only
//! rewritten here, once the text has been assembled.

/// Ordered table of plain tokens and their replacement
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("b", "<b>"),
    ("/b", "</b>"),
    ("bc", "<b>: </b>"),
    ("it", "<i>"),
    ("/it", "</i>"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("sc", ""),
    ("/sc", ""),
    ("inf", " [^"),
    ("/inf", "] "),
    ("sup", " [_"),
    ("/sup", "] "),
    ("gloss", "["),
    ("/gloss", "]"),
    ("parahw", "<b>"),
    ("/parahw", "</b>"),
    ("phrase", "<b><i>"),
    ("/phrase", "</i></b>"),
    ("qword", "<i>\""),
    ("/qword", "\"</i>"),
    ("wi", "<b><i>"),
    ("/wi", "</i></b>"),
    ("dx", "\u{2014} "),
    ("/dx", ""),
    ("dx_def", "("),
    ("/dx_def", ")"),
    ("dx_ety", "\u{2014} "),
    ("/dx_ety", ""),
    ("ma", "\u{2014} more at "),
    ("/ma", ""),
];

/// Tokens whose first pipe-delimited argument is the text to display
const LINK_TOKENS: &[&str] = &["a_link", "d_link", "et_link", "mat", "sx", "dxt"];

/// Same as [`LINK_TOKENS`] but shown in italics
const ITALIC_LINK_TOKENS: &[&str] = &["i_link"];

/// Escape text for the chat client's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every `{...}` token. Unknown tokens are dropped; a `{` without a
/// closing brace is left as is.
pub fn substitute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        out.push_str(&replacement(&after[..close]));
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Token-free text for plain-text output, with HTML tags dropped
pub fn plain_text(text: &str) -> String {
    let html = substitute(&escape_html(text));
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

fn replacement(token: &str) -> String {
    let mut args = token.split('|');
    let name = args.next().unwrap_or_default();

    if let Some((_, value)) = SUBSTITUTIONS.iter().find(|(key, _)| *key == name) {
        return value.to_string();
    }

    let display = args.next().unwrap_or_default();
    if LINK_TOKENS.contains(&name) {
        return display.to_string();
    }
    if ITALIC_LINK_TOKENS.contains(&name) {
        return format!("<i>{display}</i>");
    }

    String::new()
}
