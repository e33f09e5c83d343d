//! Token classification for JSON shown in the response editor.
//!
//! The highlighter never rejects input: text that is not valid JSON is still
//! split, and anything unrecognised comes out as [`JsonTokenKind::Plain`].
//! Concatenating the token texts gives back the input.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static JSON_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<string>"(?:\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*")(?P<colon>\s*:)?"#,
        r"|\b(?P<literal>true|false|null)\b",
        r"|(?P<number>-?[0-9]+(?:\.[0-9]*)?(?:[eE][+\-]?[0-9]+)?)",
    ))
    .expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonTokenKind {
    Key,
    String,
    Number,
    Boolean,
    Null,
    Bracket,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JsonToken<'a> {
    pub kind: JsonTokenKind,
    pub text: &'a str,
}

impl<'a> JsonToken<'a> {
    fn new(kind: JsonTokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Splits plain text so that each of `{}[]` is its own bracket token.
fn push_plain<'a>(tokens: &mut Vec<JsonToken<'a>>, text: &'a str) {
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '{' | '}' | '[' | ']') {
            if start < i {
                tokens.push(JsonToken::new(JsonTokenKind::Plain, &text[start..i]));
            }
            tokens.push(JsonToken::new(JsonTokenKind::Bracket, &text[i..i + 1]));
            start = i + 1;
        }
    }
    if start < text.len() {
        tokens.push(JsonToken::new(JsonTokenKind::Plain, &text[start..]));
    }
}

/// Classifies `json` into keys, strings, numbers, booleans, nulls and
/// brackets. A string followed by `:` is a key; the colon stays plain.
pub fn highlight_json(json: &str) -> Vec<JsonToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in JSON_TOKEN.captures_iter(json) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_plain(&mut tokens, &json[last..whole.start()]);

        if let Some(string) = caps.name("string") {
            match caps.name("colon") {
                Some(colon) => {
                    tokens.push(JsonToken::new(JsonTokenKind::Key, string.as_str()));
                    push_plain(&mut tokens, colon.as_str());
                }
                None => tokens.push(JsonToken::new(JsonTokenKind::String, string.as_str())),
            }
        } else if let Some(literal) = caps.name("literal") {
            let kind = match literal.as_str() {
                "null" => JsonTokenKind::Null,
                _ => JsonTokenKind::Boolean,
            };
            tokens.push(JsonToken::new(kind, literal.as_str()));
        } else {
            tokens.push(JsonToken::new(JsonTokenKind::Number, whole.as_str()));
        }
        last = whole.end();
    }

    push_plain(&mut tokens, &json[last..]);
    tokens
}

/// Number of lines the editor gutter shows; empty text still has one.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
