use percent_encoding::percent_decode_str;
use winnow::combinator::{opt, preceded, separated};
use winnow::token::take_till;
use winnow::{ModalResult, Parser};

use crate::curl::KeyValue;

/// A url cut into its base (origin and path) and its query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitUrl {
    pub base: String,
    pub params: Vec<KeyValue>,
}

/// Why the structured url parser was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Invalid(url::ParseError),
    /// Parsed, but without a host, e.g. `localhost:8080/a` read as scheme
    /// `localhost`. Its origin would be opaque.
    NoHost,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::Invalid(e) => write!(f, "{e}"),
            FallbackReason::NoHost => f.write_str("url has no host"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    Structured(SplitUrl),
    Fallback {
        split: SplitUrl,
        reason: FallbackReason,
    },
}

impl UrlOutcome {
    pub fn is_structured(&self) -> bool {
        matches!(self, UrlOutcome::Structured(_))
    }

    pub fn into_split(self) -> SplitUrl {
        match self {
            UrlOutcome::Structured(split) | UrlOutcome::Fallback { split, .. } => split,
        }
    }
}

/// Splits a url token. A url the WHATWG parser accepts (and that has a
/// host) is reduced to `origin + path` with its decoded query pairs;
/// anything else is split by hand on the first `?`.
pub fn split_url(raw: &str) -> UrlOutcome {
    match structured_split(raw) {
        Ok(split) => UrlOutcome::Structured(split),
        Err(reason) => UrlOutcome::Fallback {
            split: manual_split(raw),
            reason,
        },
    }
}

fn structured_split(raw: &str) -> Result<SplitUrl, FallbackReason> {
    let parsed = url::Url::parse(raw).map_err(FallbackReason::Invalid)?;
    if parsed.host().is_none() {
        return Err(FallbackReason::NoHost);
    }

    let base = format!("{}{}", parsed.origin().ascii_serialization(), parsed.path());
    let params = parsed
        .query_pairs()
        .map(|(key, value)| KeyValue::new(key, value))
        .collect();
    Ok(SplitUrl { base, params })
}

/// Everything before the first `?` is kept verbatim.
pub fn manual_split(raw: &str) -> SplitUrl {
    match raw.split_once('?') {
        Some((base, query)) => SplitUrl {
            base: base.into(),
            params: parse_query_string(query),
        },
        None => SplitUrl {
            base: raw.into(),
            params: Vec::new(),
        },
    }
}

/// `key` or `key=value`, the value running to the next `&`.
fn parse_pair<'a>(s: &mut &'a str) -> ModalResult<(&'a str, Option<&'a str>)> {
    (
        take_till(0.., ['=', '&']),
        opt(preceded('=', take_till(0.., '&'))),
    )
        .parse_next(s)
}

fn parse_pairs<'a>(s: &mut &'a str) -> ModalResult<Vec<(&'a str, Option<&'a str>)>> {
    separated(0.., parse_pair, '&').parse_next(s)
}

/// Parses `a=1&b=2` into ordered, decoded pairs. Pieces with an empty key
/// are dropped; a key without `=` gets an empty value.
pub fn parse_query_string(query: &str) -> Vec<KeyValue> {
    let mut input = query;
    parse_pairs(&mut input)
        .unwrap_or_default()
        .into_iter()
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| {
            KeyValue::new(decode_component(key), decode_component(value.unwrap_or("")))
        })
        .collect()
}

/// Whether every `%` in `raw` starts a two hex digit escape.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

/// Percent-decodes one query component. A malformed escape, or decoded
/// bytes that are not valid UTF-8, leave the raw text unchanged.
pub fn decode_component(raw: &str) -> String {
    if !has_valid_escapes(raw) {
        return raw.to_string();
    }
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}
