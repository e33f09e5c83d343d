pub mod curl_parsers;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use curl_parsers::parse;
pub use tokenizer::tokenize;

const CONTENT_TYPE: &str = "Content-Type";

/// A single `key: value` pair, used for both headers and query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The request described by a cURL command line.
///
/// `method` is kept as an open string: `-X PROPFIND` passes through
/// untouched. Use [`crate::request::RequestData`] for the closed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub method: String,
    /// Origin and path only, the query string lives in `params`.
    pub url: String,
    pub headers: Vec<KeyValue>,
    pub params: Vec<KeyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Default for ParsedCommand {
    fn default() -> Self {
        Self {
            method: "GET".into(),
            url: String::new(),
            headers: Vec::new(),
            params: Vec::new(),
            data: None,
        }
    }
}

impl ParsedCommand {
    /// First header whose name matches `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// The url with its parameters attached again, re-encoded.
    pub fn full_url(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|p| (&p.key, &p.value)))
            .finish();
        format!("{}?{}", self.url, query)
    }
}

/// One interpreted unit of a tokenized command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Curl {
    Method(String),
    URL(String),
    Header(KeyValue),
    Data(String),
    Flag(String),
}

impl Curl {
    /// Builds the unit for a flag that takes a value. Returns `None` for
    /// flags we don't interpret and for values that carry nothing usable
    /// (an empty method, a header without a name).
    pub fn new(identifier: &str, param: &str) -> Option<Self> {
        match identifier {
            "-X" | "--request" => {
                if param.is_empty() {
                    return None;
                }
                Some(Curl::Method(param.into()))
            }
            "-H" | "--header" => header_from(param).map(Curl::Header),
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii"
            | "--data-urlencode" => Some(Curl::Data(strip_quotes(param).replace("\\\"", "\""))),
            _ => None,
        }
    }

    /// Whether `identifier` is a flag we interpret, and therefore consumes
    /// the following token as its value.
    pub fn takes_value(identifier: &str) -> bool {
        matches!(
            identifier,
            "-X" | "--request"
                | "-H"
                | "--header"
                | "-d"
                | "--data"
                | "--data-raw"
                | "--data-binary"
                | "--data-ascii"
                | "--data-urlencode"
        )
    }

    pub fn new_as_flag(identifier: &str) -> Self {
        Curl::Flag(identifier.into())
    }

    pub fn new_as_url(raw: &str) -> Self {
        Curl::URL(strip_quotes(raw).into())
    }
}

/// Splits `Name: value` on the first colon. A header without a colon keeps
/// the whole text as its name and an empty value.
fn header_from(param: &str) -> Option<KeyValue> {
    let (key, value) = param.split_once(':').unwrap_or((param, ""));
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(KeyValue::new(key, strip_quotes(value.trim())))
}

/// Removes one layer of matching single or double quotes.
pub fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(r#""rakudo star""#, "rakudo star")]
    #[case("'rakulang'", "rakulang")]
    #[case(r#"'mixed""#, r#"'mixed""#)]
    #[case("\"", "\"")]
    #[case("''", "")]
    #[case("plain", "plain")]
    fn test_strip_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(expected, strip_quotes(input));
    }

    #[rstest]
    #[case("-X", "PATCH", Some(Curl::Method("PATCH".into())))]
    #[case("--request", "", None)]
    #[case("-H", "Accept: */*", Some(Curl::Header(KeyValue::new("Accept", "*/*"))))]
    #[case("--header", " X-Token :  'abc' ", Some(Curl::Header(KeyValue::new("X-Token", "abc"))))]
    #[case("-H", "X-Empty", Some(Curl::Header(KeyValue::new("X-Empty", ""))))]
    #[case("-H", ": orphan", None)]
    #[case("--data-raw", r#"{\"a\":1}"#, Some(Curl::Data(r#"{"a":1}"#.into())))]
    #[case("-d", "", Some(Curl::Data(String::new())))]
    #[case("-o", "out.txt", None)]
    fn test_curl_new(
        #[case] identifier: &str,
        #[case] param: &str,
        #[case] expected: Option<Curl>,
    ) {
        assert_eq!(expected, Curl::new(identifier, param));
    }

    #[test]
    fn test_takes_value_matches_new() {
        for flag in ["-X", "--request", "-H", "--header", "-d", "--data", "--data-raw"] {
            assert!(Curl::takes_value(flag), "{flag} should take a value");
        }
        assert!(!Curl::takes_value("--compressed"));
        assert!(!Curl::takes_value("-o"));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let parsed = ParsedCommand {
            headers: vec![
                KeyValue::new("accept", "text/html"),
                KeyValue::new("Accept", "*/*"),
            ],
            ..ParsedCommand::default()
        };
        assert_eq!(Some("text/html"), parsed.header("ACCEPT"));
        assert_eq!(None, parsed.content_type());
    }

    #[test]
    fn test_full_url() {
        let parsed = ParsedCommand {
            url: "https://x.test/search".into(),
            params: vec![KeyValue::new("q", "a b"), KeyValue::new("page", "2")],
            ..ParsedCommand::default()
        };
        assert_eq!("https://x.test/search?q=a+b&page=2", parsed.full_url());

        let bare = ParsedCommand {
            url: "https://x.test/".into(),
            ..ParsedCommand::default()
        };
        assert_eq!("https://x.test/", bare.full_url());
    }
}
