//! Helpers for displaying and saving a response body.

pub mod highlight;

pub use highlight::{JsonToken, JsonTokenKind, highlight_json, line_count};

use std::sync::LazyLock;

use regex::Regex;

use crate::curl::KeyValue;
use crate::request::RawFormat;

static TAG_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").expect("valid regex"));

/// Picks the display format from a response's `Content-Type` header.
pub fn detect_format(headers: &[KeyValue]) -> RawFormat {
    let content_type = headers
        .iter()
        .find(|h| h.key.eq_ignore_ascii_case("content-type"))
        .map(|h| h.value.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.contains("application/json") {
        RawFormat::Json
    } else if content_type.contains("application/xml") || content_type.contains("text/xml") {
        RawFormat::Xml
    } else if content_type.contains("text/html") {
        RawFormat::Html
    } else {
        RawFormat::Text
    }
}

/// Pretty-prints JSON with two-space indent and puts each markup tag on its
/// own line. Content that fails to format is returned as is.
pub fn format_content(content: &str, format: RawFormat) -> String {
    match format {
        RawFormat::Json => match serde_json::from_str::<serde_json::Value>(content)
            .and_then(|value| serde_json::to_string_pretty(&value))
        {
            Ok(pretty) => pretty,
            Err(e) => {
                tracing::debug!(error = %e, "response is not valid json");
                content.to_string()
            }
        },
        RawFormat::Xml | RawFormat::Html => {
            let split = content.replace("><", ">\n<");
            TAG_GAP.replace_all(&split, ">\n<").into_owned()
        }
        RawFormat::Text | RawFormat::Javascript => content.to_string(),
    }
}

/// Reason phrase for the status bar. No status, or `0`, shows `-`.
pub fn status_text(status: Option<u16>) -> &'static str {
    match status.unwrap_or(0) {
        0 => "-",
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// File name and mime type used when saving a body shown as `format`.
pub fn download_target(format: RawFormat) -> (String, &'static str) {
    let (extension, mime) = match format {
        RawFormat::Json => ("json", "application/json"),
        RawFormat::Xml => ("xml", "application/xml"),
        RawFormat::Html => ("html", "text/html"),
        RawFormat::Text | RawFormat::Javascript => ("text", "text/plain"),
    };
    (format!("response.{extension}"), mime)
}

/// The last non-empty path segment of `raw`, or `response` when the url
/// has none or does not parse.
pub fn default_filename(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()).map(str::to_string))
        })
        .unwrap_or_else(|| "response".to_string())
}
