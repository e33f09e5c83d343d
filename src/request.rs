//! The closed request model the request builder edits.
//!
//! [`ParsedCommand`] keeps whatever method a command names; converting it
//! into [`RequestData`] is where unknown verbs are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::curl::{KeyValue, ParsedCommand};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl RequestMethod {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Delete,
            Self::Patch,
            Self::Head,
            Self::Options,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedMethod(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestBodyType {
    #[default]
    None,
    Json,
    FormData,
    #[serde(rename = "x-www-form-urlencoded")]
    XWwwFormUrlencoded,
    Raw,
    Binary,
    Graphql,
}

impl RequestBodyType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::FormData => "form-data",
            Self::XWwwFormUrlencoded => "x-www-form-urlencoded",
            Self::Raw => "raw",
            Self::Binary => "binary",
            Self::Graphql => "graphql",
        }
    }
}

impl FromStr for RequestBodyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "json" => Ok(Self::Json),
            "form-data" => Ok(Self::FormData),
            "x-www-form-urlencoded" => Ok(Self::XWwwFormUrlencoded),
            "raw" => Ok(Self::Raw),
            "binary" => Ok(Self::Binary),
            "graphql" => Ok(Self::Graphql),
            other => Err(Error::UnknownBodyType(other.to_string())),
        }
    }
}

/// Syntax of a raw body, used by the editor for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawFormat {
    #[default]
    Text,
    Javascript,
    Json,
    Html,
    Xml,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub body_type: RequestBodyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RawFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl RequestBody {
    /// Picks the body type for `data` from its content and the request's
    /// content type header. Without a content type, a body that is not
    /// JSON is form-urlencoded, which is what curl sends for `-d`.
    pub fn infer(data: Option<&str>, content_type: Option<&str>) -> Self {
        let Some(data) = data else {
            return Self::default();
        };
        let content_type = content_type.map(str::to_ascii_lowercase);
        let content_type = content_type
            .as_deref()
            .unwrap_or("application/x-www-form-urlencoded");

        let (body_type, format) = if serde_json::from_str::<serde_json::Value>(data).is_ok() {
            (RequestBodyType::Json, Some(RawFormat::Json))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            (RequestBodyType::XWwwFormUrlencoded, None)
        } else if content_type.contains("xml") {
            (RequestBodyType::Raw, Some(RawFormat::Xml))
        } else if content_type.contains("html") {
            (RequestBodyType::Raw, Some(RawFormat::Html))
        } else if content_type.contains("javascript") {
            (RequestBodyType::Raw, Some(RawFormat::Javascript))
        } else {
            (RequestBodyType::Raw, Some(RawFormat::Text))
        };

        Self {
            body_type,
            format,
            content: Some(data.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Vec<KeyValue>,
    pub params: Vec<KeyValue>,
    pub body: RequestBody,
}

impl TryFrom<ParsedCommand> for RequestData {
    type Error = Error;

    fn try_from(parsed: ParsedCommand) -> Result<Self> {
        let method = parsed.method.parse()?;
        let body = RequestBody::infer(parsed.data.as_deref(), parsed.content_type());
        Ok(Self {
            method,
            url: parsed.url,
            headers: parsed.headers,
            params: parsed.params,
            body,
        })
    }
}
