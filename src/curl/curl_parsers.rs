use std::borrow::Cow;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, multispace1, space0},
    combinator::{eof, opt, recognize},
    error::context,
    sequence::{terminated, tuple},
};

use crate::{
    curl::{CONTENT_TYPE, Curl, KeyValue, ParsedCommand, tokenize},
    url::UrlOutcome,
};

const CURL_CMD: &str = "curl";
const JSON_CONTENT_TYPE: &str = "application/json";

pub fn is_curl(input: &str) -> bool {
    curl_cmd_header(input.trim_start()).is_ok()
}

/// The leading `curl` word, followed by whitespace or the end of input.
pub fn curl_cmd_header(input: &str) -> IResult<&str, &str> {
    context(
        "curl cmd header",
        terminated(tag_no_case(CURL_CMD), alt((multispace1, eof))),
    )(input)
}

/// A shell line continuation: `\`, an optional `\r`, a newline and the
/// indentation of the next line.
pub fn slash_line_ending(input: &str) -> IResult<&str, &str> {
    context(
        "slash line ending",
        recognize(tuple((char('\\'), opt(char('\r')), char('\n'), space0))),
    )(input)
}

pub fn remove_curl_cmd_header(input: &str) -> &str {
    match curl_cmd_header(input) {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

/// Trims the command, drops the `curl` word and joins continued lines.
pub fn normalize(input: &str) -> Cow<'_, str> {
    let input = remove_curl_cmd_header(input.trim());
    if !input.contains('\\') {
        return Cow::Borrowed(input);
    }

    let mut joined = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('\\') {
        joined.push_str(&rest[..pos]);
        match slash_line_ending(&rest[pos..]) {
            Ok((after, _)) => rest = after,
            Err(_) => {
                joined.push('\\');
                rest = &rest[pos + 1..];
            }
        }
    }
    joined.push_str(rest);
    Cow::Owned(joined)
}

/// Reads tokens left to right. Interpreted flags consume the next token;
/// any other flag is kept as a bare [`Curl::Flag`] and its value, if it
/// has one, is left to be read as an ordinary token.
pub fn interpret(tokens: &[String]) -> Vec<Curl> {
    let mut curls = Vec::new();
    let mut has_url = false;
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if Curl::takes_value(token) {
            match iter.next() {
                Some(param) => curls.extend(Curl::new(token, param)),
                None => tracing::debug!(flag = %token, "flag without a value"),
            }
        } else if token.starts_with('-') {
            curls.push(Curl::new_as_flag(token));
        } else if !has_url && !token.is_empty() {
            has_url = true;
            curls.push(Curl::new_as_url(token));
        }
    }
    curls
}

/// Folds interpreted units into a [`ParsedCommand`].
///
/// An explicit `-X` decides the method wherever it appears; without one, a
/// body makes it `POST`.
pub fn assemble(curls: Vec<Curl>) -> ParsedCommand {
    let mut parsed = ParsedCommand::default();
    let mut method = None;

    for curl in curls {
        match curl {
            Curl::Method(m) => method = Some(m),
            Curl::URL(raw) => {
                let outcome = crate::url::split_url(&raw);
                if let UrlOutcome::Fallback { reason, .. } = &outcome {
                    tracing::warn!(url = %raw, %reason, "url parsing failed, splitting manually");
                }
                let split = outcome.into_split();
                parsed.url = split.base;
                parsed.params = split.params;
            }
            Curl::Header(header) => parsed.headers.push(header),
            Curl::Data(data) => parsed.data = Some(data),
            Curl::Flag(flag) => tracing::trace!(%flag, "skipping flag"),
        }
    }

    parsed.method = match (method, &parsed.data) {
        (Some(m), _) => m,
        (None, Some(_)) => "POST".into(),
        (None, None) => "GET".into(),
    };

    let looks_like_json = parsed
        .data
        .as_deref()
        .is_some_and(|d| d.starts_with(['{', '[']));
    if looks_like_json && parsed.content_type().is_none() {
        parsed
            .headers
            .push(KeyValue::new(CONTENT_TYPE, JSON_CONTENT_TYPE));
    }
    parsed
}

/// Parses a cURL command line into a [`ParsedCommand`].
///
/// Never fails: input that is not recognizable as a command produces a
/// record with whatever could be picked up, possibly nothing.
pub fn parse(command: &str) -> ParsedCommand {
    let normalized = normalize(command);
    let tokens = tokenize(&normalized);
    let parsed = assemble(interpret(&tokens));
    tracing::debug!(
        method = %parsed.method,
        url = %parsed.url,
        headers = parsed.headers.len(),
        params = parsed.params.len(),
        has_data = parsed.data.is_some(),
        "parsed curl command"
    );
    parsed
}
