//! Quote-aware splitting of a normalized command line.
//!
//! The scanner is a single pass over the input with two states: outside any
//! quote, or inside a span opened by `'` or `"`. Quote characters delimit
//! spans and are dropped, unless the previous character is a backslash, in
//! which case the quote is kept along with the backslash.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Quoted(char),
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Splits `input` into tokens on unquoted whitespace runs.
///
/// An unterminated quote is closed by the end of input. An empty quoted
/// span (`''`) still yields an empty token, so `-d ''` keeps its value.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut state = State::Outside;
    let mut prev = None;

    for c in input.chars() {
        let escaped = prev == Some('\\');
        match state {
            State::Outside if is_quote(c) && !escaped => {
                state = State::Quoted(c);
                started = true;
            }
            State::Outside if c.is_whitespace() => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            State::Quoted(open) if c == open && !escaped => {
                state = State::Outside;
            }
            _ => {
                current.push(c);
                started = true;
            }
        }
        prev = Some(c);
    }

    if started {
        tokens.push(current);
    }
    tokens
}
