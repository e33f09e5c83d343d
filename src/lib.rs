//! Turns pasted cURL commands into request descriptors, and keeps the
//! request history, collections and settings of a small API client.
//!
//! ```
//! let parsed = pastecurl::parse("curl -H 'X-Test: a:b' 'https://x.test/path?foo=1'");
//! assert_eq!("GET", parsed.method);
//! assert_eq!("https://x.test/path", parsed.url);
//! assert_eq!("a:b", parsed.headers[0].value);
//! assert_eq!("1", parsed.params[0].value);
//! ```

pub mod curl;
pub mod error;
pub mod request;
pub mod response;
pub mod store;
pub mod url;

#[cfg(test)]
mod test_util;

pub use curl::{KeyValue, ParsedCommand, parse};
pub use error::{Error, Result};
pub use request::{RequestBody, RequestBodyType, RequestData, RequestMethod};
