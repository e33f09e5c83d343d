pub mod parser;

pub use parser::{FallbackReason, SplitUrl, UrlOutcome, split_url};
