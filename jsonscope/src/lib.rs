//! A strict JSON parser built as a recursive descent over depth-aware scanned regions.
//!
//! The parser takes a complete, already read text buffer and returns either a [`Document`] or a
//! [`ParseError`] locating the first problem by byte offset. It never performs I/O.
//!
//! Only the strict grammar is accepted: no comments, no trailing commas, no single quoted strings,
//! and the top level value must be an array or an object.
//!
//! ```
//! use jsonscope::{parse_document, Value};
//!
//! let doc = parse_document(r#"{"hello": [1, 2, 3], "mellow": {"abc": 5}}"#).unwrap();
//! assert_eq!(doc.get("mellow").and_then(|m| m.get("abc")), Some(&Value::Number(5.0)));
//!
//! let err = parse_document("42").unwrap_err();
//! assert_eq!(err.kind(), &jsonscope::ErrorKind::InvalidTopLevel);
//! ```

mod error;
mod limits;
mod literal;
mod parser;
pub mod scanner;
mod span;
mod value;

use std::str::FromStr;

pub use error::{ErrorKind, ParseError, ParseResult};
pub use indexmap::IndexMap;
pub use limits::{Limits, DEFAULT_MAX_INPUT_SIZE, DEFAULT_MAX_NESTING_DEPTH};
pub use literal::{parse_keyword, parse_number, parse_string};
pub use parser::{parse_document, parse_document_with_limits, Parser};
pub use span::Span;
pub use value::{Document, Map, Value};

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_document(s)
    }
}
