//! Recursive descent over scanner-bounded regions.
//!
//! Every composite is first bounded by its matching closing delimiter, then its interior is parsed
//! with a cursor threaded through the value dispatcher. The cursor is an absolute byte offset into
//! the whole input and only ever moves forward.

use tracing::{debug, trace};

use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::limits::Limits;
use crate::literal::{decode_string, parse_keyword, parse_number, parse_string};
use crate::scanner::{find_matching_close, find_string_end, find_value_boundary, skip_whitespace};
use crate::span::Span;
use crate::value::{Document, Map, Value};

const BYTE_ORDER_MARK: &str = "\u{FEFF}";

/// Parser state for one input. Nothing is shared between parsers, so independent documents can
/// be parsed concurrently.
pub struct Parser<'a> {
    text: &'a str,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str, limits: Limits) -> Self {
        Parser {
            text,
            limits,
            depth: 0,
        }
    }

    /// Parse the whole input as one document whose root must be an array or an object.
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        self.depth = 0;
        let text = self.text;
        if text.len() > self.limits.max_input_size {
            return Err(ParseError::at(
                ErrorKind::InputTooLarge {
                    size: text.len(),
                    limit: self.limits.max_input_size,
                },
                0,
            ));
        }

        let bom = if text.starts_with(BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len()
        } else {
            0
        };
        let start = skip_whitespace(text, bom);

        let mut cursor = start;
        let root = match text.as_bytes().get(start) {
            None => return Err(ParseError::at(ErrorKind::UnexpectedEndOfInput, start)),
            Some(b'[' | b'{') => self.parse_value(&mut cursor, text.len())?,
            Some(_) => {
                let end = find_value_boundary(text, start).max(start + 1);
                let end = ceil_char_boundary(text, end);
                return Err(ParseError::new(
                    ErrorKind::InvalidTopLevel,
                    Span::new(start, end),
                ));
            }
        };

        let rest = skip_whitespace(text, cursor);
        if rest < text.len() {
            return Err(ParseError::new(
                ErrorKind::TrailingCharacters,
                Span::new(rest, text.len()),
            ));
        }

        Ok(Document::new(root))
    }

    /// Parse the value starting at or after `cursor`, within the region ending at `end`, and move
    /// the cursor past it.
    ///
    /// Part of the per-level recursion with the composite parsers. Scalars, keys and logging stay
    /// in non-recursive helpers to keep these frames small.
    pub(crate) fn parse_value(&mut self, cursor: &mut usize, end: usize) -> ParseResult<Value> {
        let source = self.text;
        let text = &source[..end];
        let start = skip_whitespace(text, *cursor);

        let value = match text.as_bytes().get(start) {
            Some(b'[') => {
                let close = self.open_scope(text, start, b'[', b']')?;
                let value = self.parse_array(start + 1, close)?;
                self.depth -= 1;
                *cursor = close + 1;
                value
            }
            Some(b'{') => {
                let close = self.open_scope(text, start, b'{', b'}')?;
                let value = self.parse_object(start + 1, close)?;
                self.depth -= 1;
                *cursor = close + 1;
                value
            }
            _ => {
                let (value, next) = parse_scalar(text, start)?;
                *cursor = next;
                value
            }
        };
        Ok(value)
    }

    /// Parse the interior `start..end` of an array whose `[` sits at `start - 1`.
    pub(crate) fn parse_array(&mut self, start: usize, end: usize) -> ParseResult<Value> {
        let source = self.text;
        let text = &source[..end];
        let mut items = Vec::new();
        let mut cursor = skip_whitespace(text, start);
        if cursor < end {
            loop {
                items.push(self.parse_value(&mut cursor, end)?);
                cursor = skip_whitespace(text, cursor);
                match text.as_bytes().get(cursor) {
                    None => break,
                    Some(b',') => cursor += 1,
                    Some(_) => return Err(unexpected_character(text, cursor)),
                }
            }
        }
        Ok(Value::Array(items))
    }

    /// Parse the interior `start..end` of an object whose `{` sits at `start - 1`.
    ///
    /// A key seen twice keeps its first position but takes the last value.
    pub(crate) fn parse_object(&mut self, start: usize, end: usize) -> ParseResult<Value> {
        let source = self.text;
        let text = &source[..end];
        let mut members = Map::new();
        let mut cursor = skip_whitespace(text, start);
        if cursor < end {
            loop {
                let (key, after_colon) = parse_member_key(text, cursor)?;
                cursor = after_colon;
                let value = self.parse_value(&mut cursor, end)?;
                members.insert(key, value);

                cursor = skip_whitespace(text, cursor);
                match text.as_bytes().get(cursor) {
                    None => break,
                    Some(b',') => cursor = skip_whitespace(text, cursor + 1),
                    Some(_) => return Err(unexpected_character(text, cursor)),
                }
            }
        }
        Ok(Value::Object(members))
    }

    /// Enter the composite opened at `open_index` and return the index of its closer.
    ///
    /// The depth is checked before the scope search, so an over-deep composite is rejected
    /// without scanning its interior.
    #[inline(never)]
    fn open_scope(
        &mut self,
        text: &str,
        open_index: usize,
        open: u8,
        close: u8,
    ) -> ParseResult<usize> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::new(
                ErrorKind::NestingTooDeep {
                    depth: self.depth,
                    limit: self.limits.max_nesting_depth,
                },
                Span::new(open_index, open_index + 1),
            ));
        }
        trace!(depth = self.depth, offset = open_index, open = %char::from(open), "composite");
        find_matching_close(text, open_index, open, close)
    }
}

/// Parse the number, string or keyword starting at `start`. Returns the value and the index just
/// past it.
#[inline(never)]
fn parse_scalar(text: &str, start: usize) -> ParseResult<(Value, usize)> {
    let Some(&lead) = text.as_bytes().get(start) else {
        return Err(ParseError::at(ErrorKind::UnexpectedEndOfInput, start));
    };
    match lead {
        b'-' | b'0'..=b'9' => {
            let stop = find_value_boundary(text, start);
            Ok((parse_number(&text[start..stop], start)?, stop))
        }
        b'"' => {
            let close = find_string_end(text, start)?;
            Ok((parse_string(&text[start + 1..close], start + 1)?, close + 1))
        }
        b',' | b':' | b']' | b'}' => Err(unexpected_character(text, start)),
        _ => {
            let stop = find_value_boundary(text, start);
            Ok((parse_keyword(&text[start..stop], start)?, stop))
        }
    }
}

/// Parse an object key and its colon starting at `cursor`. Returns the decoded key and the index
/// just past the colon.
#[inline(never)]
fn parse_member_key(text: &str, cursor: usize) -> ParseResult<(String, usize)> {
    match text.as_bytes().get(cursor) {
        Some(b'"') => {}
        Some(_) => return Err(unexpected_character(text, cursor)),
        None => return Err(ParseError::at(ErrorKind::UnexpectedEndOfInput, cursor)),
    }
    let key_end = find_string_end(text, cursor)?;
    let key = decode_string(&text[cursor + 1..key_end], cursor + 1)?;

    let colon = skip_whitespace(text, key_end + 1);
    if text.as_bytes().get(colon) != Some(&b':') {
        return Err(ParseError::at(ErrorKind::MissingColon, colon));
    }
    Ok((key, colon + 1))
}

fn unexpected_character(text: &str, at: usize) -> ParseError {
    let c = text[at..].chars().next().unwrap_or('\u{FFFD}');
    ParseError::new(
        ErrorKind::UnexpectedCharacter(c),
        Span::new(at, at + c.len_utf8()),
    )
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index.min(text.len())
}

/// Parse a document with [`Limits::default`].
pub fn parse_document(text: &str) -> ParseResult<Document> {
    parse_document_with_limits(text, Limits::default())
}

/// Parse a document with custom limits.
pub fn parse_document_with_limits(text: &str, limits: Limits) -> ParseResult<Document> {
    debug!(len = text.len(), max_depth = limits.max_nesting_depth, "parsing document");
    let result = Parser::new(text, limits).parse_document();
    if let Err(err) = &result {
        debug!(code = err.kind().code(), offset = err.offset(), "parse failed");
    }
    result
}
