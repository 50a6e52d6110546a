//! Scanner primitives.
//!
//! These functions locate token and scope boundaries in a read-only view of the input. They never
//! copy the buffer. A search is bounded to a region by handing in the prefix `&text[..end]`, so
//! every returned index stays an absolute byte offset into the full input.
//!
//! Only ASCII bytes are ever compared, and no UTF-8 continuation byte is ASCII, so byte scanning
//! always stops on a char boundary.

use crate::error::{ErrorKind, ParseError, ParseResult};

pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Index of the first non-whitespace byte at or after `from`, or `text.len()`.
pub fn skip_whitespace(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && is_whitespace(bytes[i]) {
        i += 1;
    }
    i
}

/// Index of the first whitespace or comma at or after `from`, or `text.len()`. Bounds unquoted
/// literals: numbers, `true`, `false` and `null`.
pub fn find_value_boundary(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && !(is_whitespace(bytes[i]) || bytes[i] == b',') {
        i += 1;
    }
    i
}

/// Index of the `"` closing the string literal opened at `quote_start`.
///
/// A backslash always escapes the byte after it, so in `\\"` the quote is a delimiter while in
/// `\"` it is not.
pub fn find_string_end(text: &str, quote_start: usize) -> ParseResult<usize> {
    let bytes = text.as_bytes();
    let mut i = quote_start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Ok(i),
            _ => i += 1,
        }
    }
    Err(ParseError::at(ErrorKind::UnterminatedString, quote_start))
}

/// Index of the delimiter closing the `open` at `open_index`.
///
/// Nesting of the same delimiter pair is tracked, and string literals are stepped over whole so
/// that a `]` inside `"..."` is never mistaken for a closer.
pub fn find_matching_close(
    text: &str,
    open_index: usize,
    open: u8,
    close: u8,
) -> ParseResult<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open_index;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' {
            i = find_string_end(text, i)?;
        } else if b == open {
            depth += 1;
        } else if b == close {
            if depth <= 1 {
                return Ok(i);
            }
            depth -= 1;
        }
        i += 1;
    }
    Err(ParseError::at(
        ErrorKind::UnbalancedDelimiter(char::from(open)),
        open_index,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_whitespace() {
        assert_eq!(skip_whitespace("  \t\r\n x", 0), 6);
        assert_eq!(skip_whitespace("x", 0), 0);
        assert_eq!(skip_whitespace("   ", 1), 3);
        assert_eq!(skip_whitespace("", 0), 0);
    }

    #[test]
    fn test_find_value_boundary() {
        assert_eq!(find_value_boundary("123,456", 0), 3);
        assert_eq!(find_value_boundary("true ]", 0), 4);
        assert_eq!(find_value_boundary("null", 0), 4);
        assert_eq!(find_value_boundary("1,2", 2), 3);
    }

    #[test]
    fn test_find_string_end_plain() {
        let text = r#""abcdefghijkl" jo mama"#;
        assert_eq!(find_string_end(text, 0), Ok(13));
    }

    #[test]
    fn test_find_string_end_skips_escaped_quote() {
        let text = r#""abcdefghijkl\" jo mama""#;
        assert_eq!(find_string_end(text, 0), Ok(text.len() - 1));
    }

    #[test]
    fn test_find_string_end_escaped_backslash_then_quote_closes() {
        let text = r#""ab\\" tail"#;
        assert_eq!(find_string_end(text, 0), Ok(5));
    }

    #[test]
    fn test_find_string_end_unterminated() {
        let err = find_string_end(r#""abcdefghijkl jo mama"#, 0).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedString);
        assert_eq!(err.offset(), 0);

        let err = find_string_end(r#""dangling \""#, 0).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_find_matching_close_skips_nested_pair() {
        let text = "[1,[2,3],4]";
        assert_eq!(find_matching_close(text, 0, b'[', b']'), Ok(10));
        assert_eq!(find_matching_close(text, 3, b'[', b']'), Ok(7));
    }

    #[test]
    fn test_find_matching_close_braces() {
        let text = r#"{"a": {"b": {}}, "c": 1} trailing"#;
        assert_eq!(find_matching_close(text, 0, b'{', b'}'), Ok(23));
    }

    #[test]
    fn test_find_matching_close_ignores_delimiters_in_strings() {
        let text = r#"["]", "[", "\"]"]"#;
        assert_eq!(find_matching_close(text, 0, b'[', b']'), Ok(text.len() - 1));
    }

    #[test]
    fn test_find_matching_close_unbalanced() {
        let err = find_matching_close("[[1]", 0, b'[', b']').unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnbalancedDelimiter('['));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_find_matching_close_respects_prefix_bound() {
        let text = "[[1],2]";
        let err = find_matching_close(&text[..6], 0, b'[', b']').unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnbalancedDelimiter('['));
    }
}
