//! Literal parsers: numbers, keywords and string contents.
//!
//! Each parser receives an already bounded slice plus the absolute offset of its first byte,
//! which is only used to locate errors.

use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::span::Span;
use crate::value::Value;

/// Past this magnitude every exponent on a nonzero mantissa yields zero or infinity.
const MAX_EXPONENT_MAGNITUDE: i32 = 1000;

/// Powers of ten that are exactly representable as `f64`.
const EXACT_POWERS_OF_TEN: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

fn power_of_ten(magnitude: u32) -> f64 {
    match EXACT_POWERS_OF_TEN.get(magnitude as usize) {
        Some(&power) => power,
        None => 10f64.powf(f64::from(magnitude)),
    }
}

/// Parse a number literal of the form `-?(0|[1-9]\d*)(\.\d+)?([eE][+-]?\d+)?`.
///
/// The mantissa and exponent are parsed separately and combined with a single power of ten. When
/// that power leaves the `f64` range, or the product lands outside the normal range, the whole
/// literal is handed to the correctly rounded standard parser instead.
pub fn parse_number(slice: &str, offset: usize) -> ParseResult<Value> {
    let invalid = || {
        ParseError::new(
            ErrorKind::InvalidNumber(slice.to_string()),
            Span::new(offset, offset + slice.len()),
        )
    };

    if !is_number_literal(slice.as_bytes()) {
        return Err(invalid());
    }

    let (mantissa, exponent) = match slice.find(['e', 'E']) {
        Some(e) => (&slice[..e], parse_exponent(&slice[e + 1..])),
        None => (slice, 0),
    };

    let is_zero = !mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let mantissa: f64 = mantissa.parse().map_err(|_| invalid())?;

    let number = if is_zero || exponent == 0 {
        mantissa
    } else {
        let power = power_of_ten(exponent.unsigned_abs());
        let number = if exponent > 0 {
            mantissa * power
        } else {
            mantissa / power
        };
        if power.is_finite() && number.is_normal() {
            number
        } else {
            slice.parse::<f64>().map_err(|_| invalid())?
        }
    };

    if !number.is_finite() {
        return Err(invalid());
    }
    Ok(Value::Number(number))
}

/// Parse an already validated exponent, saturating at [`MAX_EXPONENT_MAGNITUDE`].
fn parse_exponent(exponent: &str) -> i32 {
    let (negative, digits) = match exponent.as_bytes().first() {
        Some(b'-') => (true, &exponent[1..]),
        Some(b'+') => (false, &exponent[1..]),
        _ => (false, exponent),
    };
    let magnitude = digits.bytes().fold(0i32, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i32::from(digit - b'0'))
            .min(MAX_EXPONENT_MAGNITUDE)
    });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn is_number_literal(bytes: &[u8]) -> bool {
    fn digits(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    }

    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits(bytes, i + 1),
        _ => return false,
    }

    if bytes.get(i) == Some(&b'.') {
        let end = digits(bytes, i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let end = digits(bytes, i);
        if end == i {
            return false;
        }
        i = end;
    }

    i == bytes.len()
}

/// Parse exactly `true`, `false` or `null`.
pub fn parse_keyword(slice: &str, offset: usize) -> ParseResult<Value> {
    match slice {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        "null" => Ok(Value::Null),
        _ => Err(ParseError::new(
            ErrorKind::InvalidKeyword(slice.to_string()),
            Span::new(offset, offset + slice.len()),
        )),
    }
}

/// Parse the content between the quotes of a string literal, decoding escape sequences.
pub fn parse_string(slice: &str, offset: usize) -> ParseResult<Value> {
    decode_string(slice, offset).map(Value::String)
}

pub(crate) fn decode_string(slice: &str, offset: usize) -> ParseResult<String> {
    // Fast path: nothing to decode.
    if !slice.bytes().any(|b| b == b'\\' || b < 0x20) {
        return Ok(slice.to_string());
    }

    let bytes = slice.as_bytes();
    let mut out = String::with_capacity(slice.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x20 {
            return Err(invalid_escape(
                format!("unescaped control character U+{b:04X}"),
                offset + i,
                1,
            ));
        }
        if b != b'\\' {
            // Copy the whole run up to the next byte of interest, preserving it verbatim.
            let run_end = bytes[i..]
                .iter()
                .position(|&b| b == b'\\' || b < 0x20)
                .map_or(bytes.len(), |p| i + p);
            out.push_str(&slice[i..run_end]);
            i = run_end;
            continue;
        }

        let Some(&escape) = bytes.get(i + 1) else {
            return Err(invalid_escape("incomplete escape sequence".to_string(), offset + i, 1));
        };
        match escape {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{08}'),
            b'f' => out.push('\u{0C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let (c, consumed) = decode_unicode_escape(slice, i, offset)?;
                out.push(c);
                i += consumed;
                continue;
            }
            _ => {
                let escape = slice[i + 1..].chars().next().unwrap_or('\\');
                return Err(invalid_escape(
                    format!("unknown escape sequence `\\{escape}`"),
                    offset + i,
                    1 + escape.len_utf8(),
                ));
            }
        }
        i += 2;
    }
    Ok(out)
}

/// Decode a `\uXXXX` escape starting at byte `i` of `slice`, including a following low surrogate
/// when the first unit is a high surrogate. Returns the char and the number of bytes consumed.
fn decode_unicode_escape(slice: &str, i: usize, offset: usize) -> ParseResult<(char, usize)> {
    let first = hex_unit(slice, i, offset)?;
    match first {
        0xD800..=0xDBFF => {
            let low = if slice.as_bytes().get(i + 6..i + 8) == Some(b"\\u".as_slice()) {
                Some(hex_unit(slice, i + 6, offset)?)
            } else {
                None
            };
            match low {
                Some(low @ 0xDC00..=0xDFFF) => {
                    let code = 0x10000 + ((u32::from(first) - 0xD800) << 10)
                        + (u32::from(low) - 0xDC00);
                    char::from_u32(code).map(|c| (c, 12)).ok_or_else(|| {
                        invalid_escape("invalid surrogate pair".to_string(), offset + i, 12)
                    })
                }
                _ => Err(invalid_escape(
                    format!("unpaired high surrogate `\\u{first:04X}`"),
                    offset + i,
                    6,
                )),
            }
        }
        0xDC00..=0xDFFF => Err(invalid_escape(
            format!("unpaired low surrogate `\\u{first:04X}`"),
            offset + i,
            6,
        )),
        unit => char::from_u32(u32::from(unit))
            .map(|c| (c, 6))
            .ok_or_else(|| invalid_escape("invalid code point".to_string(), offset + i, 6)),
    }
}

/// Read the four hex digits following the `\u` at byte `i`.
fn hex_unit(slice: &str, i: usize, offset: usize) -> ParseResult<u16> {
    let digits = slice
        .get(i + 2..i + 6)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()));
    match digits.map(|digits| u16::from_str_radix(digits, 16)) {
        Some(Ok(unit)) => Ok(unit),
        _ => {
            let mut end = slice.len().min(i + 6);
            while !slice.is_char_boundary(end) {
                end += 1;
            }
            Err(invalid_escape(
                "`\\u` must be followed by four hex digits".to_string(),
                offset + i,
                end - i,
            ))
        }
    }
}

fn invalid_escape(message: String, at: usize, len: usize) -> ParseError {
    ParseError::new(ErrorKind::InvalidEscape(message), Span::new(at, at + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(slice: &str) -> f64 {
        match parse_number(slice, 0) {
            Ok(Value::Number(n)) => n,
            other => panic!("expected a number for `{slice}`, got {other:?}"),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = f64::EPSILON * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} is not within epsilon of {expected}"
        );
    }

    #[test]
    fn test_parse_number_grammar_samples() {
        let cases = [
            ("1", 1.0),
            ("1.5", 1.5),
            ("-1", -1.0),
            ("-1.5", -1.5),
            ("1e+2", 100.0),
            ("-1e+2", -100.0),
            ("1.5e-2", 0.015),
            ("-1.5e-2", -0.015),
            ("1.5E+2", 150.0),
            ("-1.5E+2", -150.0),
            ("0", 0.0),
            ("0.25", 0.25),
            ("2E3", 2000.0),
        ];
        for (text, expected) in cases {
            assert_close(number(text), expected);
        }
    }

    #[test]
    fn test_parse_number_small_exponent() {
        let parsed = number("10.123e-12");
        assert!((parsed - 10.123e-12).abs() <= 10.123e-12 * 1e-15);
    }

    #[test]
    fn test_parse_number_zero_mantissa_with_huge_exponent() {
        assert_eq!(number("0e400"), 0.0);
        assert_eq!(number("1e-400"), 0.0);
    }

    #[test]
    fn test_parse_number_beyond_single_power_range() {
        assert_close(number("0.001e310"), 1e307);
        assert_close(number("12345e-310"), 1.2345e-306);
    }

    #[test]
    fn test_parse_number_keeps_subnormals() {
        assert_eq!(number("1e-310"), 1e-310);
        assert_eq!(number("123e-320"), 123e-320);
        assert_eq!(number("5e-324"), 5e-324);
        assert_eq!(number("-5e-324"), -5e-324);
    }

    #[test]
    fn test_parse_number_exponent_outside_i32() {
        assert_eq!(number("0e99999999999"), 0.0);
        assert_eq!(number("0.000e-99999999999"), 0.0);
        assert_eq!(number("1e-99999999999"), 0.0);
        assert!(parse_number("1e99999999999", 0).is_err());
    }

    #[test]
    fn test_parse_number_long_mantissa() {
        let tiny_mantissa = format!("0.{}1e400", "0".repeat(400));
        assert_close(number(&tiny_mantissa), 0.1);

        let huge_mantissa = format!("1{}", "0".repeat(400));
        assert!(parse_number(&huge_mantissa, 0).is_err());
        assert_close(number(&format!("{huge_mantissa}e-400")), 1.0);
    }

    #[test]
    fn test_parse_number_rejects_overflow() {
        let err = parse_number("1e400", 3).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidNumber("1e400".to_string()));
        assert_eq!(err.span(), Span::new(3, 8));
    }

    #[test]
    fn test_parse_number_rejects_malformed() {
        for text in [
            "", "-", "01", "-01", "1.", ".5", "1e", "1e+", "+1", "1.2.3", "1x", "--1", "NaN",
            "Infinity", "0x10", "1,",
        ] {
            let err = parse_number(text, 0).unwrap_err();
            assert_eq!(
                err.kind(),
                &ErrorKind::InvalidNumber(text.to_string()),
                "`{text}` should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_keyword() {
        assert_eq!(parse_keyword("true", 0), Ok(Value::Boolean(true)));
        assert_eq!(parse_keyword("false", 0), Ok(Value::Boolean(false)));
        assert_eq!(parse_keyword("null", 0), Ok(Value::Null));
    }

    #[test]
    fn test_parse_keyword_is_case_sensitive() {
        let err = parse_keyword("True", 10).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidKeyword("True".to_string()));
        assert_eq!(err.offset(), 10);
        assert!(parse_keyword("nul", 0).is_err());
        assert!(parse_keyword("nullx", 0).is_err());
    }

    #[test]
    fn test_parse_string_plain() {
        assert_eq!(
            parse_string("Go to hell man", 0),
            Ok(Value::String("Go to hell man".to_string()))
        );
        assert_eq!(parse_string("", 0), Ok(Value::String(String::new())));
    }

    #[test]
    fn test_parse_string_decodes_escapes() {
        assert_eq!(
            decode_string(r#"a\"b\\c\/d\be\ff\ng\rh\ti"#, 0),
            Ok("a\"b\\c/d\u{08}e\u{0C}f\ng\rh\ti".to_string())
        );
    }

    #[test]
    fn test_parse_string_unicode_escapes() {
        assert_eq!(decode_string(r"caf\u00e9", 0), Ok("café".to_string()));
        assert_eq!(decode_string(r"\u0041\u0042", 0), Ok("AB".to_string()));
        assert_eq!(decode_string(r"\uD83D\uDE00!", 0), Ok("\u{1F600}!".to_string()));
    }

    #[test]
    fn test_parse_string_keeps_raw_utf8() {
        assert_eq!(decode_string("héllo wörld", 0), Ok("héllo wörld".to_string()));
        assert_eq!(decode_string(r"ü\nü", 0), Ok("ü\nü".to_string()));
    }

    #[test]
    fn test_parse_string_rejects_bad_escapes() {
        let err = decode_string(r"ab\x", 5).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidEscape(_)));
        assert_eq!(err.span(), Span::new(7, 9));

        assert!(decode_string(r"\u12", 0).is_err());
        assert!(decode_string(r"\u12G4", 0).is_err());
        assert!(decode_string(r"\u+123", 0).is_err());
    }

    #[test]
    fn test_short_unicode_escape_span_ends_on_char_boundary() {
        let slice = "\\u\u{e9}\u{20ac}";
        let err = decode_string(slice, 3).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidEscape(_)));
        assert_eq!(err.span(), Span::new(3, 3 + slice.len()));
        assert!(slice.is_char_boundary(err.span().hi - 3));
    }

    #[test]
    fn test_parse_string_rejects_lone_surrogates() {
        let err = decode_string(r"\uD800", 0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidEscape(_)));
        assert!(decode_string(r"\uD800\u0041", 0).is_err());
        assert!(decode_string(r"\uDC00", 0).is_err());
    }

    #[test]
    fn test_parse_string_rejects_raw_control_characters() {
        let err = decode_string("line\nbreak", 1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidEscape(_)));
        assert_eq!(err.offset(), 5);
    }
}
