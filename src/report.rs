use std::ops::Range;

use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use jsonscope::{ErrorKind, ParseError};

type DiagnosticReport<'a> = Report<'a, (&'a String, Range<usize>)>;

/// Build an error report for a failed parse. ariadne counts in chars while the parser reports
/// byte offsets, so the span is converted first.
pub fn parse_error_report<'a>(path: &'a String, src: &str, err: &ParseError) -> DiagnosticReport<'a> {
    let span = char_range(src, err.span().into_range());

    Report::build(ReportKind::Error, path, span.start)
        .with_code(err.kind().code())
        .with_message(err.kind().to_string())
        .with_label(
            Label::new((path, span))
                .with_message(label_message(err.kind()))
                .with_color(Color::Red),
        )
        .finish()
}

pub fn print_parse_error(path: &String, src: &str, err: &ParseError) -> anyhow::Result<()> {
    parse_error_report(path, src, err).eprint((path, Source::from(src)))?;
    Ok(())
}

fn label_message(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::InvalidNumber(_) => "not a valid JSON number".to_string(),
        ErrorKind::InvalidKeyword(_) => "unquoted literal".to_string(),
        ErrorKind::InvalidEscape(reason) => reason.clone(),
        ErrorKind::UnterminatedString => "this string is never closed".to_string(),
        ErrorKind::UnbalancedDelimiter(open) => {
            format!("this {} has no matching close", open.fg(Color::Yellow))
        }
        ErrorKind::MissingColon => "expected `:` here".to_string(),
        ErrorKind::UnexpectedCharacter(_) => "unexpected here".to_string(),
        ErrorKind::UnexpectedEndOfInput => "expected a value here".to_string(),
        ErrorKind::InvalidTopLevel => "expected `[` or `{` here".to_string(),
        ErrorKind::TrailingCharacters => "nothing may follow the top level value".to_string(),
        ErrorKind::NestingTooDeep { limit, .. } => {
            format!("nested deeper than {} levels", limit.fg(Color::Yellow))
        }
        ErrorKind::InputTooLarge { limit, .. } => format!("input exceeds {limit} bytes"),
    }
}

/// Convert a byte range to a char range, widening an empty range to one char where possible so
/// the label stays visible.
fn char_range(src: &str, bytes: Range<usize>) -> Range<usize> {
    // A byte inside a char counts that whole char.
    let char_offset = |byte: usize| src.char_indices().take_while(|&(i, _)| i < byte).count();
    let start = char_offset(bytes.start);
    let end = char_offset(bytes.end);
    if start == end && start < src.chars().count() {
        start..start + 1
    } else {
        start..end
    }
}
