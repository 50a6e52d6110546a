use std::ops::Range;

/// A [`Span`] is a contiguous byte region of the parsed input. Every [`ParseError`] carries one
/// so that callers can point at the offending source text. An invariant to be maintained is that
/// `lo <= hi`; a span violating it is a logic bug in the parser.
///
/// [`ParseError`]: crate::ParseError
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    /// Construct a new span. Will panic if `lo > hi`. Prefer this constructor to construct a new
    /// [`Span`] over using direct struct initialization.
    pub const fn new(lo: usize, hi: usize) -> Self {
        assert!(lo <= hi, "`lo` must not be larger than `hi`");
        Span { lo, hi }
    }

    /// A zero-width span sitting at `offset`.
    pub const fn point(offset: usize) -> Self {
        Span {
            lo: offset,
            hi: offset,
        }
    }

    pub const fn len(&self) -> usize {
        self.hi - self.lo
    }

    pub const fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    pub fn into_range(self) -> Range<usize> {
        self.lo..self.hi
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.into_range()
    }
}
