//! Resource limits applied while parsing.
//!
//! Recursion depth equals document nesting depth, so an adversarial input such as ten thousand
//! `[` would overflow the call stack without a cap. Input size is capped as well because the
//! scope search over a composite is linear in its length.

/// Default maximum nesting depth of arrays and objects.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Default maximum input size in bytes (64 MiB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 64 * 1024 * 1024;

/// Limits enforced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects. The top level value is depth 1.
    pub max_nesting_depth: usize,
    /// Maximum total input size in bytes.
    pub max_input_size: usize,
}

impl Limits {
    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_nesting_depth: 32,
            max_input_size: 1024 * 1024, // 1 MiB
        }
    }

    /// No input size cap, for trusted local files. Nesting keeps the default bound.
    pub const fn lenient() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_input_size: usize::MAX,
        }
    }

    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub const fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}
