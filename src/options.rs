//! Decode and encode configuration.

/// Which encoding rules the input is held to while decoding.
///
/// Encoding always produces DER.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Rules {
    /// Distinguished Encoding Rules: only the canonical encoding is accepted.
    #[default]
    Der,
    /// Basic Encoding Rules: indefinite lengths, non-minimal tag, length and
    /// integer encodings, and loose BOOLEAN/string/time forms are accepted.
    Ber,
}

/// Classic bound on constructed nesting for untrusted input.
pub const DEFAULT_MAX_DEPTH: usize = 30;

/// Options for one decode, encode or lifecycle call.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Options {
    pub rules: Rules,
    /// Deepest descriptor nesting walked before failing with
    /// [`DepthExceeded`](crate::ErrorKind::DepthExceeded).
    pub max_depth: usize,
}

impl Options {
    pub const fn der() -> Self {
        Self { rules: Rules::Der, max_depth: DEFAULT_MAX_DEPTH }
    }

    pub const fn ber() -> Self {
        Self { rules: Rules::Ber, max_depth: DEFAULT_MAX_DEPTH }
    }

    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { rules: self.rules, max_depth }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::der()
    }
}
