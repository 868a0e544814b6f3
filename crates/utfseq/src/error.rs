use thiserror::Error;

use crate::codepoint::Codepoint;

/// Raised by a strict policy when the input cannot be transcoded.
///
/// Reaching the end of a range is never an error: iteration reports it by
/// returning `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingError {
    /// The code units do not form a complete, well-formed sequence: a bad
    /// lead or continuation unit, an unpaired surrogate, or a truncated tail.
    #[error("malformed code unit sequence")]
    MalformedSequence,
    /// The value is outside `0..=0x10FFFF` or is a surrogate.
    #[error("invalid codepoint U+{0:04X}")]
    InvalidCodepoint(Codepoint),
}

/// The result of a failed validation: where the first bad sequence starts
/// and what was wrong with it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{source} at code unit {valid_up_to}")]
pub struct ValidationError {
    pub(crate) source: EncodingError,
    pub(crate) valid_up_to: usize,
}

impl ValidationError {
    /// Number of leading code units that form well-formed codepoints.
    #[must_use]
    pub fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// The underlying decoding error.
    #[must_use]
    pub fn error(&self) -> EncodingError {
        self.source
    }
}
