//! Malformed-input strategies.
//!
//! A policy is consulted at exactly two points: when a decoder cannot assemble
//! a codepoint from the code units in front of it, and when a codepoint handed
//! to an encoder (or assembled by a decoder) is not a scalar value. It either
//! hands back a substitute codepoint or fails the whole operation.
//!
//! Policies are plain values passed to each call; nothing in this crate
//! stores one beyond the traversal it was given to.

use crate::{
    codepoint::{Codepoint, REPLACEMENT_CHARACTER},
    error::EncodingError,
};

/// Decides what happens on malformed input or unencodable codepoints.
pub trait Policy {
    /// Called when code units do not form a valid sequence.
    ///
    /// # Errors
    ///
    /// Strict policies return [`EncodingError::MalformedSequence`].
    fn replace_invalid_codepoint(&self) -> Result<Codepoint, EncodingError>;

    /// Called with a value that is not a scalar value.
    ///
    /// The returned substitute must differ from `original`.
    ///
    /// # Errors
    ///
    /// Strict policies return [`EncodingError::InvalidCodepoint`].
    fn replace_invalid_codepoint_of(&self, original: Codepoint)
    -> Result<Codepoint, EncodingError>;

    /// Whether this policy recovers from malformed input instead of failing.
    fn replaces_malformed(&self) -> bool;
}

impl<P: Policy + ?Sized> Policy for &P {
    #[inline]
    fn replace_invalid_codepoint(&self) -> Result<Codepoint, EncodingError> {
        (**self).replace_invalid_codepoint()
    }

    #[inline]
    fn replace_invalid_codepoint_of(
        &self,
        original: Codepoint,
    ) -> Result<Codepoint, EncodingError> {
        (**self).replace_invalid_codepoint_of(original)
    }

    #[inline]
    fn replaces_malformed(&self) -> bool {
        (**self).replaces_malformed()
    }
}

/// Substitute a fixed character for every malformed sequence or invalid
/// codepoint.
///
/// The substitute is a `char`, so it is encodable in every encoding and an
/// encode retry always terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Replace {
    substitute: char,
}

impl Replace {
    /// Replace with `U+FFFD REPLACEMENT CHARACTER`.
    pub const DEFAULT: Self = Self::new(REPLACEMENT_CHARACTER);

    /// Replace with `substitute`.
    #[must_use]
    pub const fn new(substitute: char) -> Self {
        Self { substitute }
    }

    /// The character substituted for bad input.
    #[must_use]
    pub const fn substitute(&self) -> char {
        self.substitute
    }
}

impl Default for Replace {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Policy for Replace {
    #[inline]
    fn replace_invalid_codepoint(&self) -> Result<Codepoint, EncodingError> {
        tracing::trace!(
            substitute = self.substitute as Codepoint,
            "substituting malformed sequence"
        );
        Ok(self.substitute as Codepoint)
    }

    #[inline]
    fn replace_invalid_codepoint_of(
        &self,
        original: Codepoint,
    ) -> Result<Codepoint, EncodingError> {
        tracing::trace!(
            original,
            substitute = self.substitute as Codepoint,
            "substituting invalid codepoint"
        );
        Ok(self.substitute as Codepoint)
    }

    #[inline]
    fn replaces_malformed(&self) -> bool {
        true
    }
}

/// Fail on the first malformed sequence or invalid codepoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Strict;

impl Policy for Strict {
    #[inline]
    fn replace_invalid_codepoint(&self) -> Result<Codepoint, EncodingError> {
        Err(EncodingError::MalformedSequence)
    }

    #[inline]
    fn replace_invalid_codepoint_of(
        &self,
        original: Codepoint,
    ) -> Result<Codepoint, EncodingError> {
        Err(EncodingError::InvalidCodepoint(original))
    }

    #[inline]
    fn replaces_malformed(&self) -> bool {
        false
    }
}
