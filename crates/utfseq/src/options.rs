//! Runtime-selected malformed-input handling.

use crate::{
    codepoint::{Codepoint, REPLACEMENT_CHARACTER},
    error::EncodingError,
    policy::{Policy, Replace, Strict},
};

/// How malformed input is treated when the policy is chosen at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MalformedInput {
    /// Substitute [`DecodeOptions::replacement`] and continue.
    #[default]
    Replace,
    /// Fail the operation.
    Strict,
}

/// Runtime-configurable transcoding policy.
///
/// The static policies [`Replace`] and [`Strict`] cover the common cases;
/// this type is for callers who select the behavior from configuration.
///
/// # Examples
///
/// ```rust
/// use utfseq::{DecodeOptions, MalformedInput, Utf8String};
///
/// let options = DecodeOptions {
///     malformed: MalformedInput::Replace,
///     replacement: '?',
/// };
/// let s = Utf8String::from_units_with(b"a\xFFb".to_vec(), &options).unwrap();
/// assert_eq!(s.to_string(), "a?b");
/// ```
///
/// # Default
///
/// Replace malformed input with `U+FFFD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Whether to substitute or fail on malformed input.
    ///
    /// # Default
    ///
    /// [`MalformedInput::Replace`]
    pub malformed: MalformedInput,

    /// The substitute used in [`MalformedInput::Replace`] mode.
    ///
    /// Ignored in strict mode.
    ///
    /// # Default
    ///
    /// `U+FFFD REPLACEMENT CHARACTER`
    pub replacement: char,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            malformed: MalformedInput::Replace,
            replacement: REPLACEMENT_CHARACTER,
        }
    }
}

impl DecodeOptions {
    /// Options that fail on the first malformed sequence.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            malformed: MalformedInput::Strict,
            ..Self::default()
        }
    }
}

impl Policy for DecodeOptions {
    #[inline]
    fn replace_invalid_codepoint(&self) -> Result<Codepoint, EncodingError> {
        match self.malformed {
            MalformedInput::Replace => Replace::new(self.replacement).replace_invalid_codepoint(),
            MalformedInput::Strict => Strict.replace_invalid_codepoint(),
        }
    }

    #[inline]
    fn replace_invalid_codepoint_of(
        &self,
        original: Codepoint,
    ) -> Result<Codepoint, EncodingError> {
        match self.malformed {
            MalformedInput::Replace => {
                Replace::new(self.replacement).replace_invalid_codepoint_of(original)
            }
            MalformedInput::Strict => Strict.replace_invalid_codepoint_of(original),
        }
    }

    #[inline]
    fn replaces_malformed(&self) -> bool {
        self.malformed == MalformedInput::Replace
    }
}
