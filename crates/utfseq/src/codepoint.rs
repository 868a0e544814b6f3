//! Scalar value helpers shared by every encoding.

/// A Unicode codepoint as read from or written to code-unit storage.
///
/// Values handed to `encode` may be anything; values returned by a decoder
/// are always valid scalar values (or the policy's replacement).
pub type Codepoint = u32;

/// Largest valid scalar value.
pub const MAX_CODEPOINT: Codepoint = 0x10_FFFF;

/// The default substitute used by [`Replace`](crate::Replace).
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

pub(crate) const SURROGATE_START: Codepoint = 0xD800;
pub(crate) const SURROGATE_END: Codepoint = 0xDFFF;

/// Whether `codepoint` lies in the reserved surrogate band.
#[inline]
#[must_use]
pub const fn is_surrogate(codepoint: Codepoint) -> bool {
    SURROGATE_START <= codepoint && codepoint <= SURROGATE_END
}

/// Whether `codepoint` is a Unicode scalar value, i.e. at most `U+10FFFF` and
/// not a surrogate.
#[inline]
#[must_use]
pub const fn is_scalar_value(codepoint: Codepoint) -> bool {
    codepoint <= MAX_CODEPOINT && !is_surrogate(codepoint)
}
