//! Per-encoding codec primitives.
//!
//! Each encoding is a zero-sized marker type implementing [`Encoding`]. The
//! primitives are pure: they read code units through a
//! [`CodeUnitPosition`], write them through a [`CodeUnitSink`], and consult a
//! [`Policy`] whenever the input cannot be transcoded.
//!
//! Backward decoding resynchronizes the same way forward decoding does: a
//! unit that fails validation is never consumed as part of the preceding
//! sequence, so a run decoded forward and the same run decoded backward
//! always split into the same codepoints.

mod utf16;
mod utf32;
mod utf8;

use core::{fmt::Debug, hash::Hash};

pub use utf8::Utf8;
pub use utf16::Utf16;
pub use utf32::Utf32;

use crate::{
    codepoint::Codepoint,
    error::EncodingError,
    policy::Policy,
    units::{CodeUnitPosition, CodeUnitSink, CountingSink},
};

/// A Unicode encoding form.
pub trait Encoding: Copy + Default + Debug + Send + Sync + 'static {
    /// The fixed-width storage atom.
    type Unit: Copy + Debug + Eq + Hash + Send + Sync + 'static;

    /// Human-readable name, e.g. `"UTF-8"`.
    const NAME: &'static str;

    /// Upper bound on units produced for one codepoint.
    const MAX_UNITS_PER_CODEPOINT: usize;

    /// Whether `codepoint` may be produced by a decoder or written by an
    /// encoder without consulting the policy.
    fn is_valid_codepoint(codepoint: Codepoint) -> bool;

    /// Appends the canonical units of `codepoint` to `sink`.
    ///
    /// An unencodable codepoint is replaced by asking the policy; the
    /// substitute is encoded instead. Nothing is written on error.
    ///
    /// # Errors
    ///
    /// Returns the policy's error, or [`EncodingError::InvalidCodepoint`]
    /// when the policy's substitute is itself unencodable.
    fn encode<S, P>(codepoint: Codepoint, sink: &mut S, policy: &P) -> Result<(), EncodingError>
    where
        S: CodeUnitSink<Self::Unit> + ?Sized,
        P: Policy + ?Sized;

    /// Decodes the codepoint starting at `cursor`, advancing `cursor` past
    /// the units consumed.
    ///
    /// On malformed input the cursor stays past whatever prefix was already
    /// accepted; the unit that failed validation is not consumed unless it
    /// was the first one read.
    ///
    /// # Errors
    ///
    /// Returns the policy's error on malformed input.
    fn decode<C, P>(cursor: &mut C, end: &C, policy: &P) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = Self::Unit>,
        P: Policy + ?Sized;

    /// Decodes the codepoint that ends at `cursor`, moving `cursor` back to
    /// its first unit so that a following [`decode`](Self::decode) yields the
    /// same codepoint.
    ///
    /// # Errors
    ///
    /// Returns the policy's error on malformed input.
    fn decode_previous<C, P>(
        begin: &C,
        cursor: &mut C,
        policy: &P,
    ) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = Self::Unit>,
        P: Policy + ?Sized;

    /// A reservation hint for encoding `codepoints` codepoints.
    ///
    /// Never relied on for correctness.
    #[inline]
    #[must_use]
    fn estimate_codeunit_length(codepoints: usize) -> usize {
        codepoints.saturating_mul(Self::MAX_UNITS_PER_CODEPOINT)
    }
}

/// Asks the policy for a stand-in for an unencodable `codepoint`.
#[inline]
pub(crate) fn substitute<E: Encoding, P: Policy + ?Sized>(
    codepoint: Codepoint,
    policy: &P,
) -> Result<Codepoint, EncodingError> {
    let replacement = policy.replace_invalid_codepoint_of(codepoint)?;
    if replacement == codepoint || !E::is_valid_codepoint(replacement) {
        return Err(EncodingError::InvalidCodepoint(replacement));
    }
    Ok(replacement)
}

/// Checks an assembled candidate before handing it out.
#[inline]
pub(crate) fn check_decoded<E: Encoding, P: Policy + ?Sized>(
    candidate: Codepoint,
    policy: &P,
) -> Result<Codepoint, EncodingError> {
    if E::is_valid_codepoint(candidate) {
        Ok(candidate)
    } else {
        policy.replace_invalid_codepoint_of(candidate)
    }
}

/// Number of units `codepoint` occupies in `E`, after policy substitution.
///
/// # Errors
///
/// Returns the policy's error if `codepoint` is unencodable.
pub fn encoded_len<E: Encoding, P: Policy + ?Sized>(
    codepoint: Codepoint,
    policy: &P,
) -> Result<usize, EncodingError> {
    let mut sink = CountingSink::new();
    E::encode(codepoint, &mut sink, policy)?;
    Ok(sink.count())
}
