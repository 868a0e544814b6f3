//! Owned strings in a fixed encoding.
//!
//! [`UnicodeStringBuilder`] is the mutable side: it accepts codepoints (and,
//! for callers that know what they are doing, raw code units) and is frozen
//! into an immutable [`UnicodeString`]. Freezing validates, so a
//! `UnicodeString` is always well-formed in its encoding and can be iterated
//! with a strict policy that never fails.

use alloc::{boxed::Box, vec::Vec};
use core::{
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
    iter::FusedIterator,
};

use bstr::BStr;

use crate::{
    codepoint::Codepoint,
    cursor::{CodepointCursor, Codepoints, codepoints},
    encoding::{Encoding, Utf8, Utf16, Utf32},
    error::{EncodingError, ValidationError},
    policy::{Policy, Replace, Strict},
    units::{CodeUnitRange, CodeUnitSink, SlicePosition},
    validate::validate_up_to,
};

/// A cursor over the codepoints of a [`UnicodeString`].
pub type StringCursor<'a, E> =
    CodepointCursor<E, SlicePosition<'a, <E as Encoding>::Unit>, Strict>;

/// An immutable, well-formed string stored in encoding `E`.
#[derive(Clone)]
pub struct UnicodeString<E: Encoding> {
    units: Box<[E::Unit]>,
}

impl<E: Encoding> Default for UnicodeString<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive, growable storage that freezes into a [`UnicodeString`].
#[derive(Debug, Clone)]
pub struct UnicodeStringBuilder<E: Encoding> {
    units: Vec<E::Unit>,
}

impl<E: Encoding> Default for UnicodeStringBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// UTF-8 string.
pub type Utf8String = UnicodeString<Utf8>;
/// UTF-16 string.
pub type Utf16String = UnicodeString<Utf16>;
/// UTF-32 string.
pub type Utf32String = UnicodeString<Utf32>;
/// UTF-8 builder.
pub type Utf8StringBuilder = UnicodeStringBuilder<Utf8>;
/// UTF-16 builder.
pub type Utf16StringBuilder = UnicodeStringBuilder<Utf16>;
/// UTF-32 builder.
pub type Utf32StringBuilder = UnicodeStringBuilder<Utf32>;

/// Re-encodes everything `units` decodes to under `policy`.
fn sanitize<E, P>(units: &[E::Unit], policy: &P) -> Result<Vec<E::Unit>, EncodingError>
where
    E: Encoding,
    P: Policy + ?Sized,
{
    let mut out: Vec<E::Unit> = Vec::new();
    out.reserve_units(units.len());
    for codepoint in codepoints::<E, _, _>(units, policy) {
        E::encode(codepoint?, &mut out, policy)?;
    }
    Ok(out)
}

impl<E: Encoding> UnicodeStringBuilder<E> {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// An empty builder with room for about `codepoints` codepoints.
    #[must_use]
    pub fn with_codepoint_capacity(codepoints: usize) -> Self {
        Self {
            units: Vec::with_capacity(E::estimate_codeunit_length(codepoints)),
        }
    }

    /// Appends `codepoint`, asking `policy` about unencodable values.
    ///
    /// # Errors
    ///
    /// Returns the policy's error; nothing is appended in that case.
    pub fn push<P: Policy + ?Sized>(
        &mut self,
        codepoint: Codepoint,
        policy: &P,
    ) -> Result<(), EncodingError> {
        E::encode(codepoint, &mut self.units, policy)
    }

    /// Appends `ch`.
    pub fn push_char(&mut self, ch: char) {
        // Every encoding accepts every `char`, so strict encoding cannot fail.
        let pushed = E::encode(Codepoint::from(ch), &mut self.units, &Strict).is_ok();
        debug_assert!(pushed, "{} cannot encode {ch:?}", E::NAME);
    }

    /// Appends one raw code unit.
    ///
    /// The unit is not checked here; freezing validates the whole buffer.
    pub fn push_codeunit(&mut self, unit: E::Unit) {
        self.units.push(unit);
    }

    /// A code-unit sink appending to this builder.
    pub fn codeunit_sink(&mut self) -> BuilderUnits<'_, E> {
        BuilderUnits {
            units: &mut self.units,
        }
    }

    /// Appends the codepoints of `other`, transcoding from `F`.
    pub fn append<F: Encoding>(&mut self, other: &UnicodeString<F>) {
        // at least one unit per codepoint
        self.codeunit_sink().reserve_units(other.len_units());
        self.extend(other.codepoints());
    }

    /// Length in code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        self.units.len()
    }

    /// Whether nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The units written so far, which may not be well-formed.
    #[must_use]
    pub fn as_units(&self) -> &[E::Unit] {
        &self.units
    }

    /// Freezes the buffer, replacing malformed sequences with `U+FFFD`.
    #[must_use]
    pub fn freeze(self) -> UnicodeString<E> {
        UnicodeString::from_units(self.units)
    }

    /// Freezes the buffer, consulting `policy` on malformed sequences.
    ///
    /// # Errors
    ///
    /// Fails under a strict policy if the buffer is not well-formed.
    pub fn freeze_with<P: Policy + ?Sized>(
        self,
        policy: &P,
    ) -> Result<UnicodeString<E>, ValidationError> {
        UnicodeString::from_units_with(self.units, policy)
    }

    /// Freezes a copy of the buffer, leaving the builder usable.
    #[must_use]
    pub fn freeze_copy(&self) -> UnicodeString<E> {
        UnicodeString::from_units(self.units.clone())
    }
}

impl<E: Encoding> Extend<char> for UnicodeStringBuilder<E> {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.codeunit_sink()
            .reserve_units(E::estimate_codeunit_length(iter.size_hint().0));
        for ch in iter {
            self.push_char(ch);
        }
    }
}

/// A [`CodeUnitSink`] view of a [`UnicodeStringBuilder`].
#[derive(Debug)]
pub struct BuilderUnits<'a, E: Encoding> {
    units: &'a mut Vec<E::Unit>,
}

impl<E: Encoding> CodeUnitSink<E::Unit> for BuilderUnits<'_, E> {
    #[inline]
    fn push_unit(&mut self, unit: E::Unit) {
        self.units.push(unit);
    }

    fn reserve_units(&mut self, additional: usize) {
        self.units.reserve(additional);
    }
}

impl<E: Encoding> UnicodeString<E> {
    /// The empty string.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: Box::default(),
        }
    }

    fn from_valid(units: Vec<E::Unit>) -> Self {
        Self {
            units: units.into_boxed_slice(),
        }
    }

    /// Takes ownership of `units`, replacing each malformed sequence with
    /// `U+FFFD`.
    #[must_use]
    pub fn from_units(units: Vec<E::Unit>) -> Self {
        // Replace recovers from every malformed sequence.
        Self::from_units_with(units, &Replace::DEFAULT).unwrap_or_else(|_| Self::new())
    }

    /// Takes ownership of `units`, consulting `policy` on malformed
    /// sequences.
    ///
    /// Well-formed input is kept as-is without copying.
    ///
    /// # Errors
    ///
    /// Fails under a strict policy with the offset of the first malformed
    /// sequence.
    pub fn from_units_with<P: Policy + ?Sized>(
        units: Vec<E::Unit>,
        policy: &P,
    ) -> Result<Self, ValidationError> {
        let err = match validate_up_to::<E>(&units) {
            Ok(()) => return Ok(Self::from_valid(units)),
            Err(err) => err,
        };
        if !policy.replaces_malformed() {
            return Err(err);
        }
        tracing::debug!(
            encoding = E::NAME,
            valid_up_to = err.valid_up_to(),
            "sanitizing malformed code units"
        );
        let units = sanitize::<E, P>(&units, policy).map_err(|source| ValidationError {
            source,
            valid_up_to: err.valid_up_to(),
        })?;
        Ok(Self::from_valid(units))
    }

    /// Encodes `chars` in `E`.
    pub fn from_codepoints<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut builder = UnicodeStringBuilder::<E>::new();
        builder.extend(chars);
        Self::from_valid(builder.units)
    }

    /// The same text in encoding `F`.
    #[must_use]
    pub fn transcode<F: Encoding>(&self) -> UnicodeString<F> {
        let mut builder = UnicodeStringBuilder::<F>::new();
        builder.append(self);
        UnicodeString::from_valid(builder.units)
    }

    /// A builder holding a copy of this string.
    #[must_use]
    pub fn edit(&self) -> UnicodeStringBuilder<E> {
        UnicodeStringBuilder {
            units: self.units.to_vec(),
        }
    }

    /// A builder reusing this string's storage.
    #[must_use]
    pub fn into_builder(self) -> UnicodeStringBuilder<E> {
        UnicodeStringBuilder {
            units: self.units.into_vec(),
        }
    }

    /// This string followed by `other`, in `E`.
    #[must_use]
    pub fn concat<F: Encoding>(&self, other: &UnicodeString<F>) -> Self {
        let mut builder = self.edit();
        builder.append(other);
        Self::from_valid(builder.units)
    }

    /// The code units.
    #[must_use]
    pub fn as_units(&self) -> &[E::Unit] {
        &self.units
    }

    /// Length in code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        self.units.len()
    }

    /// Whether the string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of codepoints. Walks the whole string.
    #[must_use]
    pub fn codepoint_length(&self) -> usize {
        self.codepoints().count()
    }

    /// A cursor at the first codepoint.
    #[must_use]
    pub fn begin(&self) -> StringCursor<'_, E> {
        CodepointCursor::at_begin(
            self.units.begin_position(),
            self.units.end_position(),
            Strict,
        )
    }

    /// A cursor past the last codepoint.
    #[must_use]
    pub fn end(&self) -> StringCursor<'_, E> {
        CodepointCursor::at_end(
            self.units.begin_position(),
            self.units.end_position(),
            Strict,
        )
    }

    /// The codepoints, front to back.
    #[must_use]
    pub fn codepoints(&self) -> Chars<'_, E> {
        Chars {
            inner: Codepoints::between(self.begin(), self.end()),
        }
    }
}

impl UnicodeString<Utf8> {
    /// The string as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Well-formed UTF-8 by construction.
        core::str::from_utf8(&self.units).unwrap_or_default()
    }

    /// The bytes as a [`BStr`].
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(&self.units)
    }
}

impl<E: Encoding> From<&str> for UnicodeString<E> {
    fn from(s: &str) -> Self {
        Self::from_codepoints(s.chars())
    }
}

impl<E: Encoding> FromIterator<char> for UnicodeString<E> {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::from_codepoints(iter)
    }
}

impl<E: Encoding, F: Encoding> PartialEq<UnicodeString<F>> for UnicodeString<E> {
    fn eq(&self, other: &UnicodeString<F>) -> bool {
        self.codepoints().eq(other.codepoints())
    }
}

impl<E: Encoding> Eq for UnicodeString<E> {}

impl<E: Encoding> PartialEq<str> for UnicodeString<E> {
    fn eq(&self, other: &str) -> bool {
        self.codepoints().eq(other.chars())
    }
}

impl<E: Encoding> PartialEq<&str> for UnicodeString<E> {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl<E: Encoding> Hash for UnicodeString<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash codepoints so equal text hashes alike in every encoding.
        let mut count = 0usize;
        for ch in self.codepoints() {
            ch.hash(state);
            count += 1;
        }
        state.write_usize(count);
    }
}

impl<E: Encoding> fmt::Display for UnicodeString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.codepoints().try_for_each(|ch| f.write_char(ch))
    }
}

impl<E: Encoding> fmt::Debug for UnicodeString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::with_capacity(self.units.len());
        for ch in self.codepoints() {
            bytes.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
        }
        fmt::Debug::fmt(BStr::new(&bytes), f)
    }
}

/// Iterator over the `char`s of a [`UnicodeString`].
#[derive(Debug, Clone)]
pub struct Chars<'a, E: Encoding> {
    inner: Codepoints<E, SlicePosition<'a, E::Unit>, Strict>,
}

impl<E: Encoding> Iterator for Chars<'_, E> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.inner.next()?.ok().and_then(char::from_u32)
    }
}

impl<E: Encoding> DoubleEndedIterator for Chars<'_, E> {
    fn next_back(&mut self) -> Option<char> {
        self.inner.next_back()?.ok().and_then(char::from_u32)
    }
}

impl<E: Encoding> FusedIterator for Chars<'_, E> {}
