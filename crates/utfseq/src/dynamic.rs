//! Strings whose encoding is only known at runtime.

use core::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
};

use crate::{
    encoding::{Encoding, Utf8, Utf16, Utf32},
    string::{Chars, UnicodeString, Utf8String, Utf16String, Utf32String},
};

/// A string whose encoding is chosen at runtime.
///
/// Equality compares codepoints, so the same text is equal whatever variant
/// holds it.
#[derive(Debug, Clone)]
pub enum AnyUnicodeString {
    /// Stored as UTF-8.
    Utf8(Utf8String),
    /// Stored as UTF-16.
    Utf16(Utf16String),
    /// Stored as UTF-32.
    Utf32(Utf32String),
}

impl AnyUnicodeString {
    /// Name of the storage encoding, e.g. `"UTF-16"`.
    #[must_use]
    pub fn encoding_name(&self) -> &'static str {
        match self {
            Self::Utf8(_) => Utf8::NAME,
            Self::Utf16(_) => Utf16::NAME,
            Self::Utf32(_) => Utf32::NAME,
        }
    }

    /// The codepoints, front to back.
    #[must_use]
    pub fn codepoints(&self) -> AnyCodepoints<'_> {
        match self {
            Self::Utf8(s) => AnyCodepoints::Utf8(s.codepoints()),
            Self::Utf16(s) => AnyCodepoints::Utf16(s.codepoints()),
            Self::Utf32(s) => AnyCodepoints::Utf32(s.codepoints()),
        }
    }

    /// Number of codepoints.
    #[must_use]
    pub fn codepoint_length(&self) -> usize {
        match self {
            Self::Utf8(s) => s.codepoint_length(),
            Self::Utf16(s) => s.codepoint_length(),
            Self::Utf32(s) => s.codepoint_length(),
        }
    }

    /// Length in storage code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        match self {
            Self::Utf8(s) => s.len_units(),
            Self::Utf16(s) => s.len_units(),
            Self::Utf32(s) => s.len_units(),
        }
    }

    /// Whether the string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len_units() == 0
    }

    /// The same text in encoding `F`.
    #[must_use]
    pub fn transcode<F: Encoding>(&self) -> UnicodeString<F> {
        match self {
            Self::Utf8(s) => s.transcode(),
            Self::Utf16(s) => s.transcode(),
            Self::Utf32(s) => s.transcode(),
        }
    }
}

impl PartialEq for AnyUnicodeString {
    fn eq(&self, other: &Self) -> bool {
        self.codepoints().eq(other.codepoints())
    }
}

impl Eq for AnyUnicodeString {}

impl Hash for AnyUnicodeString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // No discriminant: equal text must hash alike across variants.
        match self {
            Self::Utf8(s) => s.hash(state),
            Self::Utf16(s) => s.hash(state),
            Self::Utf32(s) => s.hash(state),
        }
    }
}

impl From<Utf8String> for AnyUnicodeString {
    fn from(s: Utf8String) -> Self {
        Self::Utf8(s)
    }
}

impl From<Utf16String> for AnyUnicodeString {
    fn from(s: Utf16String) -> Self {
        Self::Utf16(s)
    }
}

impl From<Utf32String> for AnyUnicodeString {
    fn from(s: Utf32String) -> Self {
        Self::Utf32(s)
    }
}

impl fmt::Display for AnyUnicodeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8(s) => fmt::Display::fmt(s, f),
            Self::Utf16(s) => fmt::Display::fmt(s, f),
            Self::Utf32(s) => fmt::Display::fmt(s, f),
        }
    }
}

/// Iterator over the `char`s of an [`AnyUnicodeString`].
#[derive(Debug, Clone)]
pub enum AnyCodepoints<'a> {
    /// Over UTF-8 storage.
    Utf8(Chars<'a, Utf8>),
    /// Over UTF-16 storage.
    Utf16(Chars<'a, Utf16>),
    /// Over UTF-32 storage.
    Utf32(Chars<'a, Utf32>),
}

impl Iterator for AnyCodepoints<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            Self::Utf8(it) => it.next(),
            Self::Utf16(it) => it.next(),
            Self::Utf32(it) => it.next(),
        }
    }
}

impl DoubleEndedIterator for AnyCodepoints<'_> {
    fn next_back(&mut self) -> Option<char> {
        match self {
            Self::Utf8(it) => it.next_back(),
            Self::Utf16(it) => it.next_back(),
            Self::Utf32(it) => it.next_back(),
        }
    }
}

impl FusedIterator for AnyCodepoints<'_> {}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;

    #[test]
    fn variants_compare_by_text() {
        let a = AnyUnicodeString::from(Utf8String::from("ωmega"));
        let b = AnyUnicodeString::from(Utf16String::from("ωmega"));
        let c = AnyUnicodeString::from(Utf32String::from("omega"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.encoding_name(), "UTF-8");
        assert_eq!(b.encoding_name(), "UTF-16");
        assert_eq!(a.len_units(), 6);
        assert_eq!(b.len_units(), 5);
        assert_eq!(a.codepoint_length(), b.codepoint_length());
    }

    #[test]
    fn iterates_and_displays_through_the_variant() {
        let s = AnyUnicodeString::Utf32(Utf32String::from("a🙂"));
        assert_eq!(s.codepoints().rev().collect::<Vec<_>>(), ['🙂', 'a']);
        assert_eq!(s.to_string(), "a🙂");
        assert_eq!(s.transcode::<Utf16>().as_units(), [0x61, 0xD83D, 0xDE42]);
        assert!(!s.is_empty());
    }
}
