//! Lazy, bidirectional transcoding between UTF-8, UTF-16 and UTF-32.
//!
//! The crate is layered:
//!
//! - [`Encoding`] implementations ([`Utf8`], [`Utf16`], [`Utf32`]) provide
//!   pure encode / decode / decode-previous primitives over any
//!   [`CodeUnitPosition`] and [`CodeUnitSink`];
//! - a [`Policy`] ([`Replace`], [`Strict`], or runtime [`DecodeOptions`])
//!   decides what happens on malformed input;
//! - [`CodepointCursor`] and [`Codepoints`] walk code units one codepoint at a
//!   time in either direction, decoding lazily;
//! - [`UnicodeString`] and [`UnicodeStringBuilder`] own always-well-formed
//!   storage in a chosen encoding, with [`AnyUnicodeString`] when the
//!   encoding is only known at runtime.
//!
//! ```rust
//! use utfseq::{Utf8String, Utf16String};
//!
//! let utf8 = Utf8String::from_units(b"caf\xC3\xA9 \xFF!".to_vec());
//! assert_eq!(utf8.to_string(), "café \u{FFFD}!");
//!
//! let utf16: Utf16String = utf8.transcode();
//! assert_eq!(utf16.len_units(), 7);
//! assert_eq!(utf8, utf16);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod codepoint;
mod cursor;
mod dynamic;
mod encoding;
mod error;
mod options;
mod policy;
mod string;
mod units;
mod validate;

#[cfg(test)]
mod tests;

pub use codepoint::{Codepoint, MAX_CODEPOINT, REPLACEMENT_CHARACTER, is_scalar_value, is_surrogate};
pub use cursor::{CodepointCursor, Codepoints, codepoints};
pub use dynamic::{AnyCodepoints, AnyUnicodeString};
pub use encoding::{Encoding, Utf8, Utf16, Utf32, encoded_len};
pub use error::{EncodingError, ValidationError};
pub use options::{DecodeOptions, MalformedInput};
pub use policy::{Policy, Replace, Strict};
pub use string::{
    BuilderUnits, Chars, StringCursor, UnicodeString, UnicodeStringBuilder, Utf8String,
    Utf8StringBuilder, Utf16String, Utf16StringBuilder, Utf32String, Utf32StringBuilder,
};
pub use units::{
    CodeUnitPosition, CodeUnitRange, CodeUnitSink, CountingSink, DequePosition, SlicePosition,
};
pub use validate::{validate, validate_units, validate_up_to};
