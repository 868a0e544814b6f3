//! UTF-8: one to four bytes per codepoint.
//!
//! ```text
//! U+0000  ..= U+007F    0xxxxxxx
//! U+0080  ..= U+07FF    110xxxxx 10xxxxxx
//! U+0800  ..= U+FFFF    1110xxxx 10xxxxxx 10xxxxxx
//! U+10000 ..= U+10FFFF  11110xxx 10xxxxxx 10xxxxxx 10xxxxxx
//! ```
//!
//! Overlong forms, surrogates and values above `U+10FFFF` are rejected.

use super::{Encoding, check_decoded, substitute};
use crate::{
    codepoint::{Codepoint, is_scalar_value},
    error::EncodingError,
    policy::{Policy, Replace},
    units::{CodeUnitPosition, CodeUnitSink},
};

const DOUBLE_BYTE_PREFIX: u8 = 0xC0;
const TRIPLE_BYTE_PREFIX: u8 = 0xE0;
const QUAD_BYTE_PREFIX: u8 = 0xF0;
const CONTINUATION_PREFIX: u8 = 0x80;

const CONTINUATION_PAYLOAD: u8 = 0x3F;

/// The UTF-8 encoding form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utf8;

#[inline]
fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == CONTINUATION_PREFIX
}

/// `0xC0` and `0xC1` could only start overlong two-byte forms; `0xF5` and up
/// could only start values above `U+10FFFF`.
#[inline]
fn is_valid_first_byte(byte: u8) -> bool {
    !is_continuation_byte(byte) && byte != 0xC0 && byte != 0xC1 && byte < 0xF5
}

/// Sequence length declared by a lead byte, or `None` for anything that is
/// not a lead byte.
#[inline]
fn sequence_width(lead: u8) -> Option<usize> {
    if lead & 0x80 == 0 {
        Some(1)
    } else if lead & 0xE0 == DOUBLE_BYTE_PREFIX {
        Some(2)
    } else if lead & 0xF0 == TRIPLE_BYTE_PREFIX {
        Some(3)
    } else if lead & 0xF8 == QUAD_BYTE_PREFIX {
        Some(4)
    } else {
        None
    }
}

/// Smallest codepoint that needs `width` bytes.
#[inline]
fn min_codepoint(width: usize) -> Codepoint {
    match width {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    }
}

#[inline]
fn continuation_byte(codepoint: Codepoint, shift: u32) -> u8 {
    #[expect(clippy::cast_possible_truncation)]
    let payload = (codepoint >> shift) as u8 & CONTINUATION_PAYLOAD;
    CONTINUATION_PREFIX | payload
}

impl Encoding for Utf8 {
    type Unit = u8;

    const NAME: &'static str = "UTF-8";
    const MAX_UNITS_PER_CODEPOINT: usize = 4;

    #[inline]
    fn is_valid_codepoint(codepoint: Codepoint) -> bool {
        is_scalar_value(codepoint)
    }

    #[expect(clippy::cast_possible_truncation)]
    fn encode<S, P>(codepoint: Codepoint, sink: &mut S, policy: &P) -> Result<(), EncodingError>
    where
        S: CodeUnitSink<u8> + ?Sized,
        P: Policy + ?Sized,
    {
        let codepoint = if Self::is_valid_codepoint(codepoint) {
            codepoint
        } else {
            substitute::<Self, P>(codepoint, policy)?
        };

        if codepoint < 0x80 {
            sink.push_unit(codepoint as u8);
        } else if codepoint < 0x800 {
            sink.push_unit(DOUBLE_BYTE_PREFIX | (codepoint >> 6) as u8);
            sink.push_unit(continuation_byte(codepoint, 0));
        } else if codepoint < 0x1_0000 {
            sink.push_unit(TRIPLE_BYTE_PREFIX | (codepoint >> 12) as u8);
            sink.push_unit(continuation_byte(codepoint, 6));
            sink.push_unit(continuation_byte(codepoint, 0));
        } else {
            sink.push_unit(QUAD_BYTE_PREFIX | (codepoint >> 18) as u8);
            sink.push_unit(continuation_byte(codepoint, 12));
            sink.push_unit(continuation_byte(codepoint, 6));
            sink.push_unit(continuation_byte(codepoint, 0));
        }
        Ok(())
    }

    fn decode<C, P>(cursor: &mut C, end: &C, policy: &P) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = u8>,
        P: Policy + ?Sized,
    {
        if cursor == end {
            return policy.replace_invalid_codepoint();
        }

        let first = cursor.unit();
        cursor.step_forward();

        if !is_valid_first_byte(first) {
            return policy.replace_invalid_codepoint();
        }
        let Some(width) = sequence_width(first) else {
            return policy.replace_invalid_codepoint();
        };
        if width == 1 {
            return Ok(Codepoint::from(first));
        }

        // the lead byte keeps 7 - width payload bits
        let mut codepoint = Codepoint::from(first & (0x7F >> width));
        for _ in 1..width {
            if cursor == end {
                return policy.replace_invalid_codepoint();
            }
            let byte = cursor.unit();
            if !is_continuation_byte(byte) {
                return policy.replace_invalid_codepoint();
            }
            cursor.step_forward();
            codepoint = (codepoint << 6) | Codepoint::from(byte & CONTINUATION_PAYLOAD);
        }

        if codepoint < min_codepoint(width) {
            return policy.replace_invalid_codepoint();
        }
        check_decoded::<Self, P>(codepoint, policy)
    }

    fn decode_previous<C, P>(
        begin: &C,
        cursor: &mut C,
        policy: &P,
    ) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = u8>,
        P: Policy + ?Sized,
    {
        if cursor == begin {
            return policy.replace_invalid_codepoint();
        }

        let end = cursor.clone();
        let mut last = end.clone();
        last.step_back();

        // Walk back over continuation bytes looking for the lead byte.
        let mut start = last.clone();
        let mut steps = 1;
        while is_continuation_byte(start.unit()) && steps < Self::MAX_UNITS_PER_CODEPOINT {
            if start == *begin {
                break;
            }
            start.step_back();
            steps += 1;
        }

        if start != last {
            // The lead only owns the run if a forward decode from it stops
            // exactly here; otherwise the last byte stands alone.
            let mut probe = start.clone();
            Self::decode(&mut probe, &end, &Replace::DEFAULT)?;
            if probe == end {
                *cursor = start;
                let mut forward = cursor.clone();
                return Self::decode(&mut forward, &end, policy);
            }
        }

        *cursor = last;
        let mut forward = cursor.clone();
        Self::decode(&mut forward, &end, policy)
    }
}
