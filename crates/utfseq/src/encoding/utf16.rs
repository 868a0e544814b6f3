//! UTF-16: one unit for the BMP, a surrogate pair above it.
//!
//! ```text
//! 0000 0000 xxxx xxxx xxxx xxxx  ->  xxxx xxxx xxxx xxxx
//! 000u uuuu xxxx xxxx xxxx xxxx  ->  1101 10ww wwxx xxxx 1101 11xx xxxx xxxx
//! where wwww = uuuuu - 1
//! ```

use super::{Encoding, check_decoded, substitute};
use crate::{
    codepoint::{Codepoint, is_scalar_value},
    error::EncodingError,
    policy::Policy,
    units::{CodeUnitPosition, CodeUnitSink},
};

const HIGH_SURROGATE_PREFIX: u16 = 0xD800;
const LOW_SURROGATE_PREFIX: u16 = 0xDC00;
const SURROGATE_MASK: u16 = 0xFC00;
const SURROGATE_PAYLOAD: u16 = 0x03FF;

/// The UTF-16 encoding form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utf16;

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    unit & SURROGATE_MASK == HIGH_SURROGATE_PREFIX
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    unit & SURROGATE_MASK == LOW_SURROGATE_PREFIX
}

#[inline]
fn combine_surrogates(high: u16, low: u16) -> Codepoint {
    ((Codepoint::from(high & SURROGATE_PAYLOAD) << 10) | Codepoint::from(low & SURROGATE_PAYLOAD))
        + 0x1_0000
}

impl Encoding for Utf16 {
    type Unit = u16;

    const NAME: &'static str = "UTF-16";
    const MAX_UNITS_PER_CODEPOINT: usize = 2;

    #[inline]
    fn is_valid_codepoint(codepoint: Codepoint) -> bool {
        is_scalar_value(codepoint)
    }

    #[expect(clippy::cast_possible_truncation)]
    fn encode<S, P>(codepoint: Codepoint, sink: &mut S, policy: &P) -> Result<(), EncodingError>
    where
        S: CodeUnitSink<u16> + ?Sized,
        P: Policy + ?Sized,
    {
        let codepoint = if Self::is_valid_codepoint(codepoint) {
            codepoint
        } else {
            substitute::<Self, P>(codepoint, policy)?
        };

        if codepoint <= 0xFFFF {
            sink.push_unit(codepoint as u16);
        } else {
            let normalized = codepoint - 0x1_0000;
            sink.push_unit(HIGH_SURROGATE_PREFIX | (normalized >> 10) as u16);
            sink.push_unit(LOW_SURROGATE_PREFIX | (normalized as u16 & SURROGATE_PAYLOAD));
        }
        Ok(())
    }

    fn decode<C, P>(cursor: &mut C, end: &C, policy: &P) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = u16>,
        P: Policy + ?Sized,
    {
        if cursor == end {
            return policy.replace_invalid_codepoint();
        }

        let first = cursor.unit();
        cursor.step_forward();

        if is_high_surrogate(first) {
            if cursor == end {
                return policy.replace_invalid_codepoint();
            }
            let second = cursor.unit();
            if !is_low_surrogate(second) {
                return policy.replace_invalid_codepoint();
            }
            cursor.step_forward();
            check_decoded::<Self, P>(combine_surrogates(first, second), policy)
        } else if is_low_surrogate(first) {
            policy.replace_invalid_codepoint()
        } else {
            Ok(Codepoint::from(first))
        }
    }

    fn decode_previous<C, P>(
        begin: &C,
        cursor: &mut C,
        policy: &P,
    ) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = u16>,
        P: Policy + ?Sized,
    {
        if cursor == begin {
            return policy.replace_invalid_codepoint();
        }

        cursor.step_back();
        let last = cursor.unit();

        if is_low_surrogate(last) && cursor != begin {
            let mut before = cursor.clone();
            before.step_back();
            let high = before.unit();
            if is_high_surrogate(high) {
                *cursor = before;
                return check_decoded::<Self, P>(combine_surrogates(high, last), policy);
            }
        }

        if is_high_surrogate(last) || is_low_surrogate(last) {
            // unpaired
            policy.replace_invalid_codepoint()
        } else {
            Ok(Codepoint::from(last))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use rstest::rstest;

    use super::*;
    use crate::{Replace, Strict, units::CodeUnitRange};

    fn decode_all<P: Policy>(units: &[u16], policy: &P) -> Result<Vec<Codepoint>, EncodingError> {
        let mut pos = units.begin_position();
        let end = units.end_position();
        let mut out = vec![];
        while pos != end {
            out.push(Utf16::decode(&mut pos, &end, policy)?);
        }
        Ok(out)
    }

    fn decode_all_backward<P: Policy>(units: &[u16], policy: &P) -> Vec<Codepoint> {
        let begin = units.begin_position();
        let mut pos = units.end_position();
        let mut out = vec![];
        while pos != begin {
            out.push(Utf16::decode_previous(&begin, &mut pos, policy).unwrap());
        }
        out.reverse();
        out
    }

    #[rstest]
    #[case(0x0001, &[0x0001])]
    #[case(0x07FF, &[0x07FF])]
    #[case(0xD7FF, &[0xD7FF])]
    #[case(0xE000, &[0xE000])]
    #[case(0xFFFF, &[0xFFFF])]
    #[case(0x1_0000, &[0xD800, 0xDC00])]
    #[case(0x2_4680, &[0xD851, 0xDE80])]
    #[case(0x9_9999, &[0xDA26, 0xDD99])]
    #[case(0x10_8088, &[0xDBE0, 0xDC88])]
    #[case(0x10_FFFF, &[0xDBFF, 0xDFFF])]
    fn units_for_codepoint(#[case] codepoint: Codepoint, #[case] units: &[u16]) {
        let mut out = Vec::new();
        Utf16::encode(codepoint, &mut out, &Strict).unwrap();
        assert_eq!(out, units);

        assert_eq!(decode_all(units, &Strict), Ok(vec![codepoint]));
        assert_eq!(decode_all_backward(units, &Strict), vec![codepoint]);
    }

    #[test]
    fn unpaired_surrogates_are_replaced() {
        // lone low, lone high before a BMP unit, lone high at the end
        let units = [0xDC00, 0x0041, 0xD800, 0x0042, 0xD800];
        let expected = vec![0xFFFD, 0x41, 0xFFFD, 0x42, 0xFFFD];
        assert_eq!(decode_all(&units, &Replace::DEFAULT), Ok(expected.clone()));
        assert_eq!(decode_all_backward(&units, &Replace::DEFAULT), expected);
    }

    #[test]
    fn reversed_pair_is_two_errors() {
        let units = [0xDC00, 0xD800];
        assert_eq!(
            decode_all(&units, &Replace::DEFAULT),
            Ok(vec![0xFFFD, 0xFFFD])
        );
        assert_eq!(
            decode_all_backward(&units, &Replace::DEFAULT),
            vec![0xFFFD, 0xFFFD]
        );
        assert_eq!(
            decode_all(&units, &Strict),
            Err(EncodingError::MalformedSequence)
        );
    }

    #[test]
    fn high_surrogate_keeps_following_unit() {
        let units = [0xD800, 0x0041];
        let mut pos = units.begin_position();
        let end = units.end_position();
        assert_eq!(Utf16::decode(&mut pos, &end, &Replace::DEFAULT), Ok(0xFFFD));
        assert_eq!(pos.index(), 1);
    }

    #[test]
    fn surrogate_codepoints_are_unencodable() {
        let mut out = Vec::new();
        assert_eq!(
            Utf16::encode(0xD800, &mut out, &Strict),
            Err(EncodingError::InvalidCodepoint(0xD800))
        );
        Utf16::encode(0xDBFF, &mut out, &Replace::DEFAULT).unwrap();
        assert_eq!(out, [0xFFFD]);
    }
}
