//! UTF-32: every unit is the codepoint itself.
//!
//! Surrogate values are rejected here exactly as in UTF-8 and UTF-16, so a
//! buffer that validates in one encoding transcodes losslessly to the others.

use super::{Encoding, check_decoded, substitute};
use crate::{
    codepoint::{Codepoint, is_scalar_value},
    error::EncodingError,
    policy::Policy,
    units::{CodeUnitPosition, CodeUnitSink},
};

/// The UTF-32 encoding form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utf32;

impl Encoding for Utf32 {
    type Unit = u32;

    const NAME: &'static str = "UTF-32";
    const MAX_UNITS_PER_CODEPOINT: usize = 1;

    #[inline]
    fn is_valid_codepoint(codepoint: Codepoint) -> bool {
        is_scalar_value(codepoint)
    }

    fn encode<S, P>(codepoint: Codepoint, sink: &mut S, policy: &P) -> Result<(), EncodingError>
    where
        S: CodeUnitSink<u32> + ?Sized,
        P: Policy + ?Sized,
    {
        let codepoint = if Self::is_valid_codepoint(codepoint) {
            codepoint
        } else {
            substitute::<Self, P>(codepoint, policy)?
        };
        sink.push_unit(codepoint);
        Ok(())
    }

    fn decode<C, P>(cursor: &mut C, end: &C, policy: &P) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = u32>,
        P: Policy + ?Sized,
    {
        if cursor == end {
            return policy.replace_invalid_codepoint();
        }
        let unit = cursor.unit();
        cursor.step_forward();
        check_decoded::<Self, P>(unit, policy)
    }

    fn decode_previous<C, P>(
        begin: &C,
        cursor: &mut C,
        policy: &P,
    ) -> Result<Codepoint, EncodingError>
    where
        C: CodeUnitPosition<Unit = u32>,
        P: Policy + ?Sized,
    {
        if cursor == begin {
            return policy.replace_invalid_codepoint();
        }
        cursor.step_back();
        check_decoded::<Self, P>(cursor.unit(), policy)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::{Replace, Strict, units::CodeUnitRange};

    #[test]
    fn units_are_codepoints() {
        let mut out = Vec::new();
        for cp in [0, 0x41, 0xFFFF, 0x1_0000, 0x10_FFFF] {
            Utf32::encode(cp, &mut out, &Strict).unwrap();
        }
        assert_eq!(out, [0, 0x41, 0xFFFF, 0x1_0000, 0x10_FFFF]);

        let mut pos = out.begin_position();
        let end = out.end_position();
        let mut decoded = Vec::new();
        while pos != end {
            decoded.push(Utf32::decode(&mut pos, &end, &Strict).unwrap());
        }
        assert_eq!(decoded, out);
    }

    #[test]
    fn surrogates_and_large_values_are_invalid() {
        let units = [0xD800, 0x11_0000, 0x41];
        let begin = units.begin_position();
        let mut pos = units.begin_position();
        let end = units.end_position();
        assert_eq!(
            Utf32::decode(&mut pos, &end, &Strict),
            Err(EncodingError::InvalidCodepoint(0xD800))
        );
        assert_eq!(Utf32::decode(&mut pos, &end, &Replace::DEFAULT), Ok(0xFFFD));
        assert_eq!(Utf32::decode(&mut pos, &end, &Strict), Ok(0x41));

        assert_eq!(Utf32::decode_previous(&begin, &mut pos, &Strict), Ok(0x41));
        assert_eq!(
            Utf32::decode_previous(&begin, &mut pos, &Strict),
            Err(EncodingError::InvalidCodepoint(0x11_0000))
        );

        let mut out = Vec::new();
        Utf32::encode(0x11_0000, &mut out, &Replace::DEFAULT).unwrap();
        assert_eq!(out, [0xFFFD]);
    }
}
