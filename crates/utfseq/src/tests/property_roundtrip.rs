use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::{arbitrary::MangledUtf8, quickcheck_tests};
use crate::{
    Codepoint, Encoding, MAX_CODEPOINT, Strict, Utf8, Utf16, Utf32, encoded_len,
    units::CodeUnitRange, validate_units, validate_up_to,
};

fn roundtrip<E: Encoding>(ch: char) -> bool {
    let mut units = Vec::new();
    if E::encode(Codepoint::from(ch), &mut units, &Strict).is_err() {
        return false;
    }
    if encoded_len::<E, _>(Codepoint::from(ch), &Strict) != Ok(units.len()) {
        return false;
    }

    let begin = units.begin_position();
    let end = units.end_position();

    let mut forward = units.begin_position();
    let decoded = E::decode(&mut forward, &end, &Strict);

    let mut backward = units.end_position();
    let decoded_back = E::decode_previous(&begin, &mut backward, &Strict);

    decoded == Ok(Codepoint::from(ch))
        && forward == end
        && decoded_back == Ok(Codepoint::from(ch))
        && backward == begin
}

/// Property: every scalar value survives an encode / decode round trip in
/// both directions, for every encoding.
#[test]
fn roundtrip_quickcheck() {
    fn prop(ch: char) -> bool {
        roundtrip::<Utf8>(ch) && roundtrip::<Utf16>(ch) && roundtrip::<Utf32>(ch)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(char) -> bool);
}

/// Every scalar value encodes exactly like `core` does.
#[test]
#[cfg_attr(miri, ignore)]
fn every_scalar_value_matches_core() {
    let mut utf8 = Vec::with_capacity(4);
    let mut utf16 = Vec::with_capacity(2);
    for ch in (0..=MAX_CODEPOINT).filter_map(char::from_u32) {
        utf8.clear();
        utf16.clear();
        Utf8::encode(Codepoint::from(ch), &mut utf8, &Strict).unwrap();
        Utf16::encode(Codepoint::from(ch), &mut utf16, &Strict).unwrap();
        assert_eq!(utf8, ch.encode_utf8(&mut [0; 4]).as_bytes(), "{ch:?}");
        assert_eq!(utf16, ch.encode_utf16(&mut [0; 2]), "{ch:?}");
        assert!(roundtrip::<Utf8>(ch), "{ch:?}");
        assert!(roundtrip::<Utf16>(ch), "{ch:?}");
    }
}

/// Property: validation accepts exactly what `core::str::from_utf8` accepts
/// and stops at the same offset.
#[test]
fn validation_agrees_with_core_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(input: MangledUtf8) -> bool {
        let bytes = &input.0;
        let ours = validate_up_to::<Utf8>(bytes).map_err(|e| e.valid_up_to());
        let core = core::str::from_utf8(bytes)
            .map(|_| ())
            .map_err(|e| e.valid_up_to());
        ours == core && validate_units::<Utf8>(bytes) == core.is_ok()
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(MangledUtf8) -> bool);
}

/// Property: on well-formed input, each forward and backward step matches
/// `bstr`'s decoder, both in the codepoint and in the number of bytes.
#[test]
fn decoding_agrees_with_bstr_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: alloc::string::String) -> bool {
        let bytes = text.as_bytes();
        let begin = bytes.begin_position();
        let end = bytes.end_position();

        let mut pos = bytes.begin_position();
        while pos != end {
            let start = pos.index();
            let (expected, width) = bstr::decode_utf8(&bytes[start..]);
            let decoded = Utf8::decode(&mut pos, &end, &Strict).ok();
            if decoded != expected.map(Codepoint::from) || pos.index() != start + width {
                return false;
            }
        }

        let mut pos = bytes.end_position();
        while pos != begin {
            let stop = pos.index();
            let (expected, width) = bstr::decode_last_utf8(&bytes[..stop]);
            let decoded = Utf8::decode_previous(&begin, &mut pos, &Strict).ok();
            if decoded != expected.map(Codepoint::from) || pos.index() + width != stop {
                return false;
            }
        }
        true
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(alloc::string::String) -> bool);
}

#[quickcheck_macros::quickcheck]
fn encoded_len_is_within_the_estimate(ch: char) -> bool {
    let cp = Codepoint::from(ch);
    encoded_len::<Utf8, _>(cp, &Strict) == Ok(ch.len_utf8())
        && encoded_len::<Utf16, _>(cp, &Strict) == Ok(ch.len_utf16())
        && encoded_len::<Utf8, _>(cp, &Strict)
            .is_ok_and(|n| n <= Utf8::estimate_codeunit_length(1))
}
