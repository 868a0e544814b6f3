#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utfseq::{
    Codepoint, Replace, Utf8, Utf8String, Utf16, Utf16String, Utf32, codepoints, validate_units,
    validate_up_to,
};

#[derive(Debug, Arbitrary)]
enum Input {
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
    Utf32(Vec<u32>),
}

fn check_utf8(bytes: &[u8]) {
    let forward: Vec<Codepoint> = codepoints::<Utf8, _, _>(bytes, Replace::DEFAULT)
        .map(Result::unwrap)
        .collect();
    let mut backward: Vec<Codepoint> = codepoints::<Utf8, _, _>(bytes, Replace::DEFAULT)
        .rev()
        .map(Result::unwrap)
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);

    let ours = validate_up_to::<Utf8>(bytes).map_err(|e| e.valid_up_to());
    let core = std::str::from_utf8(bytes)
        .map(|_| ())
        .map_err(|e| e.valid_up_to());
    assert_eq!(ours, core);

    let sanitized = Utf8String::from_units(bytes.to_vec());
    assert!(validate_units::<Utf8>(sanitized.as_units()));
    assert_eq!(sanitized.codepoint_length(), forward.len());

    let transcoded: Utf16String = sanitized.transcode();
    assert_eq!(transcoded, sanitized);
}

fn check_symmetry<E: utfseq::Encoding>(units: &[E::Unit]) {
    let forward: Vec<Codepoint> = codepoints::<E, _, _>(units, Replace::DEFAULT)
        .map(Result::unwrap)
        .collect();
    let mut backward: Vec<Codepoint> = codepoints::<E, _, _>(units, Replace::DEFAULT)
        .rev()
        .map(Result::unwrap)
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(validate_units::<E>(units), validate_up_to::<E>(units).is_ok());
}

fuzz_target!(|input: Input| match input {
    Input::Utf8(bytes) => check_utf8(&bytes),
    Input::Utf16(units) => check_symmetry::<Utf16>(&units),
    Input::Utf32(units) => check_symmetry::<Utf32>(&units),
});
