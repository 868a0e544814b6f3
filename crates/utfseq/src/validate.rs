//! Well-formedness checks.
//!
//! Validation is a strict forward decode using the same primitive as
//! iteration, so anything that validates iterates without errors.

use crate::{
    encoding::Encoding,
    error::ValidationError,
    policy::Strict,
    units::{CodeUnitPosition, CodeUnitRange},
};

/// Whether `[begin, end]` holds only well-formed sequences in `E`.
pub fn validate<E, C>(begin: &C, end: &C) -> bool
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
{
    let mut cursor = begin.clone();
    while cursor != *end {
        if E::decode(&mut cursor, end, &Strict).is_err() {
            return false;
        }
    }
    true
}

/// Whether `units` is well-formed in `E`.
///
/// ```rust
/// use utfseq::{Utf8, Utf16, validate_units};
///
/// assert!(validate_units::<Utf8>("π".as_bytes()));
/// assert!(!validate_units::<Utf8>(b"\xCF"));
/// assert!(!validate_units::<Utf16>(&[0xDC00]));
/// ```
#[must_use]
pub fn validate_units<E: Encoding>(units: &[E::Unit]) -> bool {
    validate::<E, _>(&units.begin_position(), &units.end_position())
}

/// Checks `units`, reporting where the first malformed sequence starts.
///
/// # Errors
///
/// Returns the offset of the first unit that does not begin a well-formed
/// sequence along with what was wrong with it.
pub fn validate_up_to<E: Encoding>(units: &[E::Unit]) -> Result<(), ValidationError> {
    let end = units.end_position();
    let mut cursor = units.begin_position();
    while cursor != end {
        let valid_up_to = cursor.index();
        if let Err(source) = E::decode(&mut cursor, &end, &Strict) {
            return Err(ValidationError {
                source,
                valid_up_to,
            });
        }
    }
    Ok(())
}
