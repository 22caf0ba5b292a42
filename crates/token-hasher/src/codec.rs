//! Validating field encoders.
//!
//! Each encoder takes the dotted path of the field being encoded and uses it
//! verbatim in the error when validation fails. Multi-byte integers are
//! encoded with `to_be_bytes` at the call sites; the V0 mint timestamp is
//! the single little-endian exception and is handled by its hasher.

use crate::errors::ValidationError;

/// Validates that a required buffer is non-empty and returns it unchanged.
pub fn non_empty<'a>(value: &'a [u8], field: &str) -> Result<&'a [u8], ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field: field.to_owned() });
    }
    Ok(value)
}

/// Validates that a fixed-width buffer has exactly `expected` bytes.
pub fn exact_length<'a>(value: &'a [u8], expected: usize, field: &str) -> Result<&'a [u8], ValidationError> {
    if value.len() != expected {
        return Err(ValidationError::LengthMismatch {
            field: field.to_owned(),
            expected,
            actual: value.len(),
        });
    }
    Ok(value)
}

/// Validates that a buffer is non-empty and at most `max` bytes.
pub fn bounded<'a>(value: &'a [u8], max: usize, field: &str) -> Result<&'a [u8], ValidationError> {
    non_empty(value, field)?;
    if value.len() > max {
        return Err(ValidationError::LengthExceeded {
            field: field.to_owned(),
            max,
            actual: value.len(),
        });
    }
    Ok(value)
}

/// Encodes a bounded buffer as a fixed-width field, right-padded with zero
/// bytes to `width`.
pub fn zero_padded(value: &[u8], width: usize, field: &str) -> Result<Vec<u8>, ValidationError> {
    bounded(value, width, field)?;

    let mut padded = vec![0u8; width];
    padded[..value.len()].copy_from_slice(value);
    Ok(padded)
}

/// Encodes a boolean as a single byte, `1` for true and `0` for false.
pub fn bool_byte(value: bool) -> [u8; 1] {
    [u8::from(value)]
}
