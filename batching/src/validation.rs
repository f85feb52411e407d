//! Length, range and well-formedness checks run before any transform work.

use tracing::debug;

use crate::error::{BatchError, Result};
use crate::plaintext::Plaintext;
use crate::slot::SlotValue;

pub fn check_length(len: usize, slots: usize) -> Result<()> {
    if len > slots {
        debug!(len, slots, "input longer than slot count");
        return Err(BatchError::Length { len, slots });
    }
    Ok(())
}

/// Checks every value against the range of T::SIGNEDNESS mod t and
/// returns the canonical residues in [0, t-1].
pub fn residues<T: SlotValue>(values: &[T], slots: usize, plain_modulus: u64) -> Result<Vec<u64>> {
    check_length(values.len(), slots)?;

    let (min, max) = T::SIGNEDNESS.range(plain_modulus);
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let value: i128 = value.as_i128();
            if value < min || value > max {
                debug!(index, value = %value, "slot value out of range");
                return Err(BatchError::Range {
                    index,
                    value,
                    min,
                    max,
                });
            }
            Ok(value.rem_euclid(plain_modulus as i128) as u64)
        })
        .collect()
}

/// Checks that the plaintext holds exactly n coefficients in [0, t-1].
pub fn check_plaintext(plaintext: &Plaintext, poly_modulus_degree: usize, plain_modulus: u64) -> Result<()> {
    if plaintext.coeff_count() != poly_modulus_degree {
        debug!(
            coeff_count = plaintext.coeff_count(),
            poly_modulus_degree, "plaintext has wrong coefficient count"
        );
        return Err(BatchError::MalformedPlaintext(format!(
            "coefficient count {} != poly_modulus_degree {}",
            plaintext.coeff_count(),
            poly_modulus_degree
        )));
    }

    if let Some((index, coeff)) = plaintext
        .coeffs()
        .iter()
        .enumerate()
        .find(|(_, coeff)| **coeff >= plain_modulus)
    {
        debug!(index, coeff, plain_modulus, "plaintext coefficient out of range");
        return Err(BatchError::MalformedPlaintext(format!(
            "coefficient {} at index {} is not below plain_modulus {}",
            coeff, index, plain_modulus
        )));
    }

    Ok(())
}

/// Maps the residue of slot index to T, failing if it does not fit.
pub fn lift<T: SlotValue>(index: usize, residue: u64, plain_modulus: u64) -> Result<T> {
    let value: i128 = T::SIGNEDNESS.lift(residue, plain_modulus);
    T::from_i128(value).ok_or(BatchError::Range {
        index,
        value,
        min: T::MIN,
        max: T::MAX,
    })
}
