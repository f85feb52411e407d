use crate::error::Result;
use math::modulus::prime_generator::NTTFriendlyPrimesGenerator;

/// Plaintext modulus t and polynomial modulus degree n.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Parameters {
    pub plain_modulus: u64,
    pub poly_modulus_degree: usize,
}

impl Parameters {
    pub fn new(plain_modulus: u64, poly_modulus_degree: usize) -> Self {
        Self {
            plain_modulus,
            poly_modulus_degree,
        }
    }

    /// Returns parameters with the largest bit_size-bit prime t = 1 mod 2n.
    pub fn batching(poly_modulus_degree: usize, bit_size: u64) -> Result<Self> {
        let nth_root: u64 = (poly_modulus_degree as u64) << 1;
        let prime = NTTFriendlyPrimesGenerator::new(bit_size, nth_root)
            .and_then(|mut generator| generator.next_downstream_prime())?;
        Ok(Self::new(prime.q(), poly_modulus_degree))
    }

    pub fn slot_count(&self) -> usize {
        self.poly_modulus_degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BatchError;

    #[test]
    fn batching_prime() {
        let parameters: Parameters = Parameters::batching(8192, 20).unwrap();
        assert_eq!(parameters, Parameters::new(1032193, 8192));

        // 257 - 32 = 225 is composite.
        let parameters: Parameters = Parameters::batching(16, 8).unwrap();
        assert_eq!(parameters.plain_modulus, 193);
    }

    #[test]
    fn batching_rejects_small_bit_size() {
        assert!(matches!(
            Parameters::batching(1 << 12, 8),
            Err(BatchError::Construction(_))
        ));
        assert!(matches!(
            Parameters::batching(12, 20),
            Err(BatchError::Construction(_))
        ));
    }
}
