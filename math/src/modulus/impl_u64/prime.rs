use crate::error::MathError;
use crate::modulus::ONCE;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::prime::Prime;
use primality_test::is_prime;
use prime_factorization::Factorization;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Fails if q is not an odd prime or if q >= 2^61.
    pub fn new(q: u64) -> Result<Self, MathError> {
        if q <= 2 || !is_prime(q) {
            return Err(MathError::NotPrime { q });
        }
        Self::new_unchecked(q)
    }

    /// Returns a new instance of Prime<u64>.
    /// Does not check if q is a prime > 2.
    pub fn new_unchecked(q: u64) -> Result<Self, MathError> {
        if q >= 1 << 61 {
            return Err(MathError::ModulusTooLarge { q });
        }

        let mut prime: Prime<u64> = Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            factors: Vec::new(),
            montgomery: MontgomeryPrecomp::new(q),
            barrett: BarrettPrecomp::new(q),
            phi: q - 1,
        };

        prime.populate_factors();

        Ok(prime)
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let x_mont: Montgomery<u64> = self.montgomery.prepare::<ONCE>(x);
        self.montgomery
            .unprepare::<ONCE>(self.montgomery.pow(x_mont, exponent))
    }

    /// Returns x^-1 mod q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> Result<u64, MathError> {
        if x % self.q == 0 {
            return Err(MathError::ZeroInverse);
        }
        Ok(self.pow(x, self.phi - 1))
    }

    /// Returns the smallest generator of (Z/qZ)^*.
    pub fn primitive_root(&self) -> Result<u64, MathError> {
        (2..self.q)
            .find(|&candidate| {
                self.factors
                    .iter()
                    .all(|&factor| self.pow(candidate, self.phi / factor) != 1)
            })
            .ok_or(MathError::NoPrimitiveRoot { q: self.q })
    }

    /// Returns g^((q-1)/nth_root) mod q where g is [Prime::primitive_root].
    /// nth_root must be a power of two dividing q-1.
    pub fn primitive_nth_root(&self, nth_root: u64) -> Result<u64, MathError> {
        if nth_root < 2 || nth_root & (nth_root - 1) != 0 {
            return Err(MathError::NotPowerOfTwo { value: nth_root });
        }

        if self.q & (nth_root - 1) != 1 {
            return Err(MathError::NotNttFriendly {
                q: self.q,
                nth_root,
            });
        }

        let psi: u64 = self.pow(self.primitive_root()?, self.phi / nth_root);

        debug_assert!(
            self.pow(psi, nth_root) == 1,
            "invalid nth primitive root: psi^nth_root != 1 mod q"
        );

        if self.pow(psi, nth_root >> 1) != self.q - 1 {
            return Err(MathError::NoPrimitiveRoot { q: self.q });
        }

        Ok(psi)
    }

    /// Factorizes q-1 and populates self.factors with its distinct prime factors.
    fn populate_factors(&mut self) {
        let factors: Vec<(u64, u32)> = Factorization::run(self.phi).prime_factor_repr();
        self.factors = factors.iter().map(|factor| factor.0).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_composites() {
        assert_eq!(Prime::<u64>::new(15), Err(MathError::NotPrime { q: 15 }));
        assert_eq!(Prime::<u64>::new(2), Err(MathError::NotPrime { q: 2 }));
        assert_eq!(Prime::<u64>::new(1), Err(MathError::NotPrime { q: 1 }));
    }

    #[test]
    fn rejects_large_moduli() {
        let q: u64 = 18446744073709551557; // 2^64 - 59
        assert_eq!(Prime::<u64>::new(q), Err(MathError::ModulusTooLarge { q }));
        assert_eq!(
            Prime::<u64>::new_unchecked(1 << 61),
            Err(MathError::ModulusTooLarge { q: 1 << 61 })
        );
        assert_eq!(Prime::<u64>::new((1 << 61) - 1).map(|p| p.q()), Ok((1 << 61) - 1));
    }

    #[test]
    fn inv() {
        let prime: Prime<u64> = Prime::<u64>::new(97).unwrap();
        for x in 1..97u64 {
            assert_eq!(x * prime.inv(x).unwrap() % 97, 1, "x={}", x);
        }
        assert_eq!(prime.inv(0), Err(MathError::ZeroInverse));
        assert_eq!(prime.inv(194), Err(MathError::ZeroInverse));
    }

    #[test]
    fn primitive_root() {
        assert_eq!(Prime::<u64>::new(17).unwrap().primitive_root(), Ok(3));
        assert_eq!(Prime::<u64>::new(97).unwrap().primitive_root(), Ok(5));
        assert_eq!(Prime::<u64>::new(12289).unwrap().primitive_root(), Ok(11));
    }

    #[test]
    fn primitive_nth_root() {
        let prime: Prime<u64> = Prime::<u64>::new(97).unwrap();
        assert_eq!(prime.primitive_nth_root(16), Ok(8));
        assert_eq!(
            prime.primitive_nth_root(64),
            Err(MathError::NotNttFriendly { q: 97, nth_root: 64 })
        );
        assert_eq!(
            prime.primitive_nth_root(12),
            Err(MathError::NotPowerOfTwo { value: 12 })
        );
    }
}
