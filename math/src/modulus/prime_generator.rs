use crate::error::MathError;
use crate::modulus::prime::Prime;
use primality_test::is_prime;

/// Enumerates primes q = 1 mod nth_root close to 2^bit_size, either
/// upstream (q > 2^bit_size), downstream (q < 2^bit_size) or alternating.
/// Candidates are kept within half a bit of 2^bit_size.
pub struct NTTFriendlyPrimesGenerator {
    bit_size: u64,
    upper_bound: u64,
    lower_bound: u64,
    next_prime: u64,
    prev_prime: u64,
    nth_root: u64,
    check_next_prime: bool,
    check_prev_prime: bool,
}

impl NTTFriendlyPrimesGenerator {
    pub fn new(bit_size: u64, nth_root: u64) -> Result<Self, MathError> {
        if nth_root < 2 || nth_root & (nth_root - 1) != 0 {
            return Err(MathError::NotPowerOfTwo { value: nth_root });
        }

        if bit_size < 2 || bit_size > 61 || nth_root > 1 << bit_size {
            return Err(MathError::PrimesExhausted { bit_size, nth_root });
        }

        let center: u64 = 1 << bit_size;
        let upper_bound: u64 = (bit_size as f64 + 0.5).exp2() as u64;
        let lower_bound: u64 = (bit_size as f64 - 0.5).exp2() as u64;

        let next_prime: u64 = center + 1;
        let check_prev_prime: bool = center >= nth_root;
        let prev_prime: u64 = (center + 1).saturating_sub(nth_root);

        Ok(Self {
            bit_size,
            upper_bound,
            lower_bound,
            next_prime,
            prev_prime,
            nth_root,
            check_next_prime: true,
            check_prev_prime,
        })
    }

    fn exhausted(&self) -> MathError {
        MathError::PrimesExhausted {
            bit_size: self.bit_size,
            nth_root: self.nth_root,
        }
    }

    pub fn next_alternating_primes(&mut self, k: usize) -> Result<Vec<Prime<u64>>, MathError> {
        (0..k).map(|_| self.next_alternating_prime()).collect()
    }

    /// Returns the smallest not yet returned prime above 2^bit_size.
    pub fn next_upstream_prime(&mut self) -> Result<Prime<u64>, MathError> {
        loop {
            match self.step_upstream() {
                Some(Ok(prime)) => return Ok(prime),
                Some(Err(err)) => return Err(err),
                None if !self.check_next_prime => return Err(self.exhausted()),
                None => {}
            }
        }
    }

    /// Returns the largest not yet returned prime below 2^bit_size.
    pub fn next_downstream_prime(&mut self) -> Result<Prime<u64>, MathError> {
        loop {
            match self.step_downstream() {
                Some(Ok(prime)) => return Ok(prime),
                Some(Err(err)) => return Err(err),
                None if !self.check_prev_prime => return Err(self.exhausted()),
                None => {}
            }
        }
    }

    /// Alternates between the upstream and the downstream sequences.
    pub fn next_alternating_prime(&mut self) -> Result<Prime<u64>, MathError> {
        loop {
            if !(self.check_next_prime || self.check_prev_prime) {
                return Err(self.exhausted());
            }

            if let Some(prime) = self.step_upstream() {
                return prime;
            }

            if let Some(prime) = self.step_downstream() {
                return prime;
            }
        }
    }

    /// Tests one upstream candidate.
    fn step_upstream(&mut self) -> Option<Result<Prime<u64>, MathError>> {
        if !self.check_next_prime {
            return None;
        }

        if self.next_prime > self.upper_bound || self.next_prime > u64::MAX - self.nth_root {
            self.check_next_prime = false;
            return None;
        }

        let candidate: u64 = self.next_prime;
        self.next_prime += self.nth_root;

        if is_prime(candidate) {
            return Some(Prime::new_unchecked(candidate));
        }

        None
    }

    /// Tests one downstream candidate.
    fn step_downstream(&mut self) -> Option<Result<Prime<u64>, MathError>> {
        if !self.check_prev_prime {
            return None;
        }

        if self.prev_prime < self.lower_bound || self.prev_prime < self.nth_root {
            self.check_prev_prime = false;
            return None;
        }

        let candidate: u64 = self.prev_prime;
        self.prev_prime -= self.nth_root;

        if is_prime(candidate) {
            return Some(Prime::new_unchecked(candidate));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_primes() {
        let nth_root: u64 = 1 << 16;
        let mut generator: NTTFriendlyPrimesGenerator =
            NTTFriendlyPrimesGenerator::new(30, nth_root).unwrap();

        let primes: Vec<Prime<u64>> = generator.next_alternating_primes(10).unwrap();
        assert_eq!(primes.len(), 10);
        for prime in primes.iter() {
            assert_eq!(prime.q() % nth_root, 1);
        }
    }

    #[test]
    fn downstream_batching_prime() {
        let mut generator: NTTFriendlyPrimesGenerator =
            NTTFriendlyPrimesGenerator::new(20, 1 << 14).unwrap();
        assert_eq!(generator.next_downstream_prime().unwrap().q(), 1032193);
    }

    #[test]
    fn exhausted() {
        // 2^4 + 1 = 17 is the only candidate within half a bit of 2^4.
        let mut generator: NTTFriendlyPrimesGenerator = NTTFriendlyPrimesGenerator::new(4, 16).unwrap();
        assert_eq!(generator.next_upstream_prime().unwrap().q(), 17);
        assert_eq!(
            generator.next_upstream_prime(),
            Err(MathError::PrimesExhausted {
                bit_size: 4,
                nth_root: 16
            })
        );
    }
}
