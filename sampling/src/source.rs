use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;

/// Deterministic ChaCha8 stream, seeded by the caller.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    /// Returns an independent stream seeded from this one.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Returns a uniform value in [0, max) by rejection sampling on next_u64() & mask.
    /// mask must cover max-1.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Returns a uniform value in [min, max].
    pub fn next_i64_in(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "invalid range: min={} > max={}", min, max);
        let span: u64 = max.wrapping_sub(min) as u64;
        if span == u64::MAX {
            return self.next_u64() as i64;
        }
        let bound: u64 = span + 1;
        let mask: u64 = u64::MAX >> bound.leading_zeros().min(63);
        min.wrapping_add(self.next_u64n(bound, mask) as i64)
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a: Source = Source::new([1u8; 32]);
        let mut b: Source = Source::new([1u8; 32]);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn bounded() {
        let mut source: Source = Source::new([2u8; 32]);
        for _ in 0..1000 {
            assert!(source.next_u64n(17, 31) < 17);
            let x: i64 = source.next_i64_in(-8, 8);
            assert!((-8..=8).contains(&x));
        }
    }
}
