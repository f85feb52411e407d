use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{REDUCEMOD, ScalarOperations, VectorOperations};
use crate::{apply_v, apply_vv, apply_vvv};

impl ScalarOperations<u64> for Prime<u64> {
    /// Applies a modular reduction on a based on REDUCE:
    /// - NONE: no modular reduction.
    /// - ONCE: subtracts q if a >= q.
    /// - TWICE: subtracts 2q if a >= 2q.
    /// - FOURTIMES: subtracts 4q if a >= 4q.
    /// - BARRETT: maps a to a mod q using Barrett reduction.
    /// - BARRETTLAZY: maps a to a mod q using Barrett reduction with values in [0, 2q-1].
    #[inline(always)]
    fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(a);
    }

    #[inline(always)]
    fn sa_add_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(c);
    }

    #[inline(always)]
    fn sa_sub_sb_into_sc<const SBRANGE: u8, const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(SBRANGE as u64 * self.q).wrapping_sub(*b);
        self.sa_reduce_into_sa::<REDUCE>(c);
    }

    #[inline(always)]
    fn sa_neg_into_sa<const SARANGE: u8, const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        *a = (SARANGE as u64 * self.q).wrapping_sub(*a);
        self.sa_reduce_into_sa::<REDUCE>(a)
    }

    #[inline(always)]
    fn sa_prepare_montgomery_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut Montgomery<u64>) {
        self.montgomery.prepare_assign::<REDUCE>(*a, b);
    }

    #[inline(always)]
    fn sa_mul_sb_montgomery_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &Montgomery<u64>, c: &mut u64) {
        *c = self.montgomery.mul_external::<REDUCE>(*b, *a);
    }

    #[inline(always)]
    fn sa_mul_sb_barrett_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &Barrett<u64>, c: &mut u64) {
        *c = self.barrett.mul_external::<REDUCE>(*b, *a);
    }
}

impl VectorOperations<u64> for Prime<u64> {
    #[inline(always)]
    fn va_add_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        apply_vvv!(self, Self::sa_add_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_sub_vb_into_vc<const CHUNK: usize, const VBRANGE: u8, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_sub_sb_into_sc::<VBRANGE, REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_neg_into_va<const CHUNK: usize, const VARANGE: u8, const REDUCE: REDUCEMOD>(&self, a: &mut [u64]) {
        apply_v!(self, Self::sa_neg_into_sa::<VARANGE, REDUCE>, a, CHUNK);
    }

    #[inline(always)]
    fn va_prepare_montgomery_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &mut [Montgomery<u64>],
    ) {
        apply_vv!(self, Self::sa_prepare_montgomery_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_mul_vb_montgomery_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &[Montgomery<u64>],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_mul_sb_montgomery_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_mul_sb_barrett_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &Barrett<u64>,
        c: &mut [u64],
    ) {
        apply_vv!(
            self,
            |prime: &Self, a: &u64, c: &mut u64| prime.sa_mul_sb_barrett_into_sc::<REDUCE>(a, b, c),
            a,
            c,
            CHUNK
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::{BARRETT, ONCE};

    #[test]
    fn vector_add_sub_neg() {
        let prime: Prime<u64> = Prime::<u64>::new(17).unwrap();
        let a: Vec<u64> = (0..19u64).map(|i| i % 17).collect();
        let b: Vec<u64> = (0..19u64).map(|i| (3 * i + 5) % 17).collect();
        let mut c: Vec<u64> = vec![0; a.len()];

        prime.va_add_vb_into_vc::<8, ONCE>(&a, &b, &mut c);
        for i in 0..a.len() {
            assert_eq!(c[i], (a[i] + b[i]) % 17, "i={}", i);
        }

        prime.va_sub_vb_into_vc::<8, 1, ONCE>(&a, &b, &mut c);
        for i in 0..a.len() {
            assert_eq!(c[i], (a[i] + 17 - b[i]) % 17, "i={}", i);
        }

        prime.va_neg_into_va::<8, 1, ONCE>(&mut c);
        for i in 0..a.len() {
            assert_eq!(c[i], (b[i] + 17 - a[i]) % 17, "i={}", i);
        }
    }

    #[test]
    fn vector_mul() {
        let prime: Prime<u64> = Prime::<u64>::new(1032193).unwrap();
        let a: Vec<u64> = (0..21u64).map(|i| (i * 48271 + 11) % 1032193).collect();
        let b: Vec<u64> = (0..21u64).map(|i| (i * 16807 + 3) % 1032193).collect();
        let want: Vec<u64> = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| ((*x as u128 * *y as u128) % 1032193) as u64)
            .collect();

        let mut b_mont: Vec<u64> = vec![0; b.len()];
        prime.va_prepare_montgomery_into_vb::<8, ONCE>(&b, &mut b_mont);
        let mut c: Vec<u64> = vec![0; a.len()];
        prime.va_mul_vb_montgomery_into_vc::<8, ONCE>(&a, &b_mont, &mut c);
        assert_eq!(c, want);

        let scalar: Barrett<u64> = prime.barrett.prepare(7);
        prime.va_mul_sb_barrett_into_vc::<8, BARRETT>(&a, &scalar, &mut c);
        for i in 0..a.len() {
            assert_eq!(c[i], a[i] * 7 % 1032193, "i={}", i);
        }
    }
}
