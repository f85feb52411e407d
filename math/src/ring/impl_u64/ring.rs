use crate::CHUNK;
use crate::dft::DFT;
use crate::dft::ntt::Table;
use crate::error::MathError;
use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{BARRETT, ONCE, REDUCEMOD, VectorOperations};
use crate::poly::Poly;
use crate::ring::Ring;

impl Ring<u64> {
    /// Returns the ring Z_q[X]/(X^n+1).
    /// Fails if n is not a power of two >= 2, if q is not prime
    /// or if q != 1 mod 2n.
    pub fn new(n: usize, q: u64) -> Result<Self, MathError> {
        if n < 2 || n & (n - 1) != 0 {
            return Err(MathError::NotPowerOfTwo { value: n as u64 });
        }
        let prime: Prime<u64> = Prime::<u64>::new(q)?;
        let dft: Table<u64> = Table::<u64>::new(prime.clone(), (n << 1) as u64)?;
        Ok(Self {
            n,
            modulus: prime,
            dft,
        })
    }

    pub fn q(&self) -> u64 {
        self.modulus.q()
    }
}

impl Ring<u64> {
    pub fn ntt_inplace<const LAZY: bool>(&self, poly: &mut Poly<u64>) {
        match LAZY {
            true => self.dft.forward_inplace_lazy(&mut poly.0),
            false => self.dft.forward_inplace(&mut poly.0),
        }
    }

    pub fn intt_inplace<const LAZY: bool>(&self, poly: &mut Poly<u64>) {
        match LAZY {
            true => self.dft.backward_inplace_lazy(&mut poly.0),
            false => self.dft.backward_inplace(&mut poly.0),
        }
    }

    pub fn ntt<const LAZY: bool>(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.copy_from(poly_in);
        self.ntt_inplace::<LAZY>(poly_out);
    }

    pub fn intt<const LAZY: bool>(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.copy_from(poly_in);
        self.intt_inplace::<LAZY>(poly_out);
    }
}

impl Ring<u64> {

    #[inline(always)]
    pub fn add<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_add_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn sub<const BRANGE: u8, const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_sub_vb_into_vc::<CHUNK, BRANGE, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn neg_inplace<const ARANGE: u8, const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus
            .va_neg_into_va::<CHUNK, ARANGE, REDUCE>(&mut a.0);
    }

    /// Assigns a * b to c, where b is any u64 scalar.
    #[inline(always)]
    pub fn mul_scalar<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &u64, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let b_barrett: Barrett<u64> = self
            .modulus
            .barrett
            .prepare(self.modulus.barrett.reduce::<BARRETT>(b));
        self.modulus
            .va_mul_sb_barrett_into_vc::<CHUNK, REDUCE>(&a.0, &b_barrett, &mut c.0);
    }

    /// Assigns a * b to c coefficient-wise. Inputs are expected in the NTT domain.
    pub fn mul_ntt<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let mut b_mont: Poly<Montgomery<u64>> = Poly::new(self.n());
        self.modulus
            .va_prepare_montgomery_into_vb::<CHUNK, ONCE>(&b.0, &mut b_mont.0);
        self.modulus
            .va_mul_vb_montgomery_into_vc::<CHUNK, REDUCE>(&a.0, &b_mont.0, &mut c.0);
    }

    /// Assigns the negacyclic product a * b mod X^n+1 to c.
    /// Inputs and output are in the coefficient domain.
    pub fn mul_negacyclic(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        let mut a_ntt: Poly<u64> = self.new_poly();
        let mut b_ntt: Poly<u64> = self.new_poly();
        self.ntt::<false>(a, &mut a_ntt);
        self.ntt::<false>(b, &mut b_ntt);
        c.resize(self.n());
        self.mul_ntt::<ONCE>(&a_ntt, &b_ntt, c);
        self.intt_inplace::<false>(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schoolbook(a: &[u64], b: &[u64], q: u64) -> Vec<u64> {
        let n: usize = a.len();
        let mut c: Vec<u128> = vec![0; n];
        for i in 0..n {
            for j in 0..n {
                let p: u128 = a[i] as u128 * b[j] as u128 % q as u128;
                if i + j < n {
                    c[i + j] = (c[i + j] + p) % q as u128;
                } else {
                    c[i + j - n] = (c[i + j - n] + q as u128 - p) % q as u128;
                }
            }
        }
        c.into_iter().map(|x| x as u64).collect()
    }

    #[test]
    fn negacyclic_product() {
        let q: u64 = 12289;
        let ring: Ring<u64> = Ring::new(32, q).unwrap();
        let a: Poly<u64> = Poly((0..32u64).map(|i| (i * i + 1) % q).collect());
        let b: Poly<u64> = Poly((0..32u64).map(|i| (5 * i + 7) % q).collect());
        let mut c: Poly<u64> = ring.new_poly();
        ring.mul_negacyclic(&a, &b, &mut c);
        assert_eq!(c.0, schoolbook(&a.0, &b.0, q));
    }

    #[test]
    fn new_rejects_invalid_parameters() {
        assert_eq!(Ring::new(12, 97), Err(MathError::NotPowerOfTwo { value: 12 }));
        assert_eq!(Ring::new(8, 91), Err(MathError::NotPrime { q: 91 }));
        assert_eq!(
            Ring::new(32, 97),
            Err(MathError::NotNttFriendly { q: 97, nth_root: 64 })
        );
    }

    #[test]
    fn add_sub_neg_scalar() {
        let q: u64 = 97;
        let ring: Ring<u64> = Ring::new(8, q).unwrap();
        let a: Poly<u64> = Poly(vec![1, 2, 3, 4, 96, 95, 0, 50]);
        let b: Poly<u64> = Poly(vec![96, 96, 0, 1, 1, 2, 0, 60]);
        let mut c: Poly<u64> = ring.new_poly();

        ring.add::<ONCE>(&a, &b, &mut c);
        assert_eq!(c.0, vec![0, 1, 3, 5, 0, 0, 0, 13]);

        ring.sub::<1, ONCE>(&a, &b, &mut c);
        assert_eq!(c.0, vec![2, 3, 3, 3, 95, 93, 0, 87]);

        ring.neg_inplace::<1, ONCE>(&mut c);
        assert_eq!(c.0, vec![95, 94, 94, 94, 2, 4, 0, 10]);

        ring.mul_scalar::<ONCE>(&a, &(97 + 3), &mut c);
        assert_eq!(c.0, vec![3, 6, 9, 12, 94, 91, 0, 53]);
    }
}
