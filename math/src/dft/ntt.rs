use crate::dft::DFT;
use crate::error::MathError;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{NONE, ONCE};
use itertools::izip;

/// Precomputed twiddle factors for the negacyclic NTT of size nth_root/2.
///
/// psi_forward_rev[bitrev(i)] = psi^i and psi_backward_rev[bitrev(i)] = psi^-i,
/// where psi is a primitive nth_root-th root of unity mod q.
/// The forward transform maps coefficients to the evaluations
/// a[j] = f(psi^(2*bitrev(j)+1)).
#[derive(Clone, Debug, PartialEq)]
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Barrett<O>>,
    psi_backward_rev: Vec<Barrett<O>>,
    n_inv: Barrett<O>,
    psi_n_inv: Barrett<O>,
    q: O,
    two_q: O,
    four_q: O,
}

impl Table<u64> {
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Result<Table<u64>, MathError> {
        if nth_root < 4 || nth_root & (nth_root - 1) != 0 {
            return Err(MathError::NotPowerOfTwo { value: nth_root });
        }

        let psi: u64 = prime.primitive_nth_root(nth_root)?;
        let psi_inv: u64 = prime.inv(psi)?;

        let psi_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi);
        let psi_inv_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi_inv);

        let n: usize = (nth_root >> 1) as usize;
        let log_n: u32 = n.log2() as _;

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];

        psi_forward_rev[0] = prime.barrett.one();
        psi_backward_rev[0] = prime.barrett.one();

        let mut powers_forward: u64 = 1u64;
        let mut powers_backward: u64 = 1u64;

        for i in 1..n {
            let i_rev: usize = i.reverse_bits_msb(log_n);

            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_mont, &mut powers_forward);
            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_inv_mont, &mut powers_backward);

            psi_forward_rev[i_rev] = prime.barrett.prepare(powers_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(powers_backward);
        }

        let n_inv: u64 = prime.inv(n as u64)?;
        let psi_n_inv: u64 = prime
            .barrett
            .mul_external::<ONCE>(psi_backward_rev[1], n_inv);

        let q: u64 = prime.q();

        Ok(Self {
            n_inv: prime.barrett.prepare(n_inv),
            psi_n_inv: prime.barrett.prepare(psi_n_inv),
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            q,
            two_q: q << 1,
            four_q: q << 2,
        })
    }

    /// Returns the primitive nth_root-th root of unity psi.
    pub fn psi(&self) -> u64 {
        self.psi
    }

    /// Returns the transform size nth_root/2.
    pub fn n(&self) -> usize {
        self.psi_forward_rev.len()
    }

    pub fn prime(&self) -> &Prime<u64> {
        &self.prime
    }

    pub fn psi_forward_rev(&self) -> &[Barrett<u64>] {
        &self.psi_forward_rev
    }

    pub fn psi_backward_rev(&self) -> &[Barrett<u64>] {
        &self.psi_backward_rev
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward::<false>(a)
    }

    fn forward_inplace_lazy(&self, a: &mut [u64]) {
        self.forward::<true>(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward::<false>(a)
    }

    fn backward_inplace_lazy(&self, a: &mut [u64]) {
        self.backward::<true>(a)
    }
}

impl Table<u64> {
    /// Cooley-Tukey forward transform, natural to bit-reversed order.
    /// Inputs must be in [0, 4q-1]. Outputs are in [0, q-1],
    /// or [0, 2q-1] if LAZY.
    pub fn forward<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len()={} != table size n={}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as _;

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == log_n - 1 {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    self.dit_inplace::<false>(&mut a[0], &mut b[0], *psi);
                    if !LAZY {
                        a[0].reduce_once_assign(self.q);
                        b[0].reduce_once_assign(self.q);
                    }
                });
            } else if size >= 8 {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dit_inplace::<true>(&mut a[0], &mut b[0], *psi);
                        self.dit_inplace::<true>(&mut a[1], &mut b[1], *psi);
                        self.dit_inplace::<true>(&mut a[2], &mut b[2], *psi);
                        self.dit_inplace::<true>(&mut a[3], &mut b[3], *psi);
                        self.dit_inplace::<true>(&mut a[4], &mut b[4], *psi);
                        self.dit_inplace::<true>(&mut a[5], &mut b[5], *psi);
                        self.dit_inplace::<true>(&mut a[6], &mut b[6], *psi);
                        self.dit_inplace::<true>(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dit_inplace::<true>(a, b, *psi));
                });
            }
        }
    }

    /// Harvey butterfly (a, b) <- (a + psi*b, a - psi*b).
    /// Inputs in [0, 4q-1], outputs in [0, 4q-1], or [0, 2q-1] if !LAZY.
    #[inline(always)]
    fn dit_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64, psi: Barrett<u64>) {
        debug_assert!(*a < self.four_q, "a:{} 4q:{}", a, self.four_q);
        debug_assert!(*b < self.four_q, "b:{} 4q:{}", b, self.four_q);
        a.reduce_once_assign(self.two_q);
        let bt: u64 = self.prime.barrett.mul_external::<NONE>(psi, *b);
        *b = *a + self.two_q - bt;
        *a += bt;
        if !LAZY {
            a.reduce_once_assign(self.two_q);
            b.reduce_once_assign(self.two_q);
        }
    }

    /// Gentleman-Sande backward transform, bit-reversed to natural order,
    /// including the scaling by n^-1.
    /// Inputs must be in [0, 2q-1]. Outputs are in [0, q-1],
    /// or [0, 2q-1] if LAZY.
    pub fn backward<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len()={} != table size n={}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as _;

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == 0 {
                let (a, b) = a.split_at_mut(size);
                if size >= 8 {
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dif_last_inplace::<LAZY>(&mut a[0], &mut b[0]);
                        self.dif_last_inplace::<LAZY>(&mut a[1], &mut b[1]);
                        self.dif_last_inplace::<LAZY>(&mut a[2], &mut b[2]);
                        self.dif_last_inplace::<LAZY>(&mut a[3], &mut b[3]);
                        self.dif_last_inplace::<LAZY>(&mut a[4], &mut b[4]);
                        self.dif_last_inplace::<LAZY>(&mut a[5], &mut b[5]);
                        self.dif_last_inplace::<LAZY>(&mut a[6], &mut b[6]);
                        self.dif_last_inplace::<LAZY>(&mut a[7], &mut b[7]);
                    });
                } else {
                    izip!(a, b).for_each(|(a, b)| self.dif_last_inplace::<LAZY>(a, b));
                }
            } else if size >= 8 {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dif_inplace(&mut a[0], &mut b[0], *psi);
                        self.dif_inplace(&mut a[1], &mut b[1], *psi);
                        self.dif_inplace(&mut a[2], &mut b[2], *psi);
                        self.dif_inplace(&mut a[3], &mut b[3], *psi);
                        self.dif_inplace(&mut a[4], &mut b[4], *psi);
                        self.dif_inplace(&mut a[5], &mut b[5], *psi);
                        self.dif_inplace(&mut a[6], &mut b[6], *psi);
                        self.dif_inplace(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
                });
            }
        }
    }

    /// (a, b) <- (a + b, psi*(a - b)), inputs and outputs in [0, 2q-1].
    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, psi: Barrett<u64>) {
        debug_assert!(*a < self.two_q, "a:{} 2q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} 2q:{}", b, self.two_q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<NONE>(psi, *a + self.two_q - *b);
        *a += *b;
        a.reduce_once_assign(self.two_q);
        *b = d;
    }

    /// Last layer with n^-1 folded into the twiddles.
    #[inline(always)]
    fn dif_last_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64) {
        debug_assert!(*a < self.two_q, "a:{} 2q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} 2q:{}", b, self.two_q);
        let d: u64 = *a + self.two_q - *b;
        *a = self.prime.barrett.mul_external::<NONE>(self.n_inv, *a + *b);
        *b = self.prime.barrett.mul_external::<NONE>(self.psi_n_inv, d);
        if !LAZY {
            a.reduce_once_assign(self.q);
            b.reduce_once_assign(self.q);
        }
    }
}
