use crate::modulus::WordOps;

/// Generator of the cyclic subgroup of (Z/2nZ)^* whose orbits are the rows.
pub const GALOISGENERATOR: u64 = 3;

/// Returns GALOISGENERATOR^steps mod 2n.
/// Negative steps are taken modulo the order n/2 of the generator.
pub fn galois_element(steps: i64, n: usize) -> usize {
    let cyclotomic_order: u64 = (n as u64) << 1;
    let mask: u64 = cyclotomic_order - 1;
    let exponent: u64 = steps.rem_euclid((n >> 1).max(1) as i64) as u64;
    let mut gal_el: u64 = 1;
    let mut base: u64 = GALOISGENERATOR;
    let mut e: u64 = exponent;
    while e > 0 {
        if e & 1 == 1 {
            gal_el = gal_el.wrapping_mul(base) & mask;
        }
        base = base.wrapping_mul(base) & mask;
        e >>= 1;
    }
    gal_el as usize
}

/// Lookup table for the automorphism X -> X^gal_el of Z_q[X]/(X^n+1).
///
/// In the NTT domain b[i] = a[permutation[i]]. In the coefficient domain
/// b[permutation[i] & (n-1)] = ±a[i], with the sign carried by the MSB.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutomorphismPermutation {
    pub gal_el: usize,
    pub permutation: Vec<usize>,
}

impl AutomorphismPermutation {
    /// Method will panic if n is not a power of two or if gal_el is even.
    pub fn new<const NTT: bool>(n: usize, gal_el: usize) -> Self {
        assert!(
            n >= 2 && n & (n - 1) == 0,
            "invalid n={}: not a power-of-two",
            n
        );
        assert!(
            gal_el & 1 == 1,
            "invalid gal_el={}: not coprime with 2n={}",
            gal_el,
            2 * n
        );

        let mask: usize = (n << 1) - 1;
        let log_n: usize = n.log2();
        let mut permutation: Vec<usize> = Vec::with_capacity(n);

        if NTT {
            for i in 0..n {
                let exponent: usize = 2 * i.reverse_bits_msb(log_n as u32) + 1;
                let gal_el_i: usize = (gal_el.wrapping_mul(exponent) & mask) >> 1;
                permutation.push(gal_el_i.reverse_bits_msb(log_n as u32));
            }
        } else {
            for i in 0..n {
                let gal_el_i: usize = i.wrapping_mul(gal_el) & mask;
                let sign: usize = (gal_el_i >> log_n) & 1;
                permutation.push((gal_el_i & (n - 1)) | (sign << (usize::BITS - 1)));
            }
        }

        Self {
            gal_el: gal_el & mask,
            permutation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn galois_elements() {
        assert_eq!(galois_element(0, 8), 1);
        assert_eq!(galois_element(1, 8), 3);
        assert_eq!(galois_element(2, 8), 9);
        assert_eq!(galois_element(-1, 8), 11);
        assert_eq!(galois_element(4, 8), 1);
        assert_eq!(galois_element(1, 1 << 13), 3);
    }

    #[test]
    fn ntt_permutation_is_bijective() {
        for gal_el in [3, 9, 15, 31] {
            let perm: AutomorphismPermutation = AutomorphismPermutation::new::<true>(16, gal_el);
            let mut seen: Vec<bool> = vec![false; 16];
            perm.permutation.iter().for_each(|&j| seen[j] = true);
            assert!(seen.iter().all(|&s| s), "gal_el={}", gal_el);
        }
    }

    #[test]
    fn coefficient_permutation_signs() {
        // X^3 under X -> X^3 in Z[X]/(X^4+1): X^(3*3) = X^9 = X^1.
        let perm: AutomorphismPermutation = AutomorphismPermutation::new::<false>(4, 3);
        let msb: usize = 1 << (usize::BITS - 1);
        assert_eq!(perm.permutation, vec![0, 3, 2 | msb, 1]);
    }
}
