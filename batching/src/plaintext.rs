use std::fmt;

use math::poly::Poly;

/// An element of Z_t[X]/(X^n+1), stored as n coefficients in [0, t-1].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plaintext(Poly<u64>);

impl Plaintext {
    pub fn new(coeff_count: usize) -> Self {
        Self(Poly::new(coeff_count))
    }

    pub fn from_coeffs(coeffs: &[u64]) -> Self {
        Self(Poly::from_coeffs(coeffs))
    }

    pub fn coeff_count(&self) -> usize {
        self.0.n()
    }

    pub fn coeffs(&self) -> &[u64] {
        self.0.as_slice()
    }

    pub fn is_zero(&self) -> bool {
        self.0.0.iter().all(|c| *c == 0)
    }

    pub fn set_zero(&mut self) {
        self.0.zero()
    }

    pub fn as_poly(&self) -> &Poly<u64> {
        &self.0
    }

    pub(crate) fn as_poly_mut(&mut self) -> &mut Poly<u64> {
        &mut self.0
    }
}

impl From<Poly<u64>> for Plaintext {
    fn from(poly: Poly<u64>) -> Self {
        Self(poly)
    }
}

/// Highest degree first, zero terms skipped: "5x^2 + 3x^1 + 1".
impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first: bool = true;
        for (degree, coeff) in self.coeffs().iter().enumerate().rev() {
            if *coeff == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match degree {
                0 => write!(f, "{}", coeff)?,
                _ => write!(f, "{}x^{}", coeff, degree)?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Plaintext::from_coeffs(&[1, 0, 5, 0]).to_string(), "5x^2 + 1");
        assert_eq!(Plaintext::from_coeffs(&[0, 3, 0, 0]).to_string(), "3x^1");
        assert_eq!(Plaintext::new(4).to_string(), "0");
    }

    #[test]
    fn zero() {
        let mut plaintext: Plaintext = Plaintext::from_coeffs(&[1, 2, 3, 4]);
        assert!(!plaintext.is_zero());
        plaintext.set_zero();
        assert!(plaintext.is_zero());
        assert_eq!(plaintext.coeff_count(), 4);
    }
}
