use crate::modulus::WordOps;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Poly<O>(pub Vec<O>);

impl<O> Poly<O>
where
    O: Default + Clone + Copy,
{
    pub fn new(n: usize) -> Self {
        Self(vec![O::default(); n])
    }

    pub fn from_coeffs(coeffs: &[O]) -> Self {
        Self(coeffs.to_vec())
    }

    pub fn n(&self) -> usize {
        self.0.len()
    }

    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn resize(&mut self, n: usize) {
        self.0.resize(n, O::default());
    }

    pub fn set_all(&mut self, v: &O) {
        self.0.fill(*v)
    }

    pub fn zero(&mut self) {
        self.set_all(&O::default())
    }

    pub fn copy_from(&mut self, other: &Poly<O>) {
        if std::ptr::eq(self, other) {
            return;
        }
        self.resize(other.n());
        self.0.copy_from_slice(&other.0)
    }

    pub fn as_slice(&self) -> &[O] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [O] {
        &mut self.0
    }
}

impl<O> Default for Poly<O> {
    fn default() -> Self {
        Self(Vec::new())
    }
}
