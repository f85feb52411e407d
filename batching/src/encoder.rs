use std::sync::Arc;

use itertools::izip;
use math::automorphism::galois_element;
use math::dft::DFT;
use tracing::{debug, trace_span};

use crate::context::BatchingContext;
use crate::error::{BatchError, Result};
use crate::plaintext::Plaintext;
use crate::scratch::{MemoryPoolHandle, ScratchBuffer};
use crate::slot::SlotValue;
use crate::tables::BatchTables;
use crate::validation;

/// Packs up to n integers mod t into a plaintext of Z_t[X]/(X^n+1) and back.
///
/// Slots form a 2 x (n/2) matrix: X -> X^3 rotates both rows left by one,
/// X -> X^(2n-1) swaps the rows. Addition and multiplication of plaintexts
/// act slot-wise.
#[derive(Clone, Debug)]
pub struct BatchEncoder {
    pub(crate) tables: Arc<BatchTables>,
}

impl BatchEncoder {
    pub fn new<C: BatchingContext + ?Sized>(context: &C) -> Result<Self> {
        if !context.parameters_set() {
            debug!(
                plain_modulus = context.plain_modulus(),
                poly_modulus_degree = context.poly_modulus_degree(),
                "rejecting context with invalid parameters"
            );
            return Err(BatchError::Construction(
                "encryption parameters are not set correctly".to_string(),
            ));
        }
        Ok(Self {
            tables: context.batch_tables()?,
        })
    }

    /// Number of slots, equal to n.
    pub fn slot_count(&self) -> usize {
        self.tables.slot_count()
    }

    /// Number of slots per row, n/2.
    pub fn row_size(&self) -> usize {
        self.slot_count() >> 1
    }

    pub fn plain_modulus(&self) -> u64 {
        self.tables.plain_modulus()
    }

    pub fn tables(&self) -> &Arc<BatchTables> {
        &self.tables
    }

    /// Galois element rotating rows left by steps (right if negative).
    pub fn galois_element_for_row_rotation(&self, steps: i64) -> usize {
        galois_element(steps, self.slot_count())
    }

    /// Galois element swapping the two rows.
    pub fn galois_element_for_column_swap(&self) -> usize {
        (self.slot_count() << 1) - 1
    }

    /// Encodes values into destination, zero-padding to n slots.
    /// destination is resized to n coefficients and left untouched on error.
    pub fn encode<T: SlotValue>(&self, values: &[T], destination: &mut Plaintext) -> Result<()> {
        let n: usize = self.slot_count();
        let _span = trace_span!("encode", n, len = values.len()).entered();

        let residues: Vec<u64> = validation::residues(values, n, self.plain_modulus())?;

        let poly = destination.as_poly_mut();
        poly.resize(n);
        poly.zero();
        let forward: &[usize] = self.tables.permutation().forward();
        izip!(residues.iter(), forward.iter()).for_each(|(residue, &index)| poly.0[index] = *residue);

        self.tables.ring().intt_inplace::<false>(poly);
        Ok(())
    }

    /// Decodes all n slots of plaintext into destination, which is cleared
    /// and resized to n. Scratch space comes from pool, or the global pool if None.
    /// destination is left untouched on error.
    pub fn decode<T: SlotValue>(
        &self,
        plaintext: &Plaintext,
        destination: &mut Vec<T>,
        pool: Option<&MemoryPoolHandle>,
    ) -> Result<()> {
        let n: usize = self.slot_count();
        let t: u64 = self.plain_modulus();
        let _span = trace_span!("decode", n).entered();

        validation::check_plaintext(plaintext, n, t)?;

        let pool: MemoryPoolHandle = pool.cloned().unwrap_or_default();
        let mut scratch: ScratchBuffer = pool.checkout(n)?;
        scratch.copy_from_slice(plaintext.coeffs());
        self.tables.root_table().forward_inplace(&mut scratch);

        let values: Vec<T> = self
            .tables
            .permutation()
            .forward()
            .iter()
            .enumerate()
            .map(|(slot, &index)| validation::lift::<T>(slot, scratch[index], t))
            .collect::<Result<Vec<T>>>()?;

        destination.clear();
        destination.extend(values);
        Ok(())
    }

    pub fn encode_new<T: SlotValue>(&self, values: &[T]) -> Result<Plaintext> {
        let mut plaintext: Plaintext = Plaintext::new(self.slot_count());
        self.encode(values, &mut plaintext)?;
        Ok(plaintext)
    }

    pub fn decode_new<T: SlotValue>(&self, plaintext: &Plaintext, pool: Option<&MemoryPoolHandle>) -> Result<Vec<T>> {
        let mut values: Vec<T> = Vec::with_capacity(self.slot_count());
        self.decode(plaintext, &mut values, pool)?;
        Ok(values)
    }

    pub fn encode_vector_i32(&self, values: &[i32], destination: &mut Plaintext) -> Result<()> {
        self.encode(values, destination)
    }

    pub fn encode_vector_u32(&self, values: &[u32], destination: &mut Plaintext) -> Result<()> {
        self.encode(values, destination)
    }

    pub fn encode_vector_i64(&self, values: &[i64], destination: &mut Plaintext) -> Result<()> {
        self.encode(values, destination)
    }

    pub fn encode_vector_u64(&self, values: &[u64], destination: &mut Plaintext) -> Result<()> {
        self.encode(values, destination)
    }

    pub fn decode_vector_i32(
        &self,
        plaintext: &Plaintext,
        destination: &mut Vec<i32>,
        pool: Option<&MemoryPoolHandle>,
    ) -> Result<()> {
        self.decode(plaintext, destination, pool)
    }

    pub fn decode_vector_u32(
        &self,
        plaintext: &Plaintext,
        destination: &mut Vec<u32>,
        pool: Option<&MemoryPoolHandle>,
    ) -> Result<()> {
        self.decode(plaintext, destination, pool)
    }

    pub fn decode_vector_i64(
        &self,
        plaintext: &Plaintext,
        destination: &mut Vec<i64>,
        pool: Option<&MemoryPoolHandle>,
    ) -> Result<()> {
        self.decode(plaintext, destination, pool)
    }

    pub fn decode_vector_u64(
        &self,
        plaintext: &Plaintext,
        destination: &mut Vec<u64>,
        pool: Option<&MemoryPoolHandle>,
    ) -> Result<()> {
        self.decode(plaintext, destination, pool)
    }
}
