use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use math::automorphism::GALOISGENERATOR;
use math::dft::ntt::Table;
use math::modulus::WordOps;
use math::modulus::prime::Prime;
use math::ring::Ring;
use tracing::{debug, trace};
use utils::map::Map;

use crate::error::{BatchError, Result};

/// NTT table of the plaintext ring, holding the primitive 2n-th root of unity.
pub type RootTable = Table<u64>;

/// Bijection between logical slots and NTT-domain indices.
///
/// Slot i of row 0 evaluates at psi^(3^i), slot i of row 1 at psi^(-3^i).
/// The forward NTT puts the evaluation at psi^(2*bitrev(j)+1) at index j,
/// so the exponents are mapped back through the bit-reversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotPermutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl SlotPermutation {
    /// n must be a power of two >= 2.
    pub fn new(n: usize) -> Self {
        debug_assert!(n >= 2 && n & (n - 1) == 0, "invalid n={}", n);

        let log_n: u32 = n.log2() as _;
        let row_size: usize = n >> 1;
        let mask: u64 = ((n as u64) << 1) - 1;

        let mut forward: Vec<usize> = vec![0; n];
        let mut exponent: u64 = 1;
        for i in 0..row_size {
            let index_row0: usize = ((exponent - 1) >> 1) as usize;
            let index_row1: usize = ((mask - exponent) >> 1) as usize;
            forward[i] = index_row0.reverse_bits_msb(log_n);
            forward[row_size + i] = index_row1.reverse_bits_msb(log_n);
            exponent = (exponent * GALOISGENERATOR) & mask;
        }

        let mut inverse: Vec<usize> = vec![0; n];
        forward
            .iter()
            .enumerate()
            .for_each(|(slot, &index)| inverse[index] = slot);

        Self { forward, inverse }
    }

    /// slot -> NTT index.
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// NTT index -> slot.
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Everything the encoder derives from (t, n), read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchTables {
    ring: Ring<u64>,
    generator: u64,
    permutation: SlotPermutation,
}

impl BatchTables {
    pub fn new(plain_modulus: u64, poly_modulus_degree: usize) -> Result<Self> {
        let n: usize = poly_modulus_degree;
        if n < 2 || n & (n - 1) != 0 {
            return Err(BatchError::Construction(format!(
                "poly_modulus_degree={} is not a power of two >= 2",
                n
            )));
        }

        let prime: Prime<u64> = Prime::<u64>::new(plain_modulus)?;

        let cyclotomic_order: u64 = (n as u64) << 1;
        if plain_modulus % cyclotomic_order != 1 {
            return Err(BatchError::Construction(format!(
                "batching not supported: plain_modulus={} is not congruent to 1 mod 2n={}",
                plain_modulus, cyclotomic_order
            )));
        }

        let generator: u64 = prime.primitive_root()?;
        let ring: Ring<u64> = Ring::new(n, plain_modulus)?;

        let root: u64 = ring.dft.psi();
        if prime.pow(root, n as u64) != plain_modulus - 1 || prime.pow(root, cyclotomic_order) != 1 {
            return Err(BatchError::Construction(format!(
                "root={} is not a primitive 2n-th root of unity mod {}",
                root, plain_modulus
            )));
        }

        let permutation: SlotPermutation = SlotPermutation::new(n);

        debug!(
            plain_modulus,
            poly_modulus_degree = n,
            generator,
            root,
            "built batching tables"
        );

        Ok(Self {
            ring,
            generator,
            permutation,
        })
    }

    pub fn plain_modulus(&self) -> u64 {
        self.ring.q()
    }

    pub fn poly_modulus_degree(&self) -> usize {
        self.ring.n()
    }

    pub fn slot_count(&self) -> usize {
        self.ring.n()
    }

    /// Smallest generator of (Z/tZ)^*.
    pub fn generator(&self) -> u64 {
        self.generator
    }

    /// Primitive 2n-th root of unity generator^((t-1)/2n).
    pub fn root(&self) -> u64 {
        self.ring.dft.psi()
    }

    pub fn root_table(&self) -> &RootTable {
        &self.ring.dft
    }

    pub fn ring(&self) -> &Ring<u64> {
        &self.ring
    }

    pub fn permutation(&self) -> &SlotPermutation {
        &self.permutation
    }
}

/// Tables shared across encoders, keyed by (t, n).
pub struct TableCache {
    tables: Mutex<Map<(u64, usize), Arc<BatchTables>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Map::new()),
        }
    }

    pub fn global() -> &'static TableCache {
        static GLOBAL: OnceLock<TableCache> = OnceLock::new();
        GLOBAL.get_or_init(TableCache::new)
    }

    /// Returns the cached tables for (t, n), building them on a miss.
    /// Failed builds are not cached.
    pub fn get_or_build(&self, plain_modulus: u64, poly_modulus_degree: usize) -> Result<Arc<BatchTables>> {
        let key: (u64, usize) = (plain_modulus, poly_modulus_degree);

        if let Some(tables) = self.lock().get(&key) {
            trace!(plain_modulus, poly_modulus_degree, "table cache hit");
            return Ok(tables.clone());
        }

        trace!(plain_modulus, poly_modulus_degree, "table cache miss");
        // Built outside the lock, a concurrent builder may win the insert.
        let tables: Arc<BatchTables> = Arc::new(BatchTables::new(plain_modulus, poly_modulus_degree)?);

        let mut map = self.lock();
        if let Some(existing) = map.get(&key) {
            return Ok(existing.clone());
        }
        map.insert(key, tables.clone());
        Ok(tables)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Map<(u64, usize), Arc<BatchTables>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}
