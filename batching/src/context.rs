use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::error::Result;
use crate::parameters::Parameters;
use crate::tables::{BatchTables, TableCache};

/// What a batch encoder needs from the encryption context.
pub trait BatchingContext {
    fn plain_modulus(&self) -> u64;

    fn poly_modulus_degree(&self) -> usize;

    /// Whether the parameters passed structural validation.
    fn parameters_set(&self) -> bool;

    /// Root and permutation tables for (t, n), drawn from [TableCache::global].
    fn batch_tables(&self) -> Result<Arc<BatchTables>> {
        TableCache::global().get_or_build(self.plain_modulus(), self.poly_modulus_degree())
    }
}

#[derive(Debug)]
pub struct Context {
    parameters: Parameters,
    parameters_set: bool,
    tables: OnceLock<Arc<BatchTables>>,
}

impl Context {
    pub fn new(parameters: Parameters) -> Self {
        let parameters_set: bool = Self::validate(&parameters);
        if !parameters_set {
            debug!(
                plain_modulus = parameters.plain_modulus,
                poly_modulus_degree = parameters.poly_modulus_degree,
                "encryption parameters are not valid"
            );
        }
        Self {
            parameters,
            parameters_set,
            tables: OnceLock::new(),
        }
    }

    fn validate(parameters: &Parameters) -> bool {
        let n: usize = parameters.poly_modulus_degree;
        let t: u64 = parameters.plain_modulus;
        n >= 2 && n & (n - 1) == 0 && t >= 3 && t < 1 << 61
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

impl BatchingContext for Context {
    fn plain_modulus(&self) -> u64 {
        self.parameters.plain_modulus
    }

    fn poly_modulus_degree(&self) -> usize {
        self.parameters.poly_modulus_degree
    }

    fn parameters_set(&self) -> bool {
        self.parameters_set
    }

    fn batch_tables(&self) -> Result<Arc<BatchTables>> {
        if let Some(tables) = self.tables.get() {
            return Ok(tables.clone());
        }
        let tables: Arc<BatchTables> =
            TableCache::global().get_or_build(self.plain_modulus(), self.poly_modulus_degree())?;
        Ok(self.tables.get_or_init(|| tables).clone())
    }
}
