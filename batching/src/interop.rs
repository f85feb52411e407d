//! Adoption of externally built resources, outside the encode/decode surface.

use std::sync::Arc;

use tracing::debug;

use crate::encoder::BatchEncoder;
use crate::error::{BatchError, Result};
use crate::tables::BatchTables;

pub trait Inject {
    type Resource;

    /// Takes exclusive ownership of resource and releases the previous one.
    /// On error, resource is dropped and self is unchanged.
    fn inject(&mut self, resource: Self::Resource) -> Result<()>;
}

impl Inject for BatchEncoder {
    type Resource = Arc<BatchTables>;

    /// Only n must match: plain_modulus() and every later encode/decode
    /// follow the injected tables, whatever t the encoder was built for.
    fn inject(&mut self, resource: Arc<BatchTables>) -> Result<()> {
        if resource.slot_count() != self.slot_count() {
            return Err(BatchError::Construction(format!(
                "injected tables have n={} but the encoder has n={}",
                resource.slot_count(),
                self.slot_count()
            )));
        }
        debug!(
            plain_modulus = resource.plain_modulus(),
            poly_modulus_degree = resource.poly_modulus_degree(),
            "encoder adopted injected tables"
        );
        self.tables = resource;
        Ok(())
    }
}
