pub mod context;
pub mod encoder;
pub mod error;
pub mod interop;
pub mod parameters;
pub mod persist;
pub mod plaintext;
pub mod scratch;
pub mod slot;
pub mod tables;
pub mod validation;

pub use context::{BatchingContext, Context};
pub use encoder::BatchEncoder;
pub use error::{BatchError, Result};
pub use parameters::Parameters;
pub use plaintext::Plaintext;
pub use scratch::MemoryPoolHandle;
