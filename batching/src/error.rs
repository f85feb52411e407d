use math::error::MathError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Invalid context, or (t, n) does not support batching.
    #[error("cannot construct batch encoder: {0}")]
    Construction(String),

    #[error("input has {len} values but only {slots} slots are available")]
    Length { len: usize, slots: usize },

    #[error("value {value} at index {index} is outside [{min}, {max}]")]
    Range {
        index: usize,
        value: i128,
        min: i128,
        max: i128,
    },

    #[error("malformed plaintext: {0}")]
    MalformedPlaintext(String),

    #[error("scratch allocation of {requested} bytes failed ({available} bytes available)")]
    Allocation { requested: usize, available: usize },

    #[error("arithmetic error: {0}")]
    Arithmetic(MathError),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Invalid moduli and roots are construction failures, the rest are arithmetic.
impl From<MathError> for BatchError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ZeroInverse => BatchError::Arithmetic(err),
            _ => BatchError::Construction(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
