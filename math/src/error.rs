use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MathError {
    #[error("invalid modulus: q={q} is not an odd prime")]
    NotPrime { q: u64 },

    #[error("invalid modulus: q={q} exceeds 2^61")]
    ModulusTooLarge { q: u64 },

    #[error("invalid modulus: q={q} is not congruent to 1 mod nth_root={nth_root}")]
    NotNttFriendly { q: u64, nth_root: u64 },

    #[error("invalid argument: {value} is not a power of two")]
    NotPowerOfTwo { value: u64 },

    #[error("inverse of zero")]
    ZeroInverse,

    #[error("no primitive root found for q={q}")]
    NoPrimitiveRoot { q: u64 },

    #[error("prime list exhausted for bit_size={bit_size} and nth_root={nth_root}")]
    PrimesExhausted { bit_size: u64, nth_root: u64 },
}
