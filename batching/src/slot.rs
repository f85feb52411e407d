use std::fmt::Debug;

/// Interpretation of slot values mod t.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signedness {
    /// Values in [0, t-1].
    Unsigned,
    /// Values in [-(t-1)/2, (t-1)/2], negative v stored as t + v.
    Signed,
}

impl Signedness {
    /// Returns the inclusive range of values representable mod t.
    pub fn range(&self, plain_modulus: u64) -> (i128, i128) {
        let t: i128 = plain_modulus as i128;
        match self {
            Signedness::Unsigned => (0, t - 1),
            Signedness::Signed => (-((t - 1) >> 1), (t - 1) >> 1),
        }
    }

    /// Maps a residue in [0, t-1] to its representative.
    pub fn lift(&self, residue: u64, plain_modulus: u64) -> i128 {
        match self {
            Signedness::Signed if residue > (plain_modulus - 1) >> 1 => residue as i128 - plain_modulus as i128,
            _ => residue as i128,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for u64 {}
    impl Sealed for i64 {}
}

/// Integer types that can be packed into slots.
pub trait SlotValue: sealed::Sealed + Copy + Default + Debug + Send + Sync + 'static {
    const SIGNEDNESS: Signedness;
    const MIN: i128;
    const MAX: i128;

    fn as_i128(self) -> i128;

    fn from_i128(value: i128) -> Option<Self>;
}

macro_rules! impl_slot_value {
    ($ty:ty, $signedness:expr) => {
        impl SlotValue for $ty {
            const SIGNEDNESS: Signedness = $signedness;
            const MIN: i128 = <$ty>::MIN as i128;
            const MAX: i128 = <$ty>::MAX as i128;

            #[inline(always)]
            fn as_i128(self) -> i128 {
                self as i128
            }

            #[inline(always)]
            fn from_i128(value: i128) -> Option<Self> {
                <$ty>::try_from(value).ok()
            }
        }
    };
}

impl_slot_value!(u32, Signedness::Unsigned);
impl_slot_value!(i32, Signedness::Signed);
impl_slot_value!(u64, Signedness::Unsigned);
impl_slot_value!(i64, Signedness::Signed);
