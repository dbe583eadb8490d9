//! Byte-order reversal for fixed-width numeric values.

pub trait ReverseBytes: Copy {
    fn reverse_bytes(self) -> Self;
}

macro_rules! impl_reverse_int {
    ($($t:ty),*) => {
        $(
            impl ReverseBytes for $t {
                #[inline]
                fn reverse_bytes(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

macro_rules! impl_reverse_float {
    ($($t:ty),*) => {
        $(
            impl ReverseBytes for $t {
                #[inline]
                fn reverse_bytes(self) -> Self {
                    <$t>::from_bits(self.to_bits().swap_bytes())
                }
            }
        )*
    };
}

impl_reverse_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_reverse_float!(f32, f64);

/// Returns `value` with its in-memory byte order reversed.
#[inline]
pub fn reverse_byte_order<T: ReverseBytes>(value: T) -> T {
    value.reverse_bytes()
}
