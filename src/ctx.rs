//! Context-aware decoding traits for the primitive numeric types.
//!
//! # Discussion
//! Decoding a `u32` out of four bytes is meaningless without knowing the order those bytes were laid down in.
//! That order is the _context_ of the read, and every primitive the cursor understands is decoded by a single
//! trait, `FromCtx<Endian>`, together with `SizeWith<Endian>`, which reports how many bytes the value occupies.
//!
//! The cursor never interprets bytes itself: it bounds-checks and slices, then hands the exact-width slice to
//! `FromCtx::from_ctx`. Anything that implements both traits can therefore be read with [`Cursor::read`](../struct.Cursor.html#method.read)
//! and friends, without hand writing another `read_<type>` method.
//!
//! # Example
//!
//! ```rust
//! use unroll::ctx::{FromCtx, SizeWith};
//! use unroll::{BE, LE};
//!
//! let bytes = [0xde, 0xad, 0xbe, 0xef];
//! assert_eq!(u32::from_ctx(&bytes, BE), 0xdeadbeef);
//! assert_eq!(u16::from_ctx(&bytes, LE), 0xadde);
//! assert_eq!(<u64 as SizeWith>::size_with(&LE), 8);
//! ```

use core::mem::size_of;

use crate::endian::Endian;

/// Reads `Self` from an exactly sized byte slice using the context `Ctx`
///
/// Implementations may panic when `this` is shorter than the value; callers bounds check first.
pub trait FromCtx<Ctx: Copy = Endian>: Sized {
    fn from_ctx(this: &[u8], ctx: Ctx) -> Self;
}

/// The number of bytes `Self` occupies when encoded under `Ctx`
pub trait SizeWith<Ctx = Endian> {
    fn size_with(ctx: &Ctx) -> usize;
}

/// An unsigned integer usable as an element count or a displacement
pub trait Length: FromCtx + SizeWith + Copy {
    fn to_u64(self) -> u64;
}

macro_rules! from_ctx_impl {
    ($typ:tt, $size:expr) => {
        impl FromCtx<Endian> for $typ {
            #[inline]
            fn from_ctx(src: &[u8], le: Endian) -> Self {
                let mut data = [0u8; $size];
                data.copy_from_slice(&src[..$size]);
                if le.is_little() {
                    $typ::from_le_bytes(data)
                } else {
                    $typ::from_be_bytes(data)
                }
            }
        }

        impl SizeWith<Endian> for $typ {
            #[inline]
            fn size_with(_ctx: &Endian) -> usize {
                size_of::<$typ>()
            }
        }
    };
}

from_ctx_impl!(u8, 1);
from_ctx_impl!(i8, 1);
from_ctx_impl!(u16, 2);
from_ctx_impl!(i16, 2);
from_ctx_impl!(u32, 4);
from_ctx_impl!(i32, 4);
from_ctx_impl!(u64, 8);
from_ctx_impl!(i64, 8);
from_ctx_impl!(f32, 4);
from_ctx_impl!(f64, 8);

macro_rules! length_impl {
    ($($typ:ty),*) => {
        $(
            impl Length for $typ {
                #[inline]
                fn to_u64(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

length_impl!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::{BE, LE};

    macro_rules! from_ctx_test {
        ($name:ident, $typ:ty, $bytes:expr, $be:expr, $le:expr) => {
            #[test]
            fn $name() {
                let bytes = $bytes;
                assert_eq!(<$typ>::from_ctx(&bytes[..], BE), $be);
                assert_eq!(<$typ>::from_ctx(&bytes[..], LE), $le);
                assert_eq!(<$typ as SizeWith>::size_with(&BE), bytes.len());
            }
        };
    }

    from_ctx_test!(from_ctx_u8, u8, [0xffu8], 0xff, 0xff);
    from_ctx_test!(from_ctx_i8, i8, [0xffu8], -1, -1);
    from_ctx_test!(from_ctx_u16, u16, [0xbeu8, 0xef], 0xbeef, 0xefbe);
    from_ctx_test!(from_ctx_i16, i16, [0xffu8, 0xfe], -2, -257);
    from_ctx_test!(from_ctx_u32, u32, [0xdeu8, 0xad, 0xbe, 0xef], 0xdeadbeef, 0xefbeadde);
    from_ctx_test!(from_ctx_i32, i32, [0xffu8, 0xff, 0xff, 0x00], -256, 0x00ff_ffff);
    from_ctx_test!(
        from_ctx_u64,
        u64,
        [1u8, 2, 3, 4, 5, 6, 7, 8],
        0x0102030405060708,
        0x0807060504030201
    );
    from_ctx_test!(from_ctx_f32, f32, [0x3fu8, 0x80, 0, 0], 1.0, f32::from_bits(0x0000_803f));
    from_ctx_test!(from_ctx_f64, f64, [0x40u8, 0x09, 0x21, 0xfb, 0x54, 0x44, 0x2d, 0x18],
        core::f64::consts::PI, f64::from_bits(0x182d4454fb210940));

    #[test]
    fn ignores_trailing_bytes() {
        let bytes = [0x00, 0x2a, 0xff, 0xff];
        assert_eq!(u16::from_ctx(&bytes, BE), 42);
    }

    #[test]
    fn length_widens() {
        assert_eq!(0xffu8.to_u64(), 255);
        assert_eq!(0xffffu16.to_u64(), 65535);
        assert_eq!(u64::MAX.to_u64(), u64::MAX);
    }
}
