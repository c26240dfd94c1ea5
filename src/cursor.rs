use log::{debug, trace};

use crate::ctx::{FromCtx, Length, SizeWith};
use crate::endian::Endian;
use crate::error::{self, Error};

/// A decoding cursor over an immutable byte buffer.
///
/// The cursor owns nothing but its position and byte order; the bytes are borrowed, so any number of cursors
/// (on any number of threads) may walk the same buffer at once. Every read is _all-or-nothing_: it either
/// consumes exactly the bytes it decoded, or fails and leaves the offset where it was.
///
/// # Example
///
/// ```rust
/// use unroll::{Cursor, LE};
///
/// let bytes = [0x02, 0x00, 0x01, 0x00, 0x02, 0xef, 0xbe];
/// let mut cursor = Cursor::new(&bytes);
/// assert_eq!(cursor.read_u8len_u16dat().unwrap(), vec![1, 2]);
/// cursor.set_endian(LE).unwrap();
/// assert_eq!(cursor.read_u16().unwrap(), 0xbeef);
/// assert!(cursor.read_u8().is_err());
/// assert_eq!(cursor.offset(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    endian: Endian,
}

impl<'a> Cursor<'a> {
    /// Creates a big endian cursor at the start of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor {
            bytes,
            offset: 0,
            endian: Endian::default(),
        }
    }

    /// Creates a cursor at the start of `bytes` decoding with `endian`, which is either an `Endian` or one of its
    /// string aliases (see [`Endian::from_alias`](enum.Endian.html#method.from_alias))
    ///
    /// ```rust
    /// use unroll::{Cursor, LE};
    /// let bytes = [0x01, 0x00];
    /// assert_eq!(Cursor::with_endian(&bytes, LE).unwrap().read_u16().unwrap(), 1);
    /// assert_eq!(Cursor::with_endian(&bytes, "<").unwrap().read_u16().unwrap(), 1);
    /// assert!(Cursor::with_endian(&bytes, "sideways").is_err());
    /// ```
    pub fn with_endian<E>(bytes: &'a [u8], endian: E) -> error::Result<Self>
    where
        E: TryInto<Endian>,
        Error: From<E::Error>,
    {
        Ok(Cursor {
            bytes,
            offset: 0,
            endian: endian.try_into()?,
        })
    }

    /// The current read position
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the cursor to `offset`.
    ///
    /// **NB**: the new offset is not validated. Placing the cursor at `len()` is the ordinary end position;
    /// placing it past the end is allowed too, and only surfaces as `Error::OutOfBounds` on the next read.
    #[inline]
    pub fn set_offset(&mut self, offset: usize) {
        trace!("cursor repositioned {} -> {}", self.offset, offset);
        self.offset = offset;
    }

    /// The byte order used by subsequent reads
    #[inline]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the byte order for all subsequent reads. Accepts an `Endian` or a string alias; an unrecognized
    /// alias is `Error::InvalidEndianness` and leaves the current byte order untouched.
    pub fn set_endian<E>(&mut self, endian: E) -> error::Result<()>
    where
        E: TryInto<Endian>,
        Error: From<E::Error>,
    {
        self.endian = endian.try_into()?;
        Ok(())
    }

    /// The underlying buffer
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The number of bytes between the offset and the end of the buffer; zero when the cursor is past the end
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrows `size` bytes at the current offset without moving it
    #[inline]
    fn peek_bytes(&self, size: usize) -> error::Result<&'a [u8]> {
        let len = self.bytes.len();
        match self.offset.checked_add(size) {
            Some(end) if end <= len => Ok(&self.bytes[self.offset..end]),
            _ => Err(Error::out_of_bounds(self.offset, size, len)),
        }
    }

    /// Takes `size` bytes at the current offset and moves past them
    #[inline]
    pub(crate) fn take(&mut self, size: usize) -> error::Result<&'a [u8]> {
        let src = self.peek_bytes(size)?;
        self.offset += size;
        Ok(src)
    }

    /// Decodes `count` consecutive `N`s in a single bounds check; zero is allowed and yields nothing
    fn gather<N: FromCtx + SizeWith>(&mut self, count: usize) -> error::Result<Vec<N>> {
        let width = N::size_with(&self.endian);
        let size = width
            .checked_mul(count)
            .ok_or_else(|| Error::out_of_bounds(self.offset, usize::MAX, self.bytes.len()))?;
        let endian = self.endian;
        let src = self.take(size)?;
        Ok(src
            .chunks_exact(width)
            .map(|chunk| N::from_ctx(chunk, endian))
            .collect())
    }

    /// Reads one `N` at the offset with the current byte order, and moves past it.
    ///
    /// ```rust
    /// use unroll::Cursor;
    /// let bytes = [0xde, 0xad, 0xbe, 0xef];
    /// let mut cursor = Cursor::new(&bytes);
    /// let dead: u16 = cursor.read().unwrap();
    /// assert_eq!(dead, 0xdead);
    /// assert_eq!(cursor.read::<i16>().unwrap(), -16657);
    /// ```
    #[inline]
    pub fn read<N: FromCtx + SizeWith>(&mut self) -> error::Result<N> {
        let size = N::size_with(&self.endian);
        let endian = self.endian;
        let src = self.take(size)?;
        Ok(N::from_ctx(src, endian))
    }

    /// Reads `count` consecutive `N`s, in buffer order. `count` must be at least one.
    ///
    /// ```rust
    /// use unroll::Cursor;
    /// let bytes = [0x00, 0x01, 0x00, 0x02];
    /// let mut cursor = Cursor::new(&bytes);
    /// assert_eq!(cursor.read_n::<u16>(2).unwrap(), vec![1, 2]);
    /// assert!(cursor.read_n::<u16>(0).is_err());
    /// ```
    pub fn read_n<N: FromCtx + SizeWith>(&mut self, count: usize) -> error::Result<Vec<N>> {
        if count == 0 {
            return Err(Error::InvalidArgument("count must be positive"));
        }
        self.gather(count)
    }

    /// Moves past `count` bytes of padding without decoding them
    pub fn skip_padding(&mut self, count: usize) -> error::Result<()> {
        if count == 0 {
            return Err(Error::InvalidArgument("padding count must be positive"));
        }
        self.take(count).map(|_| ())
    }

    /// Reads an `L` element count, then that many `N`s.
    ///
    /// If the count itself cannot be read, nothing moves. If the count is read but the elements it announces are
    /// not all present, the offset is rolled back to before the count and `Error::OutOfBounds` is returned.
    ///
    /// ```rust
    /// use unroll::Cursor;
    /// let bytes = [0x00, 0x02, 0x3f, 0x80, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00];
    /// let mut cursor = Cursor::new(&bytes);
    /// assert_eq!(cursor.read_prefixed::<u16, f32>().unwrap(), vec![1.0, -2.0]);
    /// assert_eq!(cursor.offset(), 10);
    /// ```
    pub fn read_prefixed<L: Length, N: FromCtx + SizeWith>(&mut self) -> error::Result<Vec<N>> {
        let start = self.offset;
        let count = self.read::<L>()?.to_u64();
        let elements = usize::try_from(count)
            .map_err(|_| Error::out_of_bounds(self.offset, usize::MAX, self.bytes.len()))
            .and_then(|count| self.gather(count));
        if elements.is_err() {
            debug!("length prefix {} at {} overruns buffer of len {}, rolling back", count, start, self.bytes.len());
            self.offset = start;
        }
        elements
    }

    /// Reads an `L` displacement and moves the offset forward by it, counting from just after the displacement.
    ///
    /// **NB**: like [`set_offset`](#method.set_offset), the destination is not validated; a jump past the end
    /// only fails on the next read. A destination beyond `usize::MAX` saturates.
    ///
    /// ```rust
    /// use unroll::Cursor;
    /// let bytes = [0x02, 0xff, 0xff, 0x2a];
    /// let mut cursor = Cursor::new(&bytes);
    /// cursor.jump::<u8>().unwrap();
    /// assert_eq!(cursor.read_u8().unwrap(), 0x2a);
    /// ```
    pub fn jump<L: Length>(&mut self) -> error::Result<()> {
        let displacement = self.read::<L>()?.to_u64();
        let from = self.offset;
        self.offset = usize::try_from(displacement)
            .map(|displacement| from.saturating_add(displacement))
            .unwrap_or(usize::MAX);
        trace!("jumped {} bytes: {} -> {}", displacement, from, self.offset);
        Ok(())
    }
}

macro_rules! read_impl {
    ($($typ:ty => $read:ident, $reads:ident;)*) => {
        impl<'a> Cursor<'a> {
            $(
                #[doc = concat!("Reads one `", stringify!($typ), "` with the current byte order")]
                #[inline]
                pub fn $read(&mut self) -> error::Result<$typ> {
                    self.read::<$typ>()
                }
                #[doc = concat!("Reads `count` consecutive `", stringify!($typ), "`s; `count` must be at least one")]
                #[inline]
                pub fn $reads(&mut self, count: usize) -> error::Result<Vec<$typ>> {
                    self.read_n::<$typ>(count)
                }
            )*
        }
    };
}

read_impl! {
    u8 => read_u8, read_u8s;
    u16 => read_u16, read_u16s;
    u32 => read_u32, read_u32s;
    u64 => read_u64, read_u64s;
    i8 => read_i8, read_i8s;
    i16 => read_i16, read_i16s;
    i32 => read_i32, read_i32s;
    i64 => read_i64, read_i64s;
    f32 => read_f32, read_f32s;
    f64 => read_f64, read_f64s;
}

macro_rules! prefixed_impl {
    ($($len:ty, $elem:ty => $read:ident;)*) => {
        impl<'a> Cursor<'a> {
            $(
                #[doc = concat!("Reads a `", stringify!($len), "` count followed by that many `", stringify!($elem),
                    "`s; see [`read_prefixed`](#method.read_prefixed)")]
                #[inline]
                pub fn $read(&mut self) -> error::Result<Vec<$elem>> {
                    self.read_prefixed::<$len, $elem>()
                }
            )*
        }
    };
}

prefixed_impl! {
    u8, u8 => read_u8len_u8dat;
    u8, u16 => read_u8len_u16dat;
    u8, u32 => read_u8len_u32dat;
    u8, u64 => read_u8len_u64dat;
    u8, f32 => read_u8len_f32dat;
    u8, f64 => read_u8len_f64dat;
    u16, u8 => read_u16len_u8dat;
    u16, u16 => read_u16len_u16dat;
    u16, u32 => read_u16len_u32dat;
    u16, u64 => read_u16len_u64dat;
    u16, f32 => read_u16len_f32dat;
    u16, f64 => read_u16len_f64dat;
}

macro_rules! jump_impl {
    ($($typ:ty => $jump:ident;)*) => {
        impl<'a> Cursor<'a> {
            $(
                #[doc = concat!("Reads a `", stringify!($typ), "` displacement and jumps forward by it; see [`jump`](#method.jump)")]
                #[inline]
                pub fn $jump(&mut self) -> error::Result<()> {
                    self.jump::<$typ>()
                }
            )*
        }
    };
}

jump_impl! {
    u8 => jump_8;
    u16 => jump_16;
    u32 => jump_32;
    u64 => jump_64;
}
