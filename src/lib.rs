//! # Unroll
//!
//! Unroll is a decoding cursor for flat, pre-agreed binary layouts. A [`Cursor`] borrows a byte buffer and keeps
//! two pieces of state next to it: the offset of the next read, and the byte order to read with. Every typed read
//! decodes at the offset and moves past what it consumed, so a layout is decoded by simply calling the readers in
//! the order the fields were written, instead of recomputing offsets and format strings at every step.
//!
//! A simple example demonstrates the idea:
//!
//! ```rust
//! use unroll::{Cursor, Error, LE};
//!
//! let bytes: [u8; 12] = [0xde, 0xad, 0xbe, 0xef, 0x02, 0x00, 0x01, 0x00, 0x02, 0x01, 0x00, 0xff];
//! // cursors start at offset 0, reading big endian
//! let mut cursor = Cursor::new(&bytes);
//! assert_eq!(cursor.read_u32().unwrap(), 0xdeadbeef);
//! // a u8 element count, then that many u16s
//! assert_eq!(cursor.read_u8len_u16dat().unwrap(), vec![1, 2]);
//! // the byte order can change at any time, by value or by alias
//! cursor.set_endian(LE).unwrap();
//! cursor.set_endian("<").unwrap();
//! assert_eq!(cursor.read_i16().unwrap(), 1);
//! // reads are all or nothing: this fails, and the offset stays where it was
//! assert!(matches!(cursor.read_u16(), Err(Error::OutOfBounds { .. })));
//! assert_eq!(cursor.read_i8().unwrap(), -1);
//! assert!(cursor.is_eof());
//! ```
//!
//! Besides the fixed-width readers there are length-prefixed array readers (`read_<len>len_<elem>dat`), relative
//! jumps (`jump_8` .. `jump_64`), padding skips, and [`Cursor::unpack`], which decodes an arbitrary [`FormatSpec`]
//! in one step.
//!
//! # Offsets are validated lazily
//!
//! [`Cursor::set_offset`] and the jump family never check where they land. Moving past the end of the buffer is
//! allowed, and only reported as [`Error::OutOfBounds`] by the next read that needs bytes there.
//!
//! # Sharing
//!
//! The buffer is only ever borrowed immutably, so any number of cursors, on any number of threads, can decode the
//! same bytes at once. A single cursor is mutated by every read and is used from one place at a time.

pub mod ctx;
mod cursor;
mod endian;
mod error;
mod unpack;

pub use cursor::*;
pub use endian::*;
pub use error::*;
pub use unpack::*;
