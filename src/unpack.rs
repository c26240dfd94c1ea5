//! Decoding an arbitrary flat layout in one step.
//!
//! A [`FormatSpec`] is an ordered list of `(Field, repeat)` pairs. Fields are packed with their exact widths and
//! no alignment, so the size of a layout is just the sum of its parts. [`Cursor::unpack`] reads the whole layout
//! with a single bounds check and returns every value in order, with padding omitted.
//!
//! Layouts can be built directly, or parsed from the compact notation familiar from packed-struct format
//! strings: an optional decimal repeat followed by a type code.
//!
//! | code | field | width |
//! |------|-------|-------|
//! | `B`  | `u8`  | 1     |
//! | `b`  | `i8`  | 1     |
//! | `H`  | `u16` | 2     |
//! | `h`  | `i16` | 2     |
//! | `I`  | `u32` | 4     |
//! | `i`  | `i32` | 4     |
//! | `Q`  | `u64` | 8     |
//! | `q`  | `i64` | 8     |
//! | `f`  | `f32` | 4     |
//! | `d`  | `f64` | 8     |
//! | `x`  | pad   | 1     |
//!
//! # Example
//!
//! ```rust
//! use unroll::{Cursor, Field, FormatSpec, Value};
//!
//! let bytes = [0x01, 0x00, 0x02, 0x00, 0x03, 0xff, 0xff, 0xff, 0xff, 0xfe];
//! let layout = FormatSpec::new().field(Field::U8, 1).field(Field::U16, 2).field(Field::Pad, 1).field(Field::I32, 1);
//! let mut cursor = Cursor::new(&bytes);
//! let values = cursor.unpack(&layout).unwrap();
//! assert_eq!(values, vec![Value::U8(1), Value::U16(2), Value::U16(3), Value::I32(-2)]);
//! assert_eq!(cursor.offset(), 10);
//!
//! let parsed: FormatSpec = "B 2H x i".parse().unwrap();
//! assert_eq!(parsed, layout);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::ctx::FromCtx;
use crate::cursor::Cursor;
use crate::endian::Endian;
use crate::error::{self, Error};

/// A single packed field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    /// One byte that is skipped and produces no value
    Pad,
}

impl Field {
    /// The encoded width in bytes
    pub fn size(&self) -> usize {
        match *self {
            Field::U8 | Field::I8 | Field::Pad => 1,
            Field::U16 | Field::I16 => 2,
            Field::U32 | Field::I32 | Field::F32 => 4,
            Field::U64 | Field::I64 | Field::F64 => 8,
        }
    }

    /// The type code used in the compact notation
    pub fn code(&self) -> char {
        match *self {
            Field::U8 => 'B',
            Field::I8 => 'b',
            Field::U16 => 'H',
            Field::I16 => 'h',
            Field::U32 => 'I',
            Field::I32 => 'i',
            Field::U64 => 'Q',
            Field::I64 => 'q',
            Field::F32 => 'f',
            Field::F64 => 'd',
            Field::Pad => 'x',
        }
    }

    pub fn from_code(code: char) -> Option<Field> {
        let field = match code {
            'B' => Field::U8,
            'b' => Field::I8,
            'H' => Field::U16,
            'h' => Field::I16,
            'I' => Field::U32,
            'i' => Field::I32,
            'Q' => Field::U64,
            'q' => Field::I64,
            'f' => Field::F32,
            'd' => Field::F64,
            'x' => Field::Pad,
            _ => return None,
        };
        Some(field)
    }

    /// `src` must hold at least `self.size()` bytes
    fn decode(&self, src: &[u8], endian: Endian) -> Option<Value> {
        let value = match *self {
            Field::U8 => Value::U8(FromCtx::from_ctx(src, endian)),
            Field::I8 => Value::I8(FromCtx::from_ctx(src, endian)),
            Field::U16 => Value::U16(FromCtx::from_ctx(src, endian)),
            Field::I16 => Value::I16(FromCtx::from_ctx(src, endian)),
            Field::U32 => Value::U32(FromCtx::from_ctx(src, endian)),
            Field::I32 => Value::I32(FromCtx::from_ctx(src, endian)),
            Field::U64 => Value::U64(FromCtx::from_ctx(src, endian)),
            Field::I64 => Value::I64(FromCtx::from_ctx(src, endian)),
            Field::F32 => Value::F32(FromCtx::from_ctx(src, endian)),
            Field::F64 => Value::F64(FromCtx::from_ctx(src, endian)),
            Field::Pad => return None,
        };
        Some(value)
    }
}

impl TryFrom<char> for Field {
    type Error = Error;
    fn try_from(code: char) -> error::Result<Self> {
        Field::from_code(code).ok_or(Error::InvalidFormat {
            position: 0,
            token: code,
        })
    }
}

/// An ordered packed layout of `(Field, repeat)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSpec {
    fields: Vec<(Field, usize)>,
}

impl FormatSpec {
    pub fn new() -> Self {
        FormatSpec { fields: Vec::new() }
    }

    /// Appends `repeat` consecutive `field`s; a repeat of zero describes nothing
    pub fn field(mut self, field: Field, repeat: usize) -> Self {
        self.push(field, repeat);
        self
    }

    pub fn push(&mut self, field: Field, repeat: usize) {
        self.fields.push((field, repeat));
    }

    pub fn fields(&self) -> &[(Field, usize)] {
        &self.fields
    }

    /// Total bytes the layout occupies. Saturates at `usize::MAX`, which no buffer can satisfy.
    pub fn size(&self) -> usize {
        self.fields.iter().fold(0usize, |size, &(field, repeat)| {
            size.saturating_add(field.size().saturating_mul(repeat))
        })
    }
}

impl FromIterator<(Field, usize)> for FormatSpec {
    fn from_iter<T: IntoIterator<Item = (Field, usize)>>(iter: T) -> Self {
        FormatSpec {
            fields: iter.into_iter().collect(),
        }
    }
}

impl FromStr for FormatSpec {
    type Err = Error;
    /// Parses the compact notation, e.g. `"B2HIx q"`. Whitespace may separate fields but not split a repeat
    /// from its code.
    fn from_str(s: &str) -> error::Result<Self> {
        let mut spec = FormatSpec::new();
        // the repeat being accumulated, and where its last digit was
        let mut pending: Option<(usize, usize, char)> = None;
        for (position, token) in s.char_indices() {
            if let Some(digit) = token.to_digit(10) {
                let repeat = pending.map_or(0, |(repeat, _, _)| repeat);
                let repeat = repeat.saturating_mul(10).saturating_add(digit as usize);
                pending = Some((repeat, position, token));
            } else if token.is_whitespace() {
                if pending.is_some() {
                    return Err(Error::InvalidFormat { position, token });
                }
            } else {
                let field = Field::from_code(token).ok_or(Error::InvalidFormat { position, token })?;
                let repeat = pending.take().map_or(1, |(repeat, _, _)| repeat);
                spec.push(field, repeat);
            }
        }
        match pending {
            Some((_, position, token)) => Err(Error::InvalidFormat { position, token }),
            None => Ok(spec),
        }
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &(field, repeat) in &self.fields {
            if repeat != 1 {
                write!(f, "{}", repeat)?;
            }
            write!(f, "{}", field.code())?;
        }
        Ok(())
    }
}

/// A decoded scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Value {
    /// The value as a `u64`, if it is an integer that fits
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(n) => Some(n.into()),
            Value::U16(n) => Some(n.into()),
            Value::U32(n) => Some(n.into()),
            Value::U64(n) => Some(n),
            Value::I8(n) => u64::try_from(n).ok(),
            Value::I16(n) => u64::try_from(n).ok(),
            Value::I32(n) => u64::try_from(n).ok(),
            Value::I64(n) => u64::try_from(n).ok(),
            Value::F32(_) | Value::F64(_) => None,
        }
    }

    /// The value as an `i64`, if it is an integer that fits
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(n) => Some(n.into()),
            Value::I16(n) => Some(n.into()),
            Value::I32(n) => Some(n.into()),
            Value::I64(n) => Some(n),
            Value::U8(n) => Some(n.into()),
            Value::U16(n) => Some(n.into()),
            Value::U32(n) => Some(n.into()),
            Value::U64(n) => i64::try_from(n).ok(),
            Value::F32(_) | Value::F64(_) => None,
        }
    }

    /// The value as an `f64`, if it is a float
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(n) => Some(n.into()),
            Value::F64(n) => Some(n),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($typ:ty => $variant:ident),*) => {
        $(
            impl From<$typ> for Value {
                #[inline]
                fn from(n: $typ) -> Self {
                    Value::$variant(n)
                }
            }
        )*
    };
}

value_from!(u8 => U8, i8 => I8, u16 => U16, i16 => I16, u32 => U32, i32 => I32, u64 => U64, i64 => I64,
            f32 => F32, f64 => F64);

impl<'a> Cursor<'a> {
    /// Reads every field of `format` with the current byte order, and moves past the whole layout.
    ///
    /// The layout is bounds checked as a unit: if it does not fit, nothing is decoded and the offset stays put.
    pub fn unpack(&mut self, format: &FormatSpec) -> error::Result<Vec<Value>> {
        let endian = self.endian();
        let src = self.take(format.size())?;
        let mut values = Vec::new();
        let mut at = 0;
        for &(field, repeat) in format.fields() {
            if field == Field::Pad {
                at += repeat;
                continue;
            }
            let width = field.size();
            for _ in 0..repeat {
                values.extend(field.decode(&src[at..at + width], endian));
                at += width;
            }
        }
        Ok(values)
    }

    /// Parses `format` in the compact notation and unpacks it; see [`unpack`](#method.unpack)
    ///
    /// ```rust
    /// use unroll::{Cursor, Value, LE};
    /// let bytes = [0xef, 0xbe, 0xad, 0xde, 0x2a];
    /// let mut cursor = Cursor::with_endian(&bytes, LE).unwrap();
    /// assert_eq!(cursor.unpack_str("IB").unwrap(), vec![Value::U32(0xdeadbeef), Value::U8(42)]);
    /// ```
    pub fn unpack_str(&mut self, format: &str) -> error::Result<Vec<Value>> {
        let format = format.parse::<FormatSpec>()?;
        self.unpack(&format)
    }
}
