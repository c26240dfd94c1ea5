use core::convert::Infallible;
use core::result;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
/// A custom decoding error
pub enum Error {
    /// The requested range `[offset, offset + size)` does not fit in a buffer of `len` bytes
    #[error("requested range [{offset}..{offset}+{size}) from buffer of len {len}")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
    /// A count or width argument was zero or otherwise unusable
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The string does not name a known byte order
    #[error("unrecognized endianness {0:?}")]
    InvalidEndianness(String),
    /// A format descriptor contained a token with no meaning
    #[error("invalid format token {token:?} at position {position}")]
    InvalidFormat { position: usize, token: char },
}

impl Error {
    #[inline]
    pub(crate) fn out_of_bounds(offset: usize, size: usize, len: usize) -> Self {
        Error::OutOfBounds { offset, size, len }
    }
}

// lets an infallible `Endian -> Endian` conversion flow through `?`
impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_out_of_bounds() {
        let err = Error::out_of_bounds(3, 4, 5);
        assert_eq!(err.to_string(), "requested range [3..3+4) from buffer of len 5");
    }

    #[test]
    fn display_invalid_format() {
        let err = Error::InvalidFormat { position: 2, token: 'z' };
        assert_eq!(err.to_string(), "invalid format token 'z' at position 2");
    }
}
