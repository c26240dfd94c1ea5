use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Little Endian byte order context
pub const LE: Endian = Endian::Little;
/// Big Endian byte order context
pub const BE: Endian = Endian::Big;
/// Network byte order context, which is big endian
pub const NETWORK: Endian = Endian::Big;
/// The byte order of the host machine
#[cfg(target_endian = "little")]
pub const NATIVE: Endian = LE;
/// The byte order of the host machine
#[cfg(target_endian = "big")]
pub const NATIVE: Endian = BE;

/// The endianness (byte order) of a stream of bytes
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Endian {
    Little,
    Big,
}

impl Default for Endian {
    /// Cursors decode big endian unless told otherwise
    #[inline]
    fn default() -> Self {
        BE
    }
}

impl Endian {
    #[inline]
    pub fn is_little(&self) -> bool {
        *self == LE
    }
    #[inline]
    pub fn is_big(&self) -> bool {
        *self == BE
    }
    /// Resolves one of the recognized aliases into an `Endian`.
    ///
    /// | alias                        | endian   |
    /// |------------------------------|----------|
    /// | `"big"`, `"be"`, `">"`       | `Big`    |
    /// | `"network"`, `"!"`           | `Big`    |
    /// | `"little"`, `"le"`, `"<"`    | `Little` |
    /// | `"native"`, `"@"`, `"="`     | host     |
    ///
    /// Matching is exact; anything else is `Error::InvalidEndianness`.
    ///
    /// ```rust
    /// use unroll::Endian;
    /// assert_eq!(Endian::from_alias(">").unwrap(), Endian::Big);
    /// assert_eq!(Endian::from_alias("little").unwrap(), Endian::Little);
    /// assert!(Endian::from_alias("middle").is_err());
    /// ```
    pub fn from_alias(alias: &str) -> Result<Endian> {
        match alias {
            "big" | "be" | ">" | "network" | "!" => Ok(BE),
            "little" | "le" | "<" => Ok(LE),
            "native" | "@" | "=" => Ok(NATIVE),
            _ => Err(Error::InvalidEndianness(alias.to_string())),
        }
    }
}

impl FromStr for Endian {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Endian::from_alias(s)
    }
}

impl<'s> TryFrom<&'s str> for Endian {
    type Error = Error;
    fn try_from(s: &'s str) -> Result<Self> {
        Endian::from_alias(s)
    }
}

impl TryFrom<String> for Endian {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        Endian::from_alias(&s)
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Endian::Little => f.write_str("little"),
            Endian::Big => f.write_str("big"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases() {
        for alias in ["big", "be", ">", "network", "!"] {
            assert_eq!(alias.parse::<Endian>().unwrap(), BE);
        }
        for alias in ["little", "le", "<"] {
            assert_eq!(Endian::try_from(alias).unwrap(), LE);
        }
        for alias in ["native", "@", "="] {
            assert_eq!(Endian::from_alias(alias).unwrap(), NATIVE);
        }
    }

    #[test]
    fn rejects_unknown() {
        for alias in ["", "Big", "LITTLE", " big", "middle", "<>"] {
            assert_eq!(
                Endian::from_alias(alias),
                Err(Error::InvalidEndianness(alias.to_string()))
            );
        }
    }

    #[test]
    fn display_roundtrips_through_alias() {
        assert_eq!(LE.to_string().parse::<Endian>().unwrap(), LE);
        assert_eq!(BE.to_string().parse::<Endian>().unwrap(), BE);
    }
}
