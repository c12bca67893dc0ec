//! Encoding aware reading.

use crate::{
    error::DecodeError,
    ident,
    medium::{Medium, OutOfBoundsError},
};

/// An [`Encoding`] retrieves decoded integers from a [`Medium`].
///
/// This defines how multi-byte values are assembled from raw bytes.
///
/// # Errors
///
/// All read methods return an [`OutOfBoundsError`] when the [`Medium`] cannot provide the
/// requested bytes.
///
/// # Implementors
///
/// - [`Encoding`] must be stateless.
/// - Unaligned reads must be allowed.
#[expect(
    clippy::missing_errors_doc,
    reason = "errors are documented on the trait"
)]
pub trait Encoding: Copy {
    /// Returns the [`Encoding`] instance that corresponds with the given [`ident::Encoding`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedEncoding`] if this [`Encoding`] type cannot decode
    /// `encoding`.
    fn from_elf_encoding(encoding: ident::Encoding) -> Result<Self, DecodeError>;

    /// Reads the `u16` at `offset` bytes into the `medium`.
    fn read_u16<M: Medium + ?Sized>(
        self,
        offset: u64,
        medium: &M,
    ) -> Result<u16, OutOfBoundsError>;
    /// Reads the `u32` at `offset` bytes into the `medium`.
    fn read_u32<M: Medium + ?Sized>(
        self,
        offset: u64,
        medium: &M,
    ) -> Result<u32, OutOfBoundsError>;
}

/// Generates reading functions for a fixed byte order.
macro_rules! setup_func {
    ($func:ident, $kind:ident, $convert:ident) => {
        fn $func<M: Medium + ?Sized>(
            self,
            offset: u64,
            medium: &M,
        ) -> Result<$kind, OutOfBoundsError> {
            // Size of the array is inferred from the `convert` function.
            read_array(medium, offset).map($kind::$convert)
        }
    };
}

/// A zero-sized object offering methods for reading unaligned little-endian integers.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LittleEndian;

impl Encoding for LittleEndian {
    fn from_elf_encoding(encoding: ident::Encoding) -> Result<Self, DecodeError> {
        if encoding != ident::Encoding::LSB2 {
            return Err(DecodeError::UnsupportedEncoding(encoding));
        }

        Ok(Self)
    }

    setup_func!(read_u16, u16, from_le_bytes);
    setup_func!(read_u32, u32, from_le_bytes);
}

/// A zero-sized object offering methods for reading unaligned big-endian integers.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BigEndian;

impl Encoding for BigEndian {
    fn from_elf_encoding(encoding: ident::Encoding) -> Result<Self, DecodeError> {
        if encoding != ident::Encoding::MSB2 {
            return Err(DecodeError::UnsupportedEncoding(encoding));
        }

        Ok(Self)
    }

    setup_func!(read_u16, u16, from_be_bytes);
    setup_func!(read_u32, u32, from_be_bytes);
}

/// Byte order chosen at runtime from the identification bytes of a file.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnyEndian {
    /// Integers are in little-endian.
    LittleEndian,
    /// Integers are in big-endian.
    BigEndian,
}

impl Encoding for AnyEndian {
    fn from_elf_encoding(encoding: ident::Encoding) -> Result<Self, DecodeError> {
        match encoding {
            ident::Encoding::LSB2 => Ok(AnyEndian::LittleEndian),
            ident::Encoding::MSB2 => Ok(AnyEndian::BigEndian),
            encoding => Err(DecodeError::UnsupportedEncoding(encoding)),
        }
    }

    fn read_u16<M: Medium + ?Sized>(
        self,
        offset: u64,
        medium: &M,
    ) -> Result<u16, OutOfBoundsError> {
        match self {
            Self::LittleEndian => LittleEndian.read_u16(offset, medium),
            Self::BigEndian => BigEndian.read_u16(offset, medium),
        }
    }

    fn read_u32<M: Medium + ?Sized>(
        self,
        offset: u64,
        medium: &M,
    ) -> Result<u32, OutOfBoundsError> {
        match self {
            Self::LittleEndian => LittleEndian.read_u32(offset, medium),
            Self::BigEndian => BigEndian.read_u32(offset, medium),
        }
    }
}

/// Performs an exact-length read.
fn read_array<M: Medium + ?Sized, const N: usize>(
    medium: &M,
    offset: u64,
) -> Result<[u8; N], OutOfBoundsError> {
    let mut arr = [0; N];
    medium.read_slice(offset, &mut arr)?;
    Ok(arr)
}
