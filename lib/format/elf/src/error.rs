//! Errors produced while decoding an ELF file.

use core::{error, fmt};

use crate::{
    ident::{Class, Encoding},
    medium::OutOfBoundsError,
};

/// Various errors that can occur when decoding an ELF file.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum DecodeError {
    /// The identification bytes do not start with `\x7FELF`.
    ///
    /// Bytes missing from a too-short medium are reported as zero.
    InvalidMagic([u8; 4]),
    /// The [`Class`] of the ELF file is not supported.
    UnsupportedClass(Class),
    /// The [`Encoding`] of the ELF file is not supported.
    UnsupportedEncoding(Encoding),
    /// A fixed-size record or string would extend past the end of its container.
    Truncated {
        /// The offset, in bytes, at which the read started.
        offset: u64,
        /// The number of bytes the read required.
        length: u64,
        /// The offset, in bytes, at which the container ends.
        size: u64,
    },
    /// A header table index does not refer to an existing entry.
    InvalidIndex {
        /// The requested index.
        index: u32,
        /// The number of entries in the table.
        count: u64,
    },
    /// A raw access to the underlying medium failed.
    OutOfBounds(OutOfBoundsError),
}

impl DecodeError {
    /// Reinterprets a failed record read as [`DecodeError::Truncated`].
    pub(crate) fn truncated(error: OutOfBoundsError) -> Self {
        Self::Truncated {
            offset: error.offset,
            length: error.length,
            size: error.size,
        }
    }
}

impl From<OutOfBoundsError> for DecodeError {
    fn from(value: OutOfBoundsError) -> Self {
        Self::OutOfBounds(value)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic(bytes) => write!(f, "invalid magic bytes: {bytes:x?}"),
            Self::UnsupportedClass(Class::CLASS64) => {
                write!(f, "64-bit ELF file parsing not supported")
            }
            Self::UnsupportedClass(Class(class)) => {
                write!(f, "unsupported ELF class({class}), only 32-bit files are supported")
            }
            Self::UnsupportedEncoding(Encoding(encoding)) => {
                write!(f, "unknown data encoding({encoding}) not supported")
            }
            Self::Truncated {
                offset,
                length,
                size,
            } => write!(
                f,
                "truncated read of {length} bytes at offset {offset} (data ends at {size})"
            ),
            Self::InvalidIndex { index, count } => {
                write!(f, "index {index} out of range of table with {count} entries")
            }
            Self::OutOfBounds(error) => write!(f, "error accessing ELF bytes: {error}"),
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::OutOfBounds(error) => Some(error),
            _ => None,
        }
    }
}
