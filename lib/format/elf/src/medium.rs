//! Bounds-checked access to immutable and contiguous byte sources.

use core::{error, fmt};

use crate::{u64_to_usize, usize_to_u64};

/// Read-only access to a contiguous run of bytes.
///
/// The medium must be immutable: byte values never change between reads and the value of
/// [`Medium::size()`] also never changes.
///
/// # Implementors
///
/// Implementations must treat any overflow in `offset + length` as an [`OutOfBoundsError`]
/// ([`check_bounds()`] centralizes this).
pub trait Medium {
    /// The number of bytes available to be retrieved.
    ///
    /// This value must not change but may be zero.
    fn size(&self) -> u64;

    /// Reads `slice.len()` bytes into `slice` from `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if the requested region is not entirely inside the
    /// [`Medium`].
    fn read_slice(&self, offset: u64, slice: &mut [u8]) -> Result<(), OutOfBoundsError>;

    /// Reads a single byte from `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if `offset` is not inside the [`Medium`].
    fn read_byte(&self, offset: u64) -> Result<u8, OutOfBoundsError> {
        let mut val = 0;

        self.read_slice(offset, core::array::from_mut(&mut val))?;
        Ok(val)
    }
}

/// A [`Medium`] whose bytes can be borrowed in place.
pub trait BackedMedium: Medium {
    /// Borrows `length` bytes at `offset` from the [`BackedMedium`].
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if the requested region is not entirely inside the
    /// [`BackedMedium`].
    fn access_slice(&self, offset: u64, length: u64) -> Result<&[u8], OutOfBoundsError>;
}

/// A requested region does not fit inside a [`Medium`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct OutOfBoundsError {
    /// The offset, in bytes, of the start of the requested region.
    pub offset: u64,
    /// The size, in bytes, of the requested region.
    pub length: u64,
    /// The actual size of the [`Medium`].
    pub size: u64,
}

impl fmt::Display for OutOfBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requested region at {} bytes with a length of {} \
            does not fit inside medium of {} bytes",
            self.offset, self.length, self.size
        )
    }
}

impl error::Error for OutOfBoundsError {}

/// Checks that `length` bytes at `offset` fit inside a [`Medium`] of `size` bytes.
///
/// # Errors
///
/// Returns [`OutOfBoundsError`] if `offset + length` overflows or exceeds `size`.
pub fn check_bounds(size: u64, offset: u64, length: u64) -> Result<(), OutOfBoundsError> {
    let error = OutOfBoundsError {
        offset,
        length,
        size,
    };

    let max_offset = offset.checked_add(length).ok_or(error)?;
    if max_offset > size {
        return Err(error);
    }

    Ok(())
}

impl Medium for [u8] {
    fn size(&self) -> u64 {
        usize_to_u64(self.len())
    }

    fn read_slice(&self, offset: u64, slice: &mut [u8]) -> Result<(), OutOfBoundsError> {
        slice.copy_from_slice(self.access_slice(offset, usize_to_u64(slice.len()))?);
        Ok(())
    }
}

impl BackedMedium for [u8] {
    fn access_slice(&self, offset: u64, length: u64) -> Result<&[u8], OutOfBoundsError> {
        check_bounds(self.size(), offset, length)?;

        // The region fits within a `usize` since the bounds check succeeded and the upper bound
        // is a `usize`.
        Ok(&self[u64_to_usize(offset)..][..u64_to_usize(length)])
    }
}

impl<M: Medium + ?Sized> Medium for &M {
    fn size(&self) -> u64 {
        M::size(*self)
    }

    fn read_byte(&self, offset: u64) -> Result<u8, OutOfBoundsError> {
        M::read_byte(*self, offset)
    }

    fn read_slice(&self, offset: u64, slice: &mut [u8]) -> Result<(), OutOfBoundsError> {
        M::read_slice(*self, offset, slice)
    }
}

impl<M: BackedMedium + ?Sized> BackedMedium for &M {
    fn access_slice(&self, offset: u64, length: u64) -> Result<&[u8], OutOfBoundsError> {
        M::access_slice(*self, offset, length)
    }
}
