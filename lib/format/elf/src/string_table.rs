//! Resolution of null-terminated strings held in string table sections.

use core::ffi::CStr;

use crate::{
    error::DecodeError,
    header::FileHeader,
    medium::BackedMedium,
    section_header::SectionHeaderEntry,
    u32_to_usize, usize_to_u64,
};

/// `e_shstrndx` value for a file without a section name string table.
pub const SHN_UNDEF: u16 = 0;
/// `e_shstrndx` value signalling that the real index lives in `sh_link` of section header 0.
pub const SHN_XINDEX: u16 = 0xFFFF;

/// The bytes of a string table section.
///
/// Lookups never leave the section's declared `sh_offset..sh_offset + sh_size` range.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct StringTable<'slice> {
    /// The section's bytes.
    bytes: &'slice [u8],
    /// The file offset of the first byte of the section.
    offset: u64,
}

impl<'slice> StringTable<'slice> {
    /// Creates a [`StringTable`] over the contents of `section`.
    ///
    /// A [`SectionType::NOBITS`][nobits] section has no bytes in the file, so every lookup in it
    /// fails.
    ///
    /// [nobits]: crate::section_header::SectionType::NOBITS
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the section extends past the end of `medium`.
    pub fn new<M: BackedMedium + ?Sized>(
        medium: &'slice M,
        section: &SectionHeaderEntry,
    ) -> Result<Self, DecodeError> {
        Ok(Self {
            bytes: section.data(medium)?,
            offset: u64::from(section.offset),
        })
    }

    /// Creates the [`StringTable`] found at `index` in `sections`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidIndex`]: `index` does not name an entry of `sections`.
    /// - [`DecodeError::Truncated`]: the section extends past the end of `medium`.
    pub fn from_index<M: BackedMedium + ?Sized>(
        medium: &'slice M,
        sections: &[SectionHeaderEntry],
        index: u32,
    ) -> Result<Self, DecodeError> {
        let section = sections
            .get(u32_to_usize(index))
            .ok_or(DecodeError::InvalidIndex {
                index,
                count: usize_to_u64(sections.len()),
            })?;

        Self::new(medium, section)
    }

    /// Returns the null-terminated string starting `offset` bytes into the table.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if `offset` lies outside the table or no null byte
    /// follows it before the table ends.
    pub fn get(&self, offset: u32) -> Result<&'slice CStr, DecodeError> {
        let remaining = self.bytes.get(u32_to_usize(offset)..).unwrap_or(&[]);

        CStr::from_bytes_until_nul(remaining).map_err(|_| DecodeError::Truncated {
            offset: self.offset + u64::from(offset),
            length: usize_to_u64(remaining.len()) + 1,
            size: self.offset + usize_to_u64(self.bytes.len()),
        })
    }
}

/// Returns the index of the section name string table, or [`None`] if the file declares none.
///
/// Follows [`SHN_XINDEX`] through section header 0 when the index does not fit in `e_shstrndx`.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidIndex`] if [`SHN_XINDEX`] is used without a section header 0.
pub fn section_name_table_index(
    header: &FileHeader,
    sections: &[SectionHeaderEntry],
) -> Result<Option<u32>, DecodeError> {
    match header.section_header_string_table_index {
        SHN_UNDEF => Ok(None),
        SHN_XINDEX => sections
            .first()
            .map(|first| Some(first.link))
            .ok_or(DecodeError::InvalidIndex {
                index: u32::from(SHN_XINDEX),
                count: 0,
            }),
        index => Ok(Some(u32::from(index))),
    }
}

/// Resolves the name found `name_offset` bytes into the string table at `string_table_index`.
///
/// # Errors
///
/// - [`DecodeError::InvalidIndex`]: `string_table_index` does not name an entry of `sections`.
/// - [`DecodeError::Truncated`]: the string is not terminated inside the string table section.
pub fn resolve_name<'slice, M: BackedMedium + ?Sized>(
    medium: &'slice M,
    sections: &[SectionHeaderEntry],
    string_table_index: u32,
    name_offset: u32,
) -> Result<&'slice CStr, DecodeError> {
    StringTable::from_index(medium, sections, string_table_index)?.get(name_offset)
}
