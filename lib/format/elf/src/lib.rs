//! The `elf` crate decodes the file header, program headers, and section headers of 32-bit ELF
//! files.
//!
//! # Capabilities
//!
//! ## Works in `no_std` environments
//!
//! This crate only needs `alloc` for the decoded header tables, so it can be used in `no_std`
//! contexts.
//!
//! ## Endian Awareness
//!
//! Every multi-byte field is decoded with the byte order declared by the identification bytes of
//! the file, regardless of the host's byte order.
//!
//! ## Bounds-checked decoding
//!
//! Structures are decoded field by field from declared offsets. Every record is bounds-checked
//! against the [`Medium`][medium::Medium] before any field is read, and string lookups never
//! leave their string table section.
//!
//! ## Uses no unsafe code
//!
//! This crate contains zero unsafe blocks of code.
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ffi::CStr;

use crate::{
    error::DecodeError,
    header::{FileHeader, decode_file_header},
    medium::{BackedMedium, Medium},
    program_header::{ProgramHeaderEntry, decode_program_headers},
    section_header::{SectionHeaderEntry, decode_section_headers},
    string_table::{StringTable, section_name_table_index},
};

pub mod encoding;
pub mod error;
pub mod header;
pub mod ident;
pub mod medium;
pub mod program_header;
pub mod raw;
pub mod section_header;
pub mod string_table;

#[cfg(test)]
mod test_image;

/// The decoded headers of a 32-bit ELF file.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ParsedImage {
    /// The [`FileHeader`] of the file.
    header: FileHeader,
    /// The program header table, in file order.
    program_headers: Vec<ProgramHeaderEntry>,
    /// The section header table, in file order.
    section_headers: Vec<SectionHeaderEntry>,
}

impl ParsedImage {
    /// Decodes the file header, program header table, and section header table of `medium`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] hit by [`decode_file_header()`],
    /// [`decode_program_headers()`], or [`decode_section_headers()`]; nothing is returned for a
    /// partially decoded file.
    pub fn parse<M: Medium + ?Sized>(medium: &M) -> Result<Self, DecodeError> {
        let header = decode_file_header(medium)?;
        let program_headers = decode_program_headers(medium, &header)?;
        let section_headers = decode_section_headers(medium, &header)?;

        Ok(Self {
            header,
            program_headers,
            section_headers,
        })
    }

    /// Returns the [`FileHeader`] of this [`ParsedImage`].
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Returns the program header table of this [`ParsedImage`].
    pub fn program_headers(&self) -> &[ProgramHeaderEntry] {
        &self.program_headers
    }

    /// Returns the section header table of this [`ParsedImage`].
    pub fn section_headers(&self) -> &[SectionHeaderEntry] {
        &self.section_headers
    }

    /// Returns the section name [`StringTable`], or [`None`] if the file declares none.
    ///
    /// `medium` must be the medium this [`ParsedImage`] was decoded from.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidIndex`]: `e_shstrndx` is out of range of the section header table.
    /// - [`DecodeError::Truncated`]: the string table section extends past the end of `medium`.
    pub fn string_table<'slice, M: BackedMedium + ?Sized>(
        &self,
        medium: &'slice M,
    ) -> Result<Option<StringTable<'slice>>, DecodeError> {
        section_name_table_index(&self.header, &self.section_headers)?
            .map(|index| StringTable::from_index(medium, &self.section_headers, index))
            .transpose()
    }

    /// Returns the name of `section`, or [`None`] if the file has no section name string table.
    ///
    /// # Errors
    ///
    /// See [`ParsedImage::string_table()`] and [`StringTable::get()`].
    pub fn section_name<'slice, M: BackedMedium + ?Sized>(
        &self,
        medium: &'slice M,
        section: &SectionHeaderEntry,
    ) -> Result<Option<&'slice CStr>, DecodeError> {
        self.string_table(medium)?
            .map(|table| table.get(section.name_offset))
            .transpose()
    }
}

/// Safely converts `value` to a `u64` relying on compile time code checking.
#[expect(clippy::as_conversions, reason = "implementation of type-safe as cast")]
const fn usize_to_u64(value: usize) -> u64 {
    #[cfg(not(any(
        target_pointer_width = "16",
        target_pointer_width = "32",
        target_pointer_width = "64"
    )))]
    compile_error!("library supports only 16-bit, 32-bit, and 64-bit usize");
    value as u64
}

/// Safely converts `value` to a `usize` relying on compile time code checking.
#[expect(clippy::as_conversions, reason = "implementation of type-safe as cast")]
const fn u32_to_usize(value: u32) -> usize {
    #[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
    compile_error!("library supports only 32-bit and 64-bit usize");
    value as usize
}

/// Converts a `u64` that is already known to be bounded by a slice length into a `usize`.
#[expect(clippy::as_conversions, reason = "implementation of type-safe as cast")]
#[expect(clippy::cast_possible_truncation, reason = "callers bound `value` by a `usize`")]
const fn u64_to_usize(value: u64) -> usize {
    value as usize
}
