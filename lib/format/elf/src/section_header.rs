//! Decoding of 32-bit ELF section headers.

use alloc::vec::Vec;
use core::{fmt, mem};

use crate::{
    encoding::{AnyEndian, Encoding},
    error::DecodeError,
    header::FileHeader,
    medium::{BackedMedium, Medium, check_bounds},
    raw::Elf32Shdr,
    usize_to_u64,
};

/// Contains basic information about a section in an ELF file.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SectionHeaderEntry {
    /// The offset of this section's name in the section name string table.
    pub name_offset: u32,
    /// The [`SectionType`] of this section.
    pub section_type: SectionType,
    /// The [`SectionFlags`] of this section.
    pub flags: SectionFlags,
    /// The address at which the section's first byte should reside in memory.
    pub address: u32,
    /// The offset at which the section's first byte resides in the file.
    pub offset: u32,
    /// The size of the section in bytes.
    pub size: u32,
    /// A section header table index link (interpretation depends on the [`SectionType`]).
    pub link: u32,
    /// Extra information (interpretation depends on the [`SectionType`]).
    pub info: u32,
    /// The required alignment of the section.
    pub address_alignment: u32,
    /// The size of fixed-size entries held in the section.
    pub entry_size: u32,
}

impl SectionHeaderEntry {
    /// The size, in bytes, of a 32-bit section header.
    pub const SIZE: u64 = usize_to_u64(mem::size_of::<Elf32Shdr>());

    /// Decodes the [`SectionHeaderEntry`] located `offset` bytes into `medium`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the record does not fit inside `medium`.
    pub fn decode<M: Medium + ?Sized>(
        encoding: AnyEndian,
        offset: u64,
        medium: &M,
    ) -> Result<Self, DecodeError> {
        let mut bytes = [0; mem::size_of::<Elf32Shdr>()];
        medium
            .read_slice(offset, &mut bytes)
            .map_err(DecodeError::truncated)?;
        let bytes = &bytes[..];

        let u32_at = |offset: usize| encoding.read_u32(usize_to_u64(offset), bytes);

        Ok(Self {
            name_offset: u32_at(mem::offset_of!(Elf32Shdr, sh_name))?,
            section_type: SectionType(u32_at(mem::offset_of!(Elf32Shdr, sh_type))?),
            flags: SectionFlags(u32_at(mem::offset_of!(Elf32Shdr, sh_flags))?),
            address: u32_at(mem::offset_of!(Elf32Shdr, sh_addr))?,
            offset: u32_at(mem::offset_of!(Elf32Shdr, sh_offset))?,
            size: u32_at(mem::offset_of!(Elf32Shdr, sh_size))?,
            link: u32_at(mem::offset_of!(Elf32Shdr, sh_link))?,
            info: u32_at(mem::offset_of!(Elf32Shdr, sh_info))?,
            address_alignment: u32_at(mem::offset_of!(Elf32Shdr, sh_addralign))?,
            entry_size: u32_at(mem::offset_of!(Elf32Shdr, sh_entsize))?,
        })
    }

    /// Returns the bytes of the section described by this [`SectionHeaderEntry`].
    ///
    /// [`SectionType::NOBITS`] sections occupy no space in the file and yield an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the section extends past the end of `medium`.
    pub fn data<'slice, M: BackedMedium + ?Sized>(
        &self,
        medium: &'slice M,
    ) -> Result<&'slice [u8], DecodeError> {
        if self.section_type == SectionType::NOBITS {
            return Ok(&[]);
        }

        medium
            .access_slice(u64::from(self.offset), u64::from(self.size))
            .map_err(DecodeError::truncated)
    }
}

/// Decodes every entry of the section header table described by `header`, in file order.
///
/// Entry `i` is read from `e_shoff + 40 * i`. A table offset of zero means the file has no
/// section header table. When `e_shnum` is zero but a table exists, the real count is taken from
/// the `sh_size` field of section header 0.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] if any record would extend past the end of `medium`; no
/// partial table is returned.
pub fn decode_section_headers<M: Medium + ?Sized>(
    medium: &M,
    header: &FileHeader,
) -> Result<Vec<SectionHeaderEntry>, DecodeError> {
    let offset = u64::from(header.section_header_offset);
    if offset == 0 {
        if header.section_header_count != 0 {
            log::warn!(
                "ignoring {} section headers with a table offset of zero",
                header.section_header_count
            );
        }
        return Ok(Vec::new());
    }

    let count = if header.section_header_count == 0 {
        u64::from(SectionHeaderEntry::decode(header.encoding(), offset, medium)?.size)
    } else {
        u64::from(header.section_header_count)
    };

    if count != 0 && u64::from(header.section_header_size) != SectionHeaderEntry::SIZE {
        log::warn!(
            "e_shentsize is {} but 32-bit section headers are {} bytes",
            header.section_header_size,
            SectionHeaderEntry::SIZE
        );
    }
    log::debug!("decoding {count} section headers at offset {offset:#x}");

    check_bounds(medium.size(), offset, count * SectionHeaderEntry::SIZE)
        .map_err(DecodeError::truncated)?;

    (0..count)
        .map(|index| {
            SectionHeaderEntry::decode(
                header.encoding(),
                offset + index * SectionHeaderEntry::SIZE,
                medium,
            )
        })
        .collect()
}

/// The type of the section.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionType(pub u32);

impl SectionType {
    /// The [`SectionHeaderEntry`] does not have an associated section.
    pub const NULL: Self = Self(0);
    /// The section holds information defined by the program.
    pub const PROGBITS: Self = Self(1);
    /// The section holds a symbol table.
    pub const SYMTAB: Self = Self(2);
    /// The section holds a string table.
    pub const STRTAB: Self = Self(3);
    /// The section holds relocation entries with explicit addends.
    pub const RELA: Self = Self(4);
    /// The section holds a symbol hash table.
    pub const HASH: Self = Self(5);
    /// The section holds information for dynamic linking.
    pub const DYNAMIC: Self = Self(6);
    /// The section holds information used for marking the file in some way.
    pub const NOTE: Self = Self(7);
    /// The section occupies no space in the file, but otherwise resembles
    /// [`SectionType::PROGBITS`].
    pub const NOBITS: Self = Self(8);
    /// The section holds relocation entries without explicit addends.
    pub const REL: Self = Self(9);
    /// Reserved with unspecified semantics.
    pub const SHLIB: Self = Self(10);
    /// The section holds a dynamic symbol table.
    pub const DYNSYM: Self = Self(11);
}

impl fmt::Debug for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NULL => f.pad("Null"),
            Self::PROGBITS => f.pad("ProgBits"),
            Self::SYMTAB => f.pad("SymTab"),
            Self::STRTAB => f.pad("StrTab"),
            Self::RELA => f.pad("Rela"),
            Self::HASH => f.pad("Hash"),
            Self::DYNAMIC => f.pad("Dynamic"),
            Self::NOTE => f.pad("Note"),
            Self::NOBITS => f.pad("NoBits"),
            Self::REL => f.pad("Rel"),
            Self::SHLIB => f.pad("ShLib"),
            Self::DYNSYM => f.pad("DynSym"),
            section_type => f.debug_tuple("SectionType").field(&section_type.0).finish(),
        }
    }
}

/// The flags relevant to the section.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionFlags(pub u32);

impl SectionFlags {
    /// The section contains data that should be writable during process execution.
    pub const WRITE: Self = Self(0x1);
    /// The section occupies memory during process execution.
    pub const ALLOC: Self = Self(0x2);
    /// The section contains executable machine instructions.
    pub const EXECINSTR: Self = Self(0x4);
    /// The section holds thread-local storage.
    pub const TLS: Self = Self(0x400);

    /// Returns `true` if `self` contains the flags that `rhs` has set.
    pub const fn contains(self, rhs: Self) -> bool {
        (self.0 & rhs.0) == rhs.0
    }
}

#[cfg(test)]
mod test {
    use super::{SectionFlags, SectionHeaderEntry, SectionType, decode_section_headers};
    use crate::{
        encoding::AnyEndian,
        error::DecodeError,
        header::decode_file_header,
        test_image::{ImageBuilder, patch_u16, patch_u32, sample_image},
    };

    #[test]
    fn decodes_in_file_order() {
        let image = ImageBuilder::new(AnyEndian::BigEndian)
            .section(".text", 1, 6, &[0xC3])
            .section(".data", 1, 3, &[1, 2, 3, 4])
            .section(".bss", 8, 3, &[])
            .finish();
        let header = decode_file_header(image.as_slice()).unwrap();
        let sections = decode_section_headers(image.as_slice(), &header).unwrap();

        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].section_type, SectionType::NULL);
        assert_eq!(sections[1].section_type, SectionType::PROGBITS);
        assert!(sections[1].flags.contains(SectionFlags::EXECINSTR));
        assert_eq!(sections[2].size, 4);
        assert!(sections[2].flags.contains(SectionFlags::WRITE));
        assert_eq!(sections[3].section_type, SectionType::NOBITS);
        assert_eq!(sections[4].section_type, SectionType::STRTAB);

        assert_eq!(sections[2].data(image.as_slice()), Ok(&[1, 2, 3, 4][..]));
        assert_eq!(sections[3].data(image.as_slice()), Ok(&[][..]));
    }

    #[test]
    fn partially_overrunning_table_is_truncated() {
        let image = sample_image(AnyEndian::LittleEndian);
        let header = decode_file_header(image.as_slice()).unwrap();
        let cut = image.len() - 10;

        assert_eq!(
            decode_section_headers(&image[..cut], &header),
            Err(DecodeError::Truncated {
                offset: u64::from(header.section_header_offset),
                length: 3 * SectionHeaderEntry::SIZE,
                size: u64::try_from(cut).unwrap(),
            })
        );
    }

    #[test]
    fn zero_count_reads_count_from_section_zero() {
        let mut image = sample_image(AnyEndian::LittleEndian);
        let header = decode_file_header(image.as_slice()).unwrap();
        let section_zero = usize::try_from(header.section_header_offset).unwrap();
        patch_u16(&mut image, AnyEndian::LittleEndian, 48, 0);
        patch_u32(&mut image, AnyEndian::LittleEndian, section_zero + 20, 3);

        let header = decode_file_header(image.as_slice()).unwrap();
        let sections = decode_section_headers(image.as_slice(), &header).unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[2].section_type, SectionType::STRTAB);
    }

    #[test]
    fn header_only_image_has_no_sections() {
        let image = ImageBuilder::new(AnyEndian::LittleEndian).finish();
        let header = decode_file_header(image.as_slice()).unwrap();

        assert!(decode_section_headers(image.as_slice(), &header).unwrap().is_empty());
    }
}
