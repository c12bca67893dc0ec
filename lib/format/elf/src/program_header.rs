//! Decoding of 32-bit ELF program headers.

use alloc::vec::Vec;
use core::{fmt, mem};

use crate::{
    encoding::{AnyEndian, Encoding},
    error::DecodeError,
    header::FileHeader,
    medium::{Medium, check_bounds},
    raw::Elf32Phdr,
    section_header::SectionHeaderEntry,
    usize_to_u64,
};

/// Marker in `e_phnum` for a program header count that does not fit in 16 bits.
pub const PN_XNUM: u16 = 0xFFFF;

/// Contains basic information about a segment in an ELF file.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ProgramHeaderEntry {
    /// The [`SegmentType`] of this segment.
    pub segment_type: SegmentType,
    /// The offset at which the segment's first byte resides in the file.
    pub offset: u32,
    /// The virtual address at which the first byte of the segment resides in memory.
    pub virtual_address: u32,
    /// The physical address at which the first byte of the segment resides in memory.
    ///
    /// If physical addressing is not relevant, then this field has unspecified contents.
    pub physical_address: u32,
    /// The number of bytes in the file image of the segment.
    pub file_size: u32,
    /// The number of bytes in the memory image of the segment.
    pub memory_size: u32,
    /// The [`SegmentFlags`] of this segment.
    pub flags: SegmentFlags,
    /// The required alignment of the segment.
    pub alignment: u32,
}

impl ProgramHeaderEntry {
    /// The size, in bytes, of a 32-bit program header.
    pub const SIZE: u64 = usize_to_u64(mem::size_of::<Elf32Phdr>());

    /// Decodes the [`ProgramHeaderEntry`] located `offset` bytes into `medium`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the record does not fit inside `medium`.
    pub fn decode<M: Medium + ?Sized>(
        encoding: AnyEndian,
        offset: u64,
        medium: &M,
    ) -> Result<Self, DecodeError> {
        let mut bytes = [0; mem::size_of::<Elf32Phdr>()];
        medium
            .read_slice(offset, &mut bytes)
            .map_err(DecodeError::truncated)?;
        let bytes = &bytes[..];

        let u32_at = |offset: usize| encoding.read_u32(usize_to_u64(offset), bytes);

        Ok(Self {
            segment_type: SegmentType(u32_at(mem::offset_of!(Elf32Phdr, p_type))?),
            offset: u32_at(mem::offset_of!(Elf32Phdr, p_offset))?,
            virtual_address: u32_at(mem::offset_of!(Elf32Phdr, p_vaddr))?,
            physical_address: u32_at(mem::offset_of!(Elf32Phdr, p_paddr))?,
            file_size: u32_at(mem::offset_of!(Elf32Phdr, p_filesz))?,
            memory_size: u32_at(mem::offset_of!(Elf32Phdr, p_memsz))?,
            flags: SegmentFlags(u32_at(mem::offset_of!(Elf32Phdr, p_flags))?),
            alignment: u32_at(mem::offset_of!(Elf32Phdr, p_align))?,
        })
    }
}

/// Decodes every entry of the program header table described by `header`, in file order.
///
/// Entry `i` is read from `e_phoff + 32 * i`. A table offset of zero means the file has no
/// program header table. When `e_phnum` holds [`PN_XNUM`], the real count is taken from the
/// `sh_info` field of section header 0.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] if any record would extend past the end of `medium`; no
/// partial table is returned.
pub fn decode_program_headers<M: Medium + ?Sized>(
    medium: &M,
    header: &FileHeader,
) -> Result<Vec<ProgramHeaderEntry>, DecodeError> {
    let offset = u64::from(header.program_header_offset);
    if offset == 0 {
        if header.program_header_count != 0 {
            log::warn!(
                "ignoring {} program headers with a table offset of zero",
                header.program_header_count
            );
        }
        return Ok(Vec::new());
    }

    let count = if header.program_header_count == PN_XNUM && header.section_header_offset != 0 {
        let first = SectionHeaderEntry::decode(
            header.encoding(),
            u64::from(header.section_header_offset),
            medium,
        )?;
        u64::from(first.info)
    } else {
        u64::from(header.program_header_count)
    };

    if count != 0 && u64::from(header.program_header_size) != ProgramHeaderEntry::SIZE {
        log::warn!(
            "e_phentsize is {} but 32-bit program headers are {} bytes",
            header.program_header_size,
            ProgramHeaderEntry::SIZE
        );
    }
    log::debug!("decoding {count} program headers at offset {offset:#x}");

    // The table is bounds-checked as a whole before any entry is decoded.
    check_bounds(medium.size(), offset, count * ProgramHeaderEntry::SIZE)
        .map_err(DecodeError::truncated)?;

    (0..count)
        .map(|index| {
            ProgramHeaderEntry::decode(
                header.encoding(),
                offset + index * ProgramHeaderEntry::SIZE,
                medium,
            )
        })
        .collect()
}

/// The type of the segment.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SegmentType(pub u32);

impl SegmentType {
    /// The [`ProgramHeaderEntry`] is unused.
    pub const NULL: Self = Self(0);
    /// The segment is loadable.
    pub const LOAD: Self = Self(1);
    /// The segment contains dynamic linking information.
    pub const DYNAMIC: Self = Self(2);
    /// The segment specifies the location and size of a null-terminated path name to invoke as an
    /// interpreter.
    pub const INTERP: Self = Self(3);
    /// The segment specifies the location and size of auxiliary information.
    pub const NOTE: Self = Self(4);
    /// Reserved with unspecified semantics.
    pub const SHLIB: Self = Self(5);
    /// The segment specifies the location and size of the program header table itself.
    pub const PHDR: Self = Self(6);
    /// The segment specifies the thread-local storage template.
    pub const TLS: Self = Self(7);
    /// The segment holds the GNU stack permissions.
    pub const GNU_STACK: Self = Self(0x6474_E551);
    /// The segment is made read-only after relocation.
    pub const GNU_RELRO: Self = Self(0x6474_E552);
}

impl fmt::Debug for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NULL => f.pad("Null"),
            Self::LOAD => f.pad("Load"),
            Self::DYNAMIC => f.pad("Dynamic"),
            Self::INTERP => f.pad("Interpreter"),
            Self::NOTE => f.pad("Note"),
            Self::SHLIB => f.pad("ShLib"),
            Self::PHDR => f.pad("Phdr"),
            Self::TLS => f.pad("Tls"),
            Self::GNU_STACK => f.pad("GnuStack"),
            Self::GNU_RELRO => f.pad("GnuRelro"),
            segment_type => f.debug_tuple("SegmentType").field(&segment_type.0).finish(),
        }
    }
}

/// The flags relevant to the segment.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SegmentFlags(pub u32);

impl SegmentFlags {
    /// The segment must be executable.
    pub const EXECUTE: Self = Self(0x1);
    /// The segment must be writable.
    pub const WRITE: Self = Self(0x2);
    /// The segment must be readable.
    pub const READ: Self = Self(0x4);

    /// Returns `true` if `self` contains the flags that `rhs` has set.
    pub const fn contains(self, rhs: Self) -> bool {
        (self.0 & rhs.0) == rhs.0
    }
}

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{ProgramHeaderEntry, SegmentFlags, SegmentType, decode_program_headers};
    use crate::{
        encoding::{AnyEndian, Encoding},
        error::DecodeError,
        header::decode_file_header,
        test_image::{ImageBuilder, patch_u16, patch_u32, sample_image},
    };

    #[test]
    fn decodes_in_file_order() {
        for encoding in [AnyEndian::LittleEndian, AnyEndian::BigEndian] {
            let image = ImageBuilder::new(encoding)
                .program_header([6, 0x34, 0x1000, 0x1000, 0x40, 0x40, 4, 4])
                .program_header([1, 0x00, 0x2000, 0x2000, 0x80, 0x100, 6, 0x1000])
                .program_header([0x6474_E551, 0, 0, 0, 0, 0, 6, 16])
                .finish();
            let header = decode_file_header(image.as_slice()).unwrap();
            let entries = decode_program_headers(image.as_slice(), &header).unwrap();

            assert_eq!(entries.len(), 3);
            assert_eq!(entries[0].segment_type, SegmentType::PHDR);
            assert_eq!(entries[1].segment_type, SegmentType::LOAD);
            assert_eq!(entries[1].memory_size, 0x100);
            assert!(entries[1].flags.contains(SegmentFlags::WRITE));
            assert!(!entries[1].flags.contains(SegmentFlags::EXECUTE));
            assert_eq!(entries[2].segment_type, SegmentType::GNU_STACK);

            for (index, entry) in (0u64..).zip(&entries) {
                let raw_offset = encoding
                    .read_u32(
                        u64::from(header.program_header_offset)
                            + ProgramHeaderEntry::SIZE * index
                            + 4,
                        image.as_slice(),
                    )
                    .unwrap();
                assert_eq!(entry.offset, raw_offset);
            }
        }
    }

    #[test]
    fn no_table_when_offset_is_zero() {
        let mut image = sample_image(AnyEndian::LittleEndian);
        patch_u32(&mut image, AnyEndian::LittleEndian, 28, 0);
        let header = decode_file_header(image.as_slice()).unwrap();

        assert_eq!(decode_program_headers(image.as_slice(), &header), Ok(Vec::new()));
    }

    #[test]
    fn overlong_count_is_truncated() {
        let mut image = sample_image(AnyEndian::BigEndian);
        patch_u16(&mut image, AnyEndian::BigEndian, 44, 500);
        let header = decode_file_header(image.as_slice()).unwrap();

        assert!(matches!(
            decode_program_headers(image.as_slice(), &header),
            Err(DecodeError::Truncated { offset: 52, .. })
        ));
    }

    #[test]
    fn extended_count_comes_from_section_zero() {
        let mut image = ImageBuilder::new(AnyEndian::LittleEndian)
            .program_header([1, 0, 0, 0, 0, 0, 4, 0])
            .program_header([4, 0, 0, 0, 0, 0, 4, 0])
            .section(".text", 1, 6, &[0; 4])
            .finish();
        let header = decode_file_header(image.as_slice()).unwrap();
        let section_zero = usize::try_from(header.section_header_offset).unwrap();
        patch_u16(&mut image, AnyEndian::LittleEndian, 44, super::PN_XNUM);
        patch_u32(&mut image, AnyEndian::LittleEndian, section_zero + 28, 2);

        let header = decode_file_header(image.as_slice()).unwrap();
        let entries = decode_program_headers(image.as_slice(), &header).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].segment_type, SegmentType::NOTE);
    }
}
