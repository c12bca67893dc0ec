//! Decoding of the 32-bit ELF file header.

use core::{fmt, mem};

use crate::{
    encoding::{AnyEndian, Encoding},
    error::DecodeError,
    ident::{Class, FileIdent},
    medium::Medium,
    raw::Elf32Ehdr,
    usize_to_u64,
};

/// Contains basic information about how an ELF file is arranged.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FileHeader {
    /// The identification bytes of the ELF file.
    pub ident: FileIdent,
    /// The [`ElfType`] of the ELF file.
    pub elf_type: ElfType,
    /// The architecture for which the ELF file is targeted.
    pub machine: Machine,
    /// The version of the ELF file.
    pub version: u32,
    /// The virtual address of the entry point.
    pub entry: u32,
    /// The program header table's file offset in bytes.
    pub program_header_offset: u32,
    /// The section header table's file offset in bytes.
    pub section_header_offset: u32,
    /// Processor specific flags.
    pub flags: u32,
    /// The size of the ELF file header in bytes.
    pub header_size: u16,
    /// The size of each entry in the program header table.
    pub program_header_size: u16,
    /// The number of entries in the program header table.
    pub program_header_count: u16,
    /// The size of each entry in the section header table.
    pub section_header_size: u16,
    /// The number of entries in the section header table.
    pub section_header_count: u16,
    /// The index of the section holding section names.
    pub section_header_string_table_index: u16,
    /// The byte order resolved from [`FileIdent::encoding`] when the header was decoded.
    encoding: AnyEndian,
}

impl FileHeader {
    /// The size, in bytes, of a 32-bit ELF file header.
    pub const SIZE: u64 = usize_to_u64(mem::size_of::<Elf32Ehdr>());

    /// Returns the [`AnyEndian`] with which the rest of the file is decoded.
    pub fn encoding(&self) -> AnyEndian {
        self.encoding
    }
}

/// Decodes the [`FileHeader`] at the start of `medium`.
///
/// Checks happen in order: magic bytes, identification length, class, encoding, and finally
/// header length. No field after the identification is read before all of them pass.
///
/// # Errors
///
/// - [`DecodeError::InvalidMagic`]: `medium` does not start with `\x7FELF`.
/// - [`DecodeError::UnsupportedClass`]: the file is not a 32-bit ELF file.
/// - [`DecodeError::UnsupportedEncoding`]: the byte order is neither little nor big endian.
/// - [`DecodeError::Truncated`]: `medium` is too small to contain a [`FileHeader`].
pub fn decode_file_header<M: Medium + ?Sized>(medium: &M) -> Result<FileHeader, DecodeError> {
    let ident = FileIdent::decode(medium)?;
    if ident.class != Class::CLASS32 {
        return Err(DecodeError::UnsupportedClass(ident.class));
    }
    let encoding = AnyEndian::from_elf_encoding(ident.encoding)?;

    let mut bytes = [0; mem::size_of::<Elf32Ehdr>()];
    medium
        .read_slice(0, &mut bytes)
        .map_err(DecodeError::truncated)?;
    let bytes = &bytes[..];

    let u16_at = |offset: usize| encoding.read_u16(usize_to_u64(offset), bytes);
    let u32_at = |offset: usize| encoding.read_u32(usize_to_u64(offset), bytes);

    let header = FileHeader {
        ident,
        elf_type: ElfType(u16_at(mem::offset_of!(Elf32Ehdr, e_type))?),
        machine: Machine(u16_at(mem::offset_of!(Elf32Ehdr, e_machine))?),
        version: u32_at(mem::offset_of!(Elf32Ehdr, e_version))?,
        entry: u32_at(mem::offset_of!(Elf32Ehdr, e_entry))?,
        program_header_offset: u32_at(mem::offset_of!(Elf32Ehdr, e_phoff))?,
        section_header_offset: u32_at(mem::offset_of!(Elf32Ehdr, e_shoff))?,
        flags: u32_at(mem::offset_of!(Elf32Ehdr, e_flags))?,
        header_size: u16_at(mem::offset_of!(Elf32Ehdr, e_ehsize))?,
        program_header_size: u16_at(mem::offset_of!(Elf32Ehdr, e_phentsize))?,
        program_header_count: u16_at(mem::offset_of!(Elf32Ehdr, e_phnum))?,
        section_header_size: u16_at(mem::offset_of!(Elf32Ehdr, e_shentsize))?,
        section_header_count: u16_at(mem::offset_of!(Elf32Ehdr, e_shnum))?,
        section_header_string_table_index: u16_at(mem::offset_of!(Elf32Ehdr, e_shstrndx))?,
        encoding,
    };

    log::debug!(
        "decoded {:?} header for {:?} ({:?})",
        header.elf_type,
        header.machine,
        header.ident.encoding
    );
    Ok(header)
}

/// The type of the ELF file.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElfType(pub u16);

impl ElfType {
    /// No kind.
    pub const NONE: Self = Self(0);
    /// Relocatable ELF file.
    pub const RELOCATABLE: Self = Self(1);
    /// Executable ELF file.
    pub const EXECUTABLE: Self = Self(2);
    /// Shared object ELF file.
    pub const SHARED: Self = Self(3);
    /// Core ELF file.
    pub const CORE: Self = Self(4);
}

impl fmt::Debug for ElfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.pad("None"),
            Self::RELOCATABLE => f.pad("Relocatable"),
            Self::EXECUTABLE => f.pad("Executable"),
            Self::SHARED => f.pad("SharedObject"),
            Self::CORE => f.pad("Core"),
            elf_type => f.debug_tuple("ElfType").field(&elf_type.0).finish(),
        }
    }
}

/// The architecture of the ELF file.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Machine(pub u16);

impl Machine {
    /// No required machine.
    pub const NONE: Self = Self(0);
    /// SPARC.
    pub const SPARC: Self = Self(2);
    /// Intel 80386.
    pub const INTEL_386: Self = Self(3);
    /// MIPS I.
    pub const MIPS: Self = Self(8);
    /// 32-bit PowerPC.
    pub const PPC: Self = Self(20);
    /// AArch32.
    pub const ARM: Self = Self(40);
    /// RISC-V.
    pub const RISCV: Self = Self(243);
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.pad("None"),
            Self::SPARC => f.pad("Sparc"),
            Self::INTEL_386 => f.pad("Intel386"),
            Self::MIPS => f.pad("Mips"),
            Self::PPC => f.pad("PowerPC"),
            Self::ARM => f.pad("Aarch32"),
            Self::RISCV => f.pad("RiscV"),
            machine => f.debug_tuple("Machine").field(&machine.0).finish(),
        }
    }
}
