//! Decoding of the 16 identification bytes at the start of every ELF file.

use core::{fmt, mem};

use crate::{error::DecodeError, medium::Medium, raw, usize_to_u64};

/// Basic information about an ELF file that can be obtained in an architecture independent
/// manner.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FileIdent {
    /// The magic bytes that identify this file as an ELF file.
    pub magic: [u8; 4],
    /// The [`Class`] of this ELF file.
    pub class: Class,
    /// The [`Encoding`] of this ELF file.
    pub encoding: Encoding,
    /// The version of the ELF identification.
    pub version: u8,
    /// The [`OsAbi`] targeted by this ELF file.
    pub os_abi: OsAbi,
    /// The version of the ABI targeted by this ELF file.
    pub abi_version: u8,
    /// Unused padding bytes.
    pub padding: [u8; 7],
}

impl FileIdent {
    /// The magic bytes that identify the start of an ELF file.
    pub const MAGIC_BYTES: [u8; 4] = [0x7F, b'E', b'L', b'F'];
    /// The current version of the ELF identification.
    pub const CURRENT_VERSION: u8 = 1;
    /// The size, in bytes, of the identification.
    pub const SIZE: u64 = usize_to_u64(mem::size_of::<raw::ElfIdent>());

    /// Decodes the [`FileIdent`] at the start of `medium`.
    ///
    /// Only the magic bytes are validated; class and encoding are left for the caller to judge.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidMagic`]: the first four bytes are not [`Self::MAGIC_BYTES`],
    ///   including when `medium` is shorter than four bytes.
    /// - [`DecodeError::Truncated`]: `medium` is shorter than [`Self::SIZE`].
    pub fn decode<M: Medium + ?Sized>(medium: &M) -> Result<Self, DecodeError> {
        let mut magic = [0; 4];
        for (offset, byte) in (0..).zip(magic.iter_mut()) {
            match medium.read_byte(offset) {
                Ok(value) => *byte = value,
                Err(_) => return Err(DecodeError::InvalidMagic(magic)),
            }
        }
        if magic != Self::MAGIC_BYTES {
            return Err(DecodeError::InvalidMagic(magic));
        }

        let mut bytes = [0; mem::size_of::<raw::ElfIdent>()];
        medium
            .read_slice(0, &mut bytes)
            .map_err(DecodeError::truncated)?;

        let mut padding = [0; 7];
        padding.copy_from_slice(&bytes[mem::offset_of!(raw::ElfIdent, ei_pad)..]);

        Ok(Self {
            magic,
            class: Class(bytes[mem::offset_of!(raw::ElfIdent, ei_class)]),
            encoding: Encoding(bytes[mem::offset_of!(raw::ElfIdent, ei_data)]),
            version: bytes[mem::offset_of!(raw::ElfIdent, ei_version)],
            os_abi: OsAbi(bytes[mem::offset_of!(raw::ElfIdent, ei_osabi)]),
            abi_version: bytes[mem::offset_of!(raw::ElfIdent, ei_abiversion)],
            padding,
        })
    }
}

/// Specifier of the ELF file class, which determines the sizing of various items in the ELF
/// file format.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Class(pub u8);

impl Class {
    /// Invalid [`Class`] specifier.
    pub const NONE: Self = Self(0);
    /// ELF file is formatted in its 32-bit format.
    pub const CLASS32: Self = Self(1);
    /// ELF file is formatted in its 64-bit format.
    pub const CLASS64: Self = Self(2);
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.pad("Invalid"),
            Self::CLASS32 => f.pad("Class32"),
            Self::CLASS64 => f.pad("Class64"),
            class => f.debug_tuple("Class").field(&class.0).finish(),
        }
    }
}

/// Specifier of the ELF file data encoding, which determines the byte order of multi-byte
/// fields.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Encoding(pub u8);

impl Encoding {
    /// Invalid [`Encoding`] specifier.
    pub const NONE: Self = Self(0);
    /// Little endian two's complement integers.
    pub const LSB2: Self = Self(1);
    /// Big endian two's complement integers.
    pub const MSB2: Self = Self(2);
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.pad("NoEncoding"),
            Self::LSB2 => f.pad("LittleEndian"),
            Self::MSB2 => f.pad("BigEndian"),
            encoding => f.debug_tuple("Encoding").field(&encoding.0).finish(),
        }
    }
}

/// Specifier of the OS or ABI specific ELF extensions used by this file.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct OsAbi(pub u8);

impl OsAbi {
    /// No extensions or unspecified extensions.
    pub const SYSV: Self = Self(0);
    /// Linux.
    pub const LINUX: Self = Self(3);
    /// Stand-alone (embedded) application.
    pub const STANDALONE: Self = Self(255);
}

impl fmt::Debug for OsAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SYSV => f.pad("SystemV"),
            Self::LINUX => f.pad("Linux"),
            Self::STANDALONE => f.pad("Standalone"),
            os_abi => f.debug_tuple("OsAbi").field(&os_abi.0).finish(),
        }
    }
}
