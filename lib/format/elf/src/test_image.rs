//! Synthetic 32-bit ELF images for tests.

use alloc::{vec, vec::Vec};

use crate::encoding::AnyEndian;

/// A section to place in a synthetic image.
struct Section {
    name: &'static str,
    kind: u32,
    flags: u32,
    data: Vec<u8>,
}

/// Lays out a header, program headers, section contents, a `.shstrtab` and the section header
/// table, in that order.
pub(crate) struct ImageBuilder {
    encoding: AnyEndian,
    program_headers: Vec<[u32; 8]>,
    sections: Vec<Section>,
}

impl ImageBuilder {
    pub(crate) fn new(encoding: AnyEndian) -> Self {
        Self {
            encoding,
            program_headers: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub(crate) fn program_header(mut self, fields: [u32; 8]) -> Self {
        self.program_headers.push(fields);
        self
    }

    pub(crate) fn section(mut self, name: &'static str, kind: u32, flags: u32, data: &[u8]) -> Self {
        self.sections.push(Section {
            name,
            kind,
            flags,
            data: data.to_vec(),
        });
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        let mut bytes = vec![0; 52];

        let phoff = if self.program_headers.is_empty() { 0 } else { bytes.len() };
        for fields in &self.program_headers {
            for field in fields {
                put_u32(&mut bytes, self.encoding, *field);
            }
        }

        let mut shdrs: Vec<[u32; 10]> = Vec::new();
        let mut shoff = 0;
        let mut shstrndx = 0;
        if !self.sections.is_empty() {
            let mut strtab = vec![0];
            shdrs.push([0; 10]);

            for section in &self.sections {
                let name = strtab.len();
                strtab.extend_from_slice(section.name.as_bytes());
                strtab.push(0);

                let offset = bytes.len();
                bytes.extend_from_slice(&section.data);
                shdrs.push([
                    to_u32(name),
                    section.kind,
                    section.flags,
                    0,
                    to_u32(offset),
                    to_u32(section.data.len()),
                    0,
                    0,
                    1,
                    0,
                ]);
            }

            let name = strtab.len();
            strtab.extend_from_slice(b".shstrtab\0");
            let offset = bytes.len();
            bytes.extend_from_slice(&strtab);
            shstrndx = shdrs.len();
            shdrs.push([
                to_u32(name),
                3,
                0,
                0,
                to_u32(offset),
                to_u32(strtab.len()),
                0,
                0,
                1,
                0,
            ]);

            bytes.resize(bytes.len().next_multiple_of(4), 0);
            shoff = bytes.len();
            for fields in &shdrs {
                for field in fields {
                    put_u32(&mut bytes, self.encoding, *field);
                }
            }
        }

        let mut header = Vec::new();
        header.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1]);
        header.push(match self.encoding {
            AnyEndian::LittleEndian => 1,
            AnyEndian::BigEndian => 2,
        });
        header.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        put_u16(&mut header, self.encoding, 2);
        put_u16(&mut header, self.encoding, 3);
        put_u32(&mut header, self.encoding, 1);
        put_u32(&mut header, self.encoding, 0x0804_8000);
        put_u32(&mut header, self.encoding, to_u32(phoff));
        put_u32(&mut header, self.encoding, to_u32(shoff));
        put_u32(&mut header, self.encoding, 0);
        put_u16(&mut header, self.encoding, 52);
        put_u16(&mut header, self.encoding, 32);
        put_u16(&mut header, self.encoding, to_u16(self.program_headers.len()));
        put_u16(&mut header, self.encoding, 40);
        put_u16(&mut header, self.encoding, to_u16(shdrs.len()));
        put_u16(&mut header, self.encoding, to_u16(shstrndx));
        bytes[..52].copy_from_slice(&header);

        bytes
    }
}

/// One `PT_LOAD` segment and a `.text` section, plus the generated `.shstrtab`.
pub(crate) fn sample_image(encoding: AnyEndian) -> Vec<u8> {
    ImageBuilder::new(encoding)
        .program_header([1, 0, 0x0804_8000, 0x0804_8000, 0x100, 0x100, 5, 0x1000])
        .section(".text", 1, 6, &[0x90, 0x90, 0xC3, 0x00])
        .finish()
}

/// Overwrites the `u16` at `offset`.
pub(crate) fn patch_u16(bytes: &mut [u8], encoding: AnyEndian, offset: usize, value: u16) {
    let raw = match encoding {
        AnyEndian::LittleEndian => value.to_le_bytes(),
        AnyEndian::BigEndian => value.to_be_bytes(),
    };
    bytes[offset..offset + 2].copy_from_slice(&raw);
}

/// Overwrites the `u32` at `offset`.
pub(crate) fn patch_u32(bytes: &mut [u8], encoding: AnyEndian, offset: usize, value: u32) {
    let raw = match encoding {
        AnyEndian::LittleEndian => value.to_le_bytes(),
        AnyEndian::BigEndian => value.to_be_bytes(),
    };
    bytes[offset..offset + 4].copy_from_slice(&raw);
}

fn put_u16(bytes: &mut Vec<u8>, encoding: AnyEndian, value: u16) {
    match encoding {
        AnyEndian::LittleEndian => bytes.extend_from_slice(&value.to_le_bytes()),
        AnyEndian::BigEndian => bytes.extend_from_slice(&value.to_be_bytes()),
    }
}

fn put_u32(bytes: &mut Vec<u8>, encoding: AnyEndian, value: u32) {
    match encoding {
        AnyEndian::LittleEndian => bytes.extend_from_slice(&value.to_le_bytes()),
        AnyEndian::BigEndian => bytes.extend_from_slice(&value.to_be_bytes()),
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap()
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap()
}
