//! End to end tests of decoding and rendering synthetic 32-bit ELF files.

use elf::{ParsedImage, error::DecodeError, ident::Class};
use elfdump::{render_report, write_report};

/// Offset of the section header table in the images built by [`image()`].
const SECTION_HEADER_OFFSET: usize = 108;

/// Builds an executable with one `PT_LOAD` segment and the sections `""`, `.text`, and
/// `.shstrtab`.
fn image(big_endian: bool) -> Vec<u8> {
    let mut bytes = vec![0; SECTION_HEADER_OFFSET + 3 * 40];
    let put16 = |bytes: &mut Vec<u8>, offset: usize, value: u16| {
        let raw = if big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        bytes[offset..offset + 2].copy_from_slice(&raw);
    };
    let put32 = |bytes: &mut Vec<u8>, offset: usize, value: u32| {
        let raw = if big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        bytes[offset..offset + 4].copy_from_slice(&raw);
    };

    bytes[..4].copy_from_slice(b"\x7fELF");
    bytes[4] = 1;
    bytes[5] = if big_endian { 2 } else { 1 };
    bytes[6] = 1;
    put16(&mut bytes, 16, 2);
    put16(&mut bytes, 18, 3);
    put32(&mut bytes, 20, 1);
    put32(&mut bytes, 24, 0x0804_8000);
    put32(&mut bytes, 28, 52);
    put32(&mut bytes, 32, 108);
    put16(&mut bytes, 40, 52);
    put16(&mut bytes, 42, 32);
    put16(&mut bytes, 44, 1);
    put16(&mut bytes, 46, 40);
    put16(&mut bytes, 48, 3);
    put16(&mut bytes, 50, 2);

    for (index, value) in [1, 0, 0x0804_8000, 0x0804_8000, 88, 88, 5, 0x1000]
        .into_iter()
        .enumerate()
    {
        put32(&mut bytes, 52 + 4 * index, value);
    }

    bytes[84..88].copy_from_slice(&[0x90, 0x90, 0xC3, 0x00]);
    bytes[88..105].copy_from_slice(b"\0.text\0.shstrtab\0");

    let sections: [[u32; 10]; 3] = [
        [0; 10],
        [1, 1, 6, 0x0804_8054, 84, 4, 0, 0, 16, 0],
        [7, 3, 0, 0, 88, 17, 0, 0, 1, 0],
    ];
    for (index, section) in sections.iter().enumerate() {
        for (field, value) in section.iter().enumerate() {
            put32(
                &mut bytes,
                SECTION_HEADER_OFFSET + 40 * index + 4 * field,
                *value,
            );
        }
    }

    bytes
}

fn render(bytes: &[u8]) -> String {
    let image = ParsedImage::parse(bytes).unwrap();
    render_report(&image, bytes).unwrap()
}

#[test]
fn renders_every_block_in_order() {
    let report = render(&image(false));

    let header = report.find("ELF Header:").unwrap();
    let segments = report.find("Program Headers:").unwrap();
    let sections = report.find("Section Headers:").unwrap();
    assert_eq!(header, 0);
    assert!(header < segments && segments < sections);

    for line in [
        "    magic: \\x7fELF\n",
        "    ei_class: 32 bit\n",
        "    ei_data: 2LSB\n",
        "    ei_version: CURRENT\n",
        "    ei_osabi: SYSV\n",
        "    .... PADDING ....\n",
        "  e_type: ET_EXEC\n",
        "  e_machine: EM_386\n",
        "  e_version: 0x00000001\n",
        "  e_entry: 0x08048000\n",
        "  e_phoff: 0x00000034\n",
        "  e_shoff: 0x0000006c\n",
        "  e_ehsize: 0x0034\n",
        "  e_shnum: 0x0003\n",
        "  e_shstrndx: 0x0002\n",
    ] {
        assert!(report[..segments].contains(line), "missing {line:?}");
    }
}

#[test]
fn renders_program_headers() {
    let report = render(&image(true));

    assert!(report.contains(
        "Program Headers:\n  Header_0:\n    p_type: PT_LOAD\n    p_offset: 0x00000000\n    \
         p_vaddr: 0x08048000\n"
    ));
    assert!(report.contains("    p_flags: PF_R | PF_X\n    p_align: 0x00001000\n"));
}

#[test]
fn renders_section_headers_with_names() {
    let report = render(&image(false));
    let sections = &report[report.find("Section Headers:").unwrap()..];

    assert!(sections.contains("  Section_0:\n    sh_name: 0x00000000\n    sh_type: SHT_NULL\n"));
    assert!(sections.contains(
        "  .text:\n    sh_name: 0x00000001\n    sh_type: SHT_PROGBITS\n    \
         sh_flags: SHF_ALLOC | SHF_EXECINSTR\n    sh_addr: 0x08048054\n"
    ));
    assert!(sections.contains("  .shstrtab:\n    sh_name: 0x00000007\n    sh_type: SHT_STRTAB\n"));

    let text = sections.find(".text:").unwrap();
    let names = sections.find(".shstrtab:").unwrap();
    assert!(sections.find("Section_0:").unwrap() < text && text < names);
}

#[test]
fn byte_order_only_changes_ei_data() {
    let little = render(&image(false));
    let big = render(&image(true));

    assert_eq!(
        little.replace("ei_data: 2LSB", "ei_data: 2MSB"),
        big,
        "reports differ outside of ei_data"
    );
}

#[test]
fn sections_without_name_table_are_numbered() {
    let mut bytes = image(false);
    bytes[50..52].copy_from_slice(&[0, 0]);
    let report = render(&bytes);

    assert!(report.contains("  Section_1:\n    sh_name: 0x00000001\n"));
    assert!(report.contains("  Section_2:\n"));
    assert!(!report.contains(".text"));
}

#[test]
fn unknown_values_render_as_hex() {
    let mut bytes = image(false);
    bytes[18..20].copy_from_slice(&0x1234u16.to_le_bytes());
    bytes[52..56].copy_from_slice(&0x6000_0001u32.to_le_bytes());
    let report = render(&bytes);

    assert!(report.contains("  e_machine: 0x1234\n"));
    assert!(report.contains("    p_type: 0x60000001\n"));
}

#[test]
fn rejects_malformed_identification() {
    let mut bytes = image(false);
    bytes[0] = b'E';
    assert_eq!(
        ParsedImage::parse(bytes.as_slice()),
        Err(DecodeError::InvalidMagic(*b"EELF"))
    );

    let mut bytes = image(false);
    bytes[4] = 2;
    assert_eq!(
        ParsedImage::parse(bytes.as_slice()),
        Err(DecodeError::UnsupportedClass(Class::CLASS64))
    );
}

#[test]
fn failed_name_resolution_writes_nothing() {
    let mut bytes = image(false);
    let text_name = SECTION_HEADER_OFFSET + 40;
    bytes[text_name..text_name + 4].copy_from_slice(&100u32.to_le_bytes());
    let image = ParsedImage::parse(bytes.as_slice()).unwrap();

    let mut out = Vec::new();
    assert!(write_report(&mut out, &image, bytes.as_slice()).is_err());
    assert!(out.is_empty());
}

#[test]
fn written_report_matches_rendered_report() {
    let bytes = image(true);
    let image = ParsedImage::parse(bytes.as_slice()).unwrap();

    let mut out = Vec::new();
    write_report(&mut out, &image, bytes.as_slice()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        render_report(&image, bytes.as_slice()).unwrap()
    );
}
