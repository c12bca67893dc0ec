//! Rendering of a [`ParsedImage`] as a line-oriented text report.
//!
//! The report has three blocks in a fixed order: the file header, the program headers, and the
//! section headers. Entries keep their file order and fields keep their on-disk order.

use core::fmt::{self, Display, Write as _};
use std::io::Write;

use anyhow::Result;
use elf::{ParsedImage, header::FileHeader, medium::BackedMedium, section_header::SectionHeaderEntry};

use crate::names::{Field, lookup, section_flag_names};

/// Width of one indentation level.
const INDENT: usize = 2;

/// Writes the report of `image` to `writer`.
///
/// `medium` must be the medium `image` was decoded from; it supplies the section names. Names are
/// resolved before anything is written, so a failure leaves `writer` untouched.
pub fn write_report<W: Write, M: BackedMedium + ?Sized>(
    writer: &mut W,
    image: &ParsedImage,
    medium: &M,
) -> Result<()> {
    let report = render_report(image, medium)?;
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Renders the report of `image` into a [`String`].
///
/// `medium` must be the medium `image` was decoded from.
pub fn render_report<M: BackedMedium + ?Sized>(image: &ParsedImage, medium: &M) -> Result<String> {
    let labels = section_labels(image, medium)?;
    log::debug!(
        "rendering {} program headers and {} section headers",
        image.program_headers().len(),
        image.section_headers().len()
    );

    let mut out = String::new();
    render_file_header(&mut out, image.header())?;

    writeln!(out, "Program Headers:")?;
    for (index, entry) in image.program_headers().iter().enumerate() {
        writeln!(out, "{:width$}Header_{index}:", "", width = INDENT)?;
        line(&mut out, 2, "p_type", enumerated(Field::SegmentType, entry.segment_type.0, 8))?;
        line(&mut out, 2, "p_offset", hex(entry.offset, 8))?;
        line(&mut out, 2, "p_vaddr", hex(entry.virtual_address, 8))?;
        line(&mut out, 2, "p_paddr", hex(entry.physical_address, 8))?;
        line(&mut out, 2, "p_filesz", hex(entry.file_size, 8))?;
        line(&mut out, 2, "p_memsz", hex(entry.memory_size, 8))?;
        line(&mut out, 2, "p_flags", enumerated(Field::SegmentFlags, entry.flags.0, 8))?;
        line(&mut out, 2, "p_align", hex(entry.alignment, 8))?;
    }

    writeln!(out, "Section Headers:")?;
    for (entry, label) in image.section_headers().iter().zip(&labels) {
        writeln!(out, "{:width$}{label}:", "", width = INDENT)?;
        render_section_header(&mut out, entry)?;
    }

    Ok(out)
}

/// Resolves the label of every section: its name, or `Section_<index>` when it has none.
fn section_labels<M: BackedMedium + ?Sized>(
    image: &ParsedImage,
    medium: &M,
) -> Result<Vec<String>> {
    let table = image.string_table(medium)?;
    if table.is_none() && !image.section_headers().is_empty() {
        log::info!("file has no section name string table");
    }

    let mut labels = Vec::with_capacity(image.section_headers().len());
    for (index, entry) in image.section_headers().iter().enumerate() {
        let name = match table {
            Some(table) => table.get(entry.name_offset)?.to_string_lossy(),
            None => "".into(),
        };

        if name.is_empty() {
            labels.push(format!("Section_{index}"));
        } else {
            labels.push(name.into_owned());
        }
    }

    Ok(labels)
}

/// Renders the file header block, including the identification bytes.
fn render_file_header(out: &mut String, header: &FileHeader) -> fmt::Result {
    let ident = &header.ident;

    writeln!(out, "ELF Header:")?;
    writeln!(out, "{:width$}e_ident:", "", width = INDENT)?;
    line(out, 2, "magic", ident.magic.escape_ascii())?;
    line(out, 2, "ei_class", enumerated(Field::Class, ident.class.0.into(), 2))?;
    line(out, 2, "ei_data", enumerated(Field::Data, ident.encoding.0.into(), 2))?;
    // EV_CURRENT is the only version the ELF specification defines.
    line(out, 2, "ei_version", "CURRENT")?;
    line(out, 2, "ei_osabi", enumerated(Field::OsAbi, ident.os_abi.0.into(), 2))?;
    writeln!(out, "{:width$}.... PADDING ....", "", width = 2 * INDENT)?;

    line(out, 1, "e_type", enumerated(Field::ElfType, header.elf_type.0.into(), 4))?;
    line(out, 1, "e_machine", enumerated(Field::Machine, header.machine.0.into(), 4))?;
    line(out, 1, "e_version", hex(header.version, 8))?;
    line(out, 1, "e_entry", hex(header.entry, 8))?;
    line(out, 1, "e_phoff", hex(header.program_header_offset, 8))?;
    line(out, 1, "e_shoff", hex(header.section_header_offset, 8))?;
    line(out, 1, "e_flags", hex(header.flags, 8))?;
    line(out, 1, "e_ehsize", hex(header.header_size.into(), 4))?;
    line(out, 1, "e_phentsize", hex(header.program_header_size.into(), 4))?;
    line(out, 1, "e_phnum", hex(header.program_header_count.into(), 4))?;
    line(out, 1, "e_shentsize", hex(header.section_header_size.into(), 4))?;
    line(out, 1, "e_shnum", hex(header.section_header_count.into(), 4))?;
    line(
        out,
        1,
        "e_shstrndx",
        hex(header.section_header_string_table_index.into(), 4),
    )
}

/// Renders the fields of one section header.
fn render_section_header(out: &mut String, entry: &SectionHeaderEntry) -> fmt::Result {
    line(out, 2, "sh_name", hex(entry.name_offset, 8))?;
    line(out, 2, "sh_type", enumerated(Field::SectionType, entry.section_type.0, 8))?;
    line(out, 2, "sh_flags", section_flags(entry.flags.0))?;
    line(out, 2, "sh_addr", hex(entry.address, 8))?;
    line(out, 2, "sh_offset", hex(entry.offset, 8))?;
    line(out, 2, "sh_size", hex(entry.size, 8))?;
    line(out, 2, "sh_link", hex(entry.link, 8))?;
    line(out, 2, "sh_info", hex(entry.info, 8))?;
    line(out, 2, "sh_addralign", hex(entry.address_alignment, 8))?;
    line(out, 2, "sh_entsize", hex(entry.entry_size, 8))
}

/// Writes `name: value` at indentation `depth`.
fn line(out: &mut String, depth: usize, name: &str, value: impl Display) -> fmt::Result {
    writeln!(out, "{:width$}{name}: {value}", "", width = depth * INDENT)
}

/// Returns the symbolic name of `value`, falling back to `digits` wide hexadecimal.
fn enumerated(field: Field, value: u32, digits: usize) -> String {
    lookup(field, value).map_or_else(|| hex(value, digits), String::from)
}

/// Formats `value` as `0x` followed by `digits` zero-padded hexadecimal digits.
fn hex(value: u32, digits: usize) -> String {
    format!("{value:#0width$x}", width = digits + 2)
}

/// Joins the names of the set bits of `flags` with `|`.
///
/// Bits without a name are appended as one hexadecimal value; no named bits at all renders the
/// raw value.
fn section_flags(flags: u32) -> String {
    let (names, unnamed) = section_flag_names(flags);
    if names.is_empty() {
        return hex(flags, 8);
    }

    let mut rendered = names.join(" | ");
    if unnamed != 0 {
        rendered.push_str(" | ");
        rendered.push_str(&hex(unnamed, 8));
    }
    rendered
}
