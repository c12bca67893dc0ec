//! Human-readable dumps of the file header, program headers, and section headers of 32-bit ELF
//! files.
//!
//! Decoding is done by the [`elf`] crate; this crate names the enumerated fields ([`names`]) and
//! renders the report ([`report`]).

pub mod names;
pub mod report;

pub use report::{render_report, write_report};
