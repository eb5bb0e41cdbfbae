//! File readers for vartrack sources
//!
//! VCF records become [`Variant`](crate::types::Variant)s; FASTA records become
//! named reference sequences. Both accept plain or gzip-compressed input.

pub mod fasta;
pub mod vcf;

pub use fasta::{FastaError, FastaParser};
pub use vcf::{VcfError, VcfParser};
