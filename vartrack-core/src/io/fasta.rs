//! FASTA reference reader
//!
//! Parsing goes through needletail, which also detects gzip input on its own.

use std::path::Path;
use anyhow::Result;
use thiserror::Error;

use needletail::{parse_fastx_file, parse_fastx_reader};

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

/// FASTA parser yielding `(name, sequence)` pairs
pub struct FastaParser;

impl FastaParser {
    /// Parse a FASTA file (optionally gzipped)
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<(String, Vec<u8>)>> {
        let mut reader = parse_fastx_file(&path).map_err(|e| FastaError::Parse(e.to_string()))?;
        let mut sequences = Vec::new();

        while let Some(record) = reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            sequences.push((Self::record_name(record.id()), record.seq().to_vec()));
        }

        Self::non_empty(sequences)
    }

    /// Parse FASTA data from any readable source
    pub fn parse_reader<R: std::io::Read + std::marker::Send>(reader: R) -> Result<Vec<(String, Vec<u8>)>> {
        let mut fastx_reader =
            parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;
        let mut sequences = Vec::new();

        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            sequences.push((Self::record_name(record.id()), record.seq().to_vec()));
        }

        Self::non_empty(sequences)
    }

    /// The sequence name is the header up to the first whitespace.
    fn record_name(id: &[u8]) -> String {
        let header = String::from_utf8_lossy(id);
        header
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    fn non_empty(sequences: Vec<(String, Vec<u8>)>) -> Result<Vec<(String, Vec<u8>)>> {
        if sequences.is_empty() {
            Err(FastaError::EmptyFile.into())
        } else {
            log::debug!("Read {} reference sequence(s)", sequences.len());
            Ok(sequences)
        }
    }
}
