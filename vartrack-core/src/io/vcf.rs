//! VCF (Variant Call Format) reader
//!
//! Only the eight fixed columns are read. Genotype columns, if present, are
//! ignored. Each ALT allele of a record becomes its own [`Variant`]; INFO
//! values with one comma-separated entry per ALT allele are split so every
//! variant carries its own `AO`, `AF`, and similar per-allele values.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use flate2::read::MultiGzDecoder;
use anyhow::{anyhow, Result};
use thiserror::Error;

use crate::types::{GenomicPos, Variant};

#[derive(Debug, Error)]
pub enum VcfError {
    #[error("Invalid VCF line: insufficient fields (expected at least 8, got {0})")]
    InsufficientFields(usize),
    #[error("Invalid position value: {0}")]
    InvalidPosition(String),
    #[error("Invalid quality value: {0}")]
    InvalidQuality(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// VCF parser for reading variant records
pub struct VcfParser;

impl VcfParser {
    /// Parse one data line into zero or more variants (none when ALT is `.`).
    pub fn parse_line(line: &str) -> Result<Vec<Variant>, VcfError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 8 {
            return Err(VcfError::InsufficientFields(fields.len()));
        }

        let contig = fields[0];
        let position = fields[1]
            .parse::<GenomicPos>()
            .map_err(|_| VcfError::InvalidPosition(fields[1].to_string()))?;
        let id = match fields[2] {
            "." | "" => None,
            id => Some(id.to_string()),
        };
        let ref_allele = fields[3];
        let quality = match fields[5] {
            "." | "" => None,
            q => Some(
                q.parse::<f64>()
                    .map_err(|_| VcfError::InvalidQuality(q.to_string()))?,
            ),
        };

        if fields[4] == "." {
            return Ok(Vec::new());
        }
        let alts: Vec<&str> = fields[4].split(',').collect();
        let info = Self::parse_info(fields[7]);

        let variants = alts
            .iter()
            .enumerate()
            .map(|(allele, alt)| Variant {
                contig: contig.to_string(),
                position,
                id: id.clone(),
                ref_allele: ref_allele.to_string(),
                alt: alt.to_string(),
                quality,
                info: Self::info_for_allele(&info, allele, alts.len()),
            })
            .collect();
        Ok(variants)
    }

    /// Parse the INFO column; flags map to an empty value.
    fn parse_info(field: &str) -> BTreeMap<String, String> {
        let mut info = BTreeMap::new();
        if field == "." {
            return info;
        }
        for entry in field.split(';').filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((key, value)) => info.insert(key.to_string(), value.to_string()),
                None => info.insert(entry.to_string(), String::new()),
            };
        }
        info
    }

    /// Select the allele's entry from values that have one entry per ALT.
    fn info_for_allele(
        info: &BTreeMap<String, String>,
        allele: usize,
        n_alts: usize,
    ) -> BTreeMap<String, String> {
        if n_alts < 2 {
            return info.clone();
        }
        info.iter()
            .map(|(key, value)| {
                let parts: Vec<&str> = value.split(',').collect();
                let chosen = if parts.len() == n_alts {
                    parts[allele].to_string()
                } else {
                    value.clone()
                };
                (key.clone(), chosen)
            })
            .collect()
    }

    /// Parse a VCF file, gzip-compressed when the name ends in `.gz`.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Variant>> {
        let file = File::open(&path)
            .map_err(|e| anyhow!("Failed to open VCF {}: {}", path.as_ref().display(), e))?;
        let path_str = path.as_ref().to_string_lossy();

        if path_str.ends_with(".gz") {
            Self::parse_reader(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Self::parse_reader(BufReader::new(file))
        }
    }

    /// Parse VCF data from any BufRead source
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Variant>> {
        let mut variants = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            // Skip meta-information, the header line, and blanks
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line) {
                Ok(parsed) => variants.extend(parsed),
                Err(e) => return Err(anyhow!("Error parsing line {}: {}", line_num + 1, e)),
            }
        }

        log::debug!("Parsed {} variant(s)", variants.len());
        Ok(variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = "##fileformat=VCFv4.1\n\
##INFO=<ID=AO,Number=A,Type=Integer,Description=\"Alternate allele observations\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
17\t7512444\tCOSM1\tC\tT\t50\tPASS\tAA=p.R175H;RO=70;AO=30;SOMATIC\n\
17\t7512450\t.\tG\tA,C\t.\tPASS\tRO=10;AO=4,6;DP=20\n\
17\t7512460\t.\tA\t.\t.\tPASS\t.\n";

    #[test]
    fn test_parse_single_allele_line() {
        let variants = VcfParser::parse_line(
            "17\t7512444\tCOSM1\tC\tT\t50\tPASS\tAA=p.R175H;RO=70;AO=30;SOMATIC",
        )
        .unwrap();
        assert_eq!(variants.len(), 1);
        let v = &variants[0];
        assert_eq!(v.contig, "17");
        assert_eq!(v.position, 7512444);
        assert_eq!(v.id.as_deref(), Some("COSM1"));
        assert_eq!(v.ref_allele, "C");
        assert_eq!(v.alt, "T");
        assert_eq!(v.quality, Some(50.0));
        assert_eq!(v.info_value("AA"), Some("p.R175H"));
        assert_eq!(v.info_value("SOMATIC"), Some(""));
        assert_eq!(v.info_number("AO"), Some(30.0));
    }

    #[test]
    fn test_multi_allelic_records_split_per_allele_values() {
        let variants =
            VcfParser::parse_line("17\t7512450\t.\tG\tA,C\t.\tPASS\tRO=10;AO=4,6;DP=20").unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].alt, "A");
        assert_eq!(variants[0].info_value("AO"), Some("4"));
        assert_eq!(variants[1].alt, "C");
        assert_eq!(variants[1].info_value("AO"), Some("6"));
        assert_eq!(variants[1].info_value("RO"), Some("10"));
        assert_eq!(variants[1].quality, None);
        assert_eq!(variants[1].id, None);
    }

    #[test]
    fn test_invalid_lines() {
        assert!(matches!(
            VcfParser::parse_line("17\t100\t.\tA"),
            Err(VcfError::InsufficientFields(4))
        ));
        assert!(matches!(
            VcfParser::parse_line("17\tx\t.\tA\tT\t.\tPASS\t."),
            Err(VcfError::InvalidPosition(_))
        ));
        assert!(matches!(
            VcfParser::parse_line("17\t100\t.\tA\tT\thigh\tPASS\t."),
            Err(VcfError::InvalidQuality(_))
        ));
    }

    #[test]
    fn test_parse_reader_skips_headers_and_no_call_alts() {
        let variants = VcfParser::parse_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(variants.len(), 3);
        assert!(variants.iter().all(|v| v.contig == "17"));
    }

    #[test]
    fn test_parse_reader_reports_line_number() {
        let data = "#header\n17\t1\t.\tA\n";
        let err = VcfParser::parse_reader(Cursor::new(data)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_gzipped_file() {
        let mut file = tempfile::Builder::new().suffix(".vcf.gz").tempfile().unwrap();
        {
            let mut encoder = GzEncoder::new(&mut file, Compression::default());
            encoder.write_all(SAMPLE.as_bytes()).unwrap();
            encoder.finish().unwrap();
        }
        let variants = VcfParser::parse_file(file.path()).unwrap();
        assert_eq!(variants.len(), 3);
    }
}
