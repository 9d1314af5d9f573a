//src/fasta.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use needletail::parse_fastx_reader;

use crate::error::{HaPathError, Result};
use crate::types::HaRecord;

/// Read every record of a FASTA file; `.gz` files are decompressed on the fly.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<HaRecord>> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn Read + Send> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    parse_fasta(reader)
}

/// Parse multi-line FASTA. Line breaks and any other whitespace inside the
/// sequence are dropped; the id is the first word of the header.
pub fn parse_fasta<R: Read + Send>(reader: R) -> Result<Vec<HaRecord>> {
    let mut reader = parse_fastx_reader(reader).map_err(|e| HaPathError::Fasta(e.to_string()))?;

    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| HaPathError::Fasta(e.to_string()))?;

        let header_line = String::from_utf8_lossy(record.id()).trim().to_string();
        let id = header_line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let seq = record
            .seq()
            .iter()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|&b| b as char)
            .collect();

        records.push(HaRecord {
            id,
            header_line,
            seq,
        });
    }

    Ok(records)
}

/// Pick the HA segment: the first record whose header mentions `HA`,
/// otherwise the only record.
pub fn select_ha_record(records: &[HaRecord]) -> Result<&HaRecord> {
    if let Some(record) = records.iter().find(|r| r.header_line.contains("HA")) {
        return Ok(record);
    }
    match records {
        [only] => Ok(only),
        [] => Err(HaPathError::NoHaSequence("no FASTA records".into())),
        _ => Err(HaPathError::NoHaSequence(format!(
            "{} records and none has 'HA' in its header",
            records.len()
        ))),
    }
}
