//src/feature_table.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;

use crate::error::{HaPathError, Result};

/// HA2 starts (0-based) read from an NCBI five-column feature table,
/// keyed by the sequence id of each `>Feature` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    starts: AHashMap<String, usize>,
    /// Ids in the order they appear in the table.
    order: Vec<String>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// HA2 start for a table id, exactly as written after `>Feature`.
    pub fn ha2_start(&self, id: &str) -> Option<usize> {
        self.starts.get(id).copied()
    }

    /// HA2 start for a FASTA record id.
    ///
    /// Tries an exact match, then a table id with a `|`-separated field
    /// equal to `seq_id` (`gb|LC316691.1|` for `LC316691.1`). Partial
    /// matches never count, so `seq1` does not pick up `seq10`.
    pub fn ha2_start_for(&self, seq_id: &str) -> Option<usize> {
        if let Some(start) = self.ha2_start(seq_id) {
            return Some(start);
        }
        if seq_id.is_empty() {
            return None;
        }
        self.order
            .iter()
            .find(|id| id.split('|').any(|field| !field.is_empty() && field == seq_id))
            .and_then(|id| self.ha2_start(id))
    }

    fn insert(&mut self, id: &str, start: usize) {
        if !self.starts.contains_key(id) {
            self.starts.insert(id.to_string(), start);
            self.order.push(id.to_string());
        }
    }
}

/// Parse a feature table from disk.
pub fn read_feature_table<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let file = File::open(path)?;
    parse_feature_table(BufReader::new(file))
}

/// Parse a feature table in the format:
/// ```text
/// >Feature <seqid>
/// <start>\t<stop>\t<feature key>
/// \t\t\t<qualifier>\t<value>
/// ```
/// The start of the feature whose `product` qualifier begins with `HA2` is
/// kept for each `>Feature` block. Partial-coordinate markers (`<`, `>`) are
/// ignored.
pub fn parse_feature_table<R: BufRead>(reader: R) -> Result<FeatureTable> {
    let mut table = FeatureTable::default();
    let mut current_id: Option<String> = None;
    let mut in_feature = false;
    let mut start_field = String::new();

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_no = line_no + 1;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(">Feature") {
            let id = header
                .split_whitespace()
                .next()
                .ok_or_else(|| {
                    HaPathError::FeatureTable(format!("line {line_no}: feature header without an id"))
                })?;
            current_id = Some(id.to_string());
            in_feature = false;
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();

        if !line.starts_with(|c: char| c.is_whitespace()) {
            // interval line; a third column opens a new feature
            if parts.len() >= 3 && !parts[2].trim().is_empty() {
                start_field.clear();
                start_field.push_str(parts[0].trim().trim_start_matches(['<', '>']));
                in_feature = true;
            }
            continue;
        }

        let mut fields = parts.iter().map(|s| s.trim()).filter(|s| !s.is_empty());
        let (Some(qualifier), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        if qualifier != "product" || !value.starts_with("HA2") {
            continue;
        }

        let Some(id) = current_id.as_deref().filter(|_| in_feature) else {
            return Err(HaPathError::FeatureTable(format!(
                "line {line_no}: HA2 product outside a feature"
            )));
        };
        let start: usize = start_field.parse().map_err(|_| {
            HaPathError::FeatureTable(format!("line {line_no}: bad HA2 start '{start_field}'"))
        })?;
        if start == 0 {
            return Err(HaPathError::FeatureTable(format!(
                "line {line_no}: HA2 start must be 1-based"
            )));
        }
        table.insert(id, start - 1);
    }

    log::info!("feature table: {} HA2 entries", table.len());
    Ok(table)
}
