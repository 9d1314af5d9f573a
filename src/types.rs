//src/types.rs

use std::fmt;

use crate::classify::{HaVerdict, Pathotype};

const NA: &str = "NA";

/// One FASTA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaRecord {
    /// First word of the header, without '>'.
    pub id: String,
    pub header_line: String,
    pub seq: String,
}

/// A structured representation of one line of the pathotype report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathotypeRow {
    pub id: String,
    pub verdict: HaVerdict,
}

impl fmt::Display for PathotypeRow {
    /// One tab-separated report line; HA2 start is written 1-based.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = &self.verdict.source;
        let ha2_start = source
            .position()
            .map(|p| (p + 1).to_string())
            .unwrap_or_else(|| NA.to_string());
        let score = source
            .score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| NA.to_string());

        let flag = |set: bool| if set { "true" } else { "false" };
        let (aromatic, p2_aromatic, motif, note) = match &self.verdict.pathotype {
            Pathotype::Called(result) => (
                flag(result.has_aromatic_co_marker),
                flag(result.has_p2_aromatic),
                result.motif.as_str(),
                NA,
            ),
            Pathotype::Indeterminate(reason) => (NA, NA, NA, reason.label()),
        };

        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.id,
            self.verdict.pathotype.label(),
            aromatic,
            p2_aromatic,
            motif,
            ha2_start,
            source.label(),
            score,
            note
        )
    }
}
