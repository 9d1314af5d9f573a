// src/lib.rs
pub mod align;
pub mod classify;
pub mod error;
pub mod fasta;
pub mod feature_table;
pub mod locate;
pub mod resolve;
pub mod translate;
pub mod types;

#[cfg(test)]
mod test_support;

use std::fmt::Write as FmtWrite;
use std::path::Path;

pub use crate::classify::{
    classify, classify_ha, ClassificationResult, ClassifyOptions, HaVerdict, IndeterminateReason,
    Pathotype,
};
pub use crate::error::{HaPathError, Result};
pub use crate::locate::{locate, locate_cleavage_site, AnchorKind, LocatedSite, LocatorConfig};
pub use crate::resolve::{resolve, CleavageHints, CleavageSource};
pub use crate::translate::{translate, Translation};

use crate::classify::classify_records::classify_record;
use crate::classify::classify_records_parallel;
use crate::fasta::{read_fasta_records, select_ha_record};
use crate::feature_table::read_feature_table;
use crate::types::{HaRecord, PathotypeRow};

pub const REPORT_HEADER: &str = "id\tpathotype\taromatic\tP2_aromatic\tP1_to_P6\tHA2_start\tsource\tscore\tnote";

/// Rows of a classification run, rendered to text on demand.
pub struct ClassificationResults {
    /// One row per classified record, in input order.
    pub rows: Vec<PathotypeRow>,
}

impl ClassificationResults {
    pub fn high_path_count(&self) -> usize {
        self.count(Some(true))
    }

    pub fn low_path_count(&self) -> usize {
        self.count(Some(false))
    }

    pub fn indeterminate_count(&self) -> usize {
        self.count(None)
    }

    fn count(&self, verdict: Option<bool>) -> usize {
        self.rows
            .iter()
            .filter(|row| row.verdict.pathotype.is_high_pathogenic() == verdict)
            .count()
    }

    /// Generate the tab-separated report, header included
    pub fn get_report(&self) -> String {
        let mut output = String::new();
        output.push_str(REPORT_HEADER);
        output.push('\n');
        for row in &self.rows {
            // writing into a String cannot fail
            let _ = writeln!(output, "{row}");
        }
        output
    }
}

/// Classify already-loaded records.
///
/// An explicit HA2 start targets a single sequence, so only the HA record is
/// classified in that case. Otherwise every record is classified in parallel.
pub fn classify_records(records: &[HaRecord], options: &ClassifyOptions) -> Result<ClassificationResults> {
    let rows = if options.ha2_start.is_some() {
        let record = select_ha_record(records)?;
        vec![classify_record(record, options)?]
    } else {
        classify_records_parallel(records, options)?
    };

    let results = ClassificationResults { rows };
    log::info!(
        "{} classified: {} high path, {} low path, {} indeterminate",
        results.rows.len(),
        results.high_path_count(),
        results.low_path_count(),
        results.indeterminate_count()
    );
    Ok(results)
}

/// Load a FASTA file (and optionally a feature table) and classify it.
///
/// `ha2_start` is 0-based; when given, the feature table is not read.
pub fn classify_fasta<P: AsRef<Path>>(
    fasta_path: P,
    table_path: Option<&Path>,
    ha2_start: Option<usize>,
    locator: LocatorConfig,
) -> Result<ClassificationResults> {
    // 1. Load sequences
    let fasta_path = fasta_path.as_ref();
    let records = read_fasta_records(fasta_path)?;
    log::info!("loaded {} records from {}", records.len(), fasta_path.display());

    // 2. Load the feature table unless a start was given
    let table = match (ha2_start, table_path) {
        (None, Some(path)) => Some(read_feature_table(path)?),
        (Some(_), Some(path)) => {
            log::warn!("HA2 start given; ignoring feature table {}", path.display());
            None
        }
        _ => None,
    };

    // 3. Classify
    let options = ClassifyOptions {
        ha2_start,
        table,
        locator,
    };
    classify_records(&records, &options)
}
