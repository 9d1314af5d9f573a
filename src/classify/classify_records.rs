use rayon::prelude::*;

use super::classify_sequence::classify_ha;
use crate::error::Result;
use crate::feature_table::FeatureTable;
use crate::locate::LocatorConfig;
use crate::resolve::CleavageHints;
use crate::types::{HaRecord, PathotypeRow};

/// Settings shared by every record of a batch.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// HA2 start (0-based) applied to every record; disables the table.
    pub ha2_start: Option<usize>,
    /// Feature table looked up by record id.
    pub table: Option<FeatureTable>,
    pub locator: LocatorConfig,
}

impl ClassifyOptions {
    fn hints_for(&self, record: &HaRecord) -> CleavageHints {
        if self.ha2_start.is_some() {
            return CleavageHints { ha2_start: self.ha2_start, table_start: None };
        }

        let table_start = self.table.as_ref().and_then(|table| {
            let start = table.ha2_start_for(&record.id);
            if start.is_none() {
                log::warn!("no HA2 entry for {} in feature table; locating by alignment", record.id);
            }
            start
        });
        CleavageHints { ha2_start: None, table_start }
    }
}

/// Classify one record.
pub fn classify_record(record: &HaRecord, options: &ClassifyOptions) -> Result<PathotypeRow> {
    let hints = options.hints_for(record);
    let verdict = classify_ha(record.seq.as_bytes(), &hints, &options.locator)?;

    log::debug!(
        "{}: {} (HA2 start {:?} from {}, score {:?})",
        record.id,
        verdict.pathotype.label(),
        verdict.source.position(),
        verdict.source.label(),
        verdict.source.score()
    );

    Ok(PathotypeRow {
        id: record.id.clone(),
        verdict,
    })
}

/// Parallel classification of many records at once.
///
/// Records are independent, so they are fanned out over the rayon pool;
/// rows come back in input order. The first invalid record aborts the batch.
pub fn classify_records_parallel(records: &[HaRecord], options: &ClassifyOptions) -> Result<Vec<PathotypeRow>> {
    records
        .par_iter()
        .map(|record| classify_record(record, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_table::parse_feature_table;
    use crate::resolve::CleavageSource;
    use crate::test_support::{high_path_ha, high_path_table, low_path_ha};
    use std::io::Cursor;

    fn record(id: &str, seq: String) -> HaRecord {
        HaRecord {
            id: id.to_string(),
            header_line: format!("{id} HA"),
            seq,
        }
    }

    #[test]
    fn batch_keeps_input_order() {
        let (low, _) = low_path_ha();
        let (high, _) = high_path_ha();
        let records: Vec<HaRecord> = (0..40)
            .map(|i| {
                let seq = if i % 2 == 0 { low.clone() } else { high.clone() };
                record(&format!("seq{i}"), seq)
            })
            .collect();

        let rows = classify_records_parallel(&records, &ClassifyOptions::default()).unwrap();
        assert_eq!(rows.len(), 40);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.id, format!("seq{i}"));
            assert_eq!(row.verdict.pathotype.is_high_pathogenic(), Some(i % 2 == 1));
        }
    }

    #[test]
    fn table_lookup_by_record_id() {
        let (high, ha2_start) = high_path_ha();
        let (low, _) = low_path_ha();
        let table = parse_feature_table(Cursor::new(high_path_table("LC316691"))).unwrap();
        let options = ClassifyOptions {
            table: Some(table),
            ..ClassifyOptions::default()
        };

        let rows = classify_records_parallel(
            &[record("LC316691", high), record("MT406777", low)],
            &options,
        )
        .unwrap();

        assert_eq!(rows[0].verdict.source, CleavageSource::TableDerived(ha2_start));
        assert_eq!(rows[0].verdict.pathotype.is_high_pathogenic(), Some(true));
        assert!(matches!(rows[1].verdict.source, CleavageSource::Located(_)));
        assert_eq!(rows[1].verdict.pathotype.is_high_pathogenic(), Some(false));
    }

    #[test]
    fn explicit_start_overrides_table() {
        let (low, ha2_start) = low_path_ha();
        let table = parse_feature_table(Cursor::new(high_path_table("MT406777"))).unwrap();
        let options = ClassifyOptions {
            ha2_start: Some(ha2_start),
            table: Some(table),
            ..ClassifyOptions::default()
        };
        let row = classify_record(&record("MT406777", low), &options).unwrap();
        assert_eq!(row.verdict.source, CleavageSource::Explicit(ha2_start));
        assert_eq!(row.verdict.pathotype.is_high_pathogenic(), Some(false));
    }

    #[test]
    fn invalid_record_fails_the_batch() {
        let (low, _) = low_path_ha();
        let records = [record("ok", low), record("bad", "ACGT1".to_string())];
        assert!(classify_records_parallel(&records, &ClassifyOptions::default()).is_err());
    }
}
