//src/test_support.rs
//
// Synthetic H5 HA fragments shared by the unit tests.

/// Start of an H5 HA1 (signal peptide region).
pub const HA1_FILLER: &str = "ATGGAGAAAATAGTGCTTCTTCTTGCAATAGTCAGTCTTGTTAAAAGTGATCAGATTTGC";

/// N (P7) then P-Q-R-E-T-R, a monobasic site.
pub const LOW_PATH_SITE: &str = "AATCCTCAAAGAGAAACAAGA";

/// F (P7) then P-Q-R-E-T-R.
pub const AROMATIC_LOW_PATH_SITE: &str = "TTCCCTCAAAGAGAAACAAGA";

/// P-Q-R-E-R-R-R-K-K-R, a multibasic site.
pub const HIGH_PATH_SITE: &str = "CCTCAAAGAGAGAGAAGAAGAAAAAAGAGA";

/// G-L-F-G-A-I-A-G-F-I-E-G-G-W-Q-G-M-V-D-G-W-Y-G-Y-H-H
pub const HA2_FRAGMENT: &str =
    "GGACTATTTGGAGCAATAGCGGGTTTCATAGAAGGAGGATGGCAGGGAATGGTAGATGGTTGGTATGGGTACCACCAT";

fn assemble(site: &str) -> (String, usize) {
    let upstream = format!("{HA1_FILLER}{site}");
    let ha2_start = upstream.len();
    (format!("{upstream}{HA2_FRAGMENT}"), ha2_start)
}

/// Low-path HA and its 0-based HA2 start.
pub fn low_path_ha() -> (String, usize) {
    assemble(LOW_PATH_SITE)
}

pub fn aromatic_low_path_ha() -> (String, usize) {
    assemble(AROMATIC_LOW_PATH_SITE)
}

/// High-path HA and its 0-based HA2 start.
pub fn high_path_ha() -> (String, usize) {
    assemble(HIGH_PATH_SITE)
}

/// NCBI-style feature table placing HA2 of `high_path_ha` (1-based coordinates).
pub fn high_path_table(record_id: &str) -> String {
    let (seq, ha2_start) = high_path_ha();
    let len = seq.len();
    format!(
        ">Feature {record_id}\n\
         1\t{len}\tgene\n\
         \t\t\tgene\tHA\n\
         1\t{len}\tCDS\n\
         \t\t\tproduct\themagglutinin\n\
         \t\t\tcodon_start\t1\n\
         49\t{ha1_end}\tmat_peptide\n\
         \t\t\tproduct\tHA1\n\
         {ha2}\t{len}\tmat_peptide\n\
         \t\t\tproduct\tHA2\n",
        ha1_end = ha2_start,
        ha2 = ha2_start + 1,
    )
}
