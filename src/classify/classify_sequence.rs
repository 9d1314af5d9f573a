use crate::error::Result;
use crate::locate::LocatorConfig;
use crate::resolve::{resolve, CleavageHints, CleavageSource};
use crate::translate::{translate, validate_sequence};

/// Cleavage-site positions P1..P6.
pub const P_SITES: usize = 6;

/// P1..P6 plus the aromatic co-marker codon upstream of P6.
pub const WINDOW_CODONS: usize = P_SITES + 1;

/// Bases that must precede the cleavage site for a complete window.
pub const WINDOW_BASES: usize = WINDOW_CODONS * 3;

/// The verdict for a fully translated cleavage window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub is_high_pathogenic: bool,
    /// Phe or Trp one codon upstream of P6.
    pub has_aromatic_co_marker: bool,
    /// Phe, Tyr or Trp at P2. Reported alongside, never part of the verdict.
    pub has_p2_aromatic: bool,
    /// P1 to P6, cleavage-adjacent residue first.
    pub motif: String,
}

/// Why no verdict could be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndeterminateReason {
    /// No cleavage position from any source.
    NotFound,
    /// Fewer than [`WINDOW_CODONS`] codons upstream of the site.
    TruncatedWindow { available_codons: usize },
    /// The locator could not align the P1 codon; `position` is its estimate.
    MissingP1Base { position: usize },
}

impl IndeterminateReason {
    pub fn label(&self) -> &'static str {
        match self {
            IndeterminateReason::NotFound => "no_cleavage_site",
            IndeterminateReason::TruncatedWindow { .. } => "truncated_window",
            IndeterminateReason::MissingP1Base { .. } => "missing_p1_base",
        }
    }
}

/// Outcome of classifying one HA sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pathotype {
    Called(ClassificationResult),
    Indeterminate(IndeterminateReason),
}

impl Pathotype {
    /// `None` when indeterminate; never defaults to low path.
    pub fn is_high_pathogenic(&self) -> Option<bool> {
        match self {
            Pathotype::Called(result) => Some(result.is_high_pathogenic),
            Pathotype::Indeterminate(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pathotype::Called(result) if result.is_high_pathogenic => "high_path",
            Pathotype::Called(_) => "low_path",
            Pathotype::Indeterminate(_) => "indeterminate",
        }
    }
}

/// Residues around the cleavage site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleavageWindow {
    /// P1 at index 0 through P6 at index 5.
    pub p_sites: [u8; P_SITES],
    /// The residue one codon upstream of P6.
    pub co_marker: u8,
}

impl CleavageWindow {
    /// Translate the [`WINDOW_CODONS`] codons that end right before `position`.
    pub fn extract(seq: &[u8], position: usize) -> std::result::Result<Self, IndeterminateReason> {
        if position < WINDOW_BASES {
            return Err(IndeterminateReason::TruncatedWindow {
                available_codons: position / 3,
            });
        }

        let translation = translate(seq, position - WINDOW_BASES, WINDOW_CODONS);
        if translation.truncated {
            return Err(IndeterminateReason::TruncatedWindow {
                available_codons: translation.len(),
            });
        }

        // residues run upstream to downstream: marker, P6, ..., P1
        let residues = translation.residues.as_bytes();
        let mut p_sites = [0u8; P_SITES];
        for (k, site) in p_sites.iter_mut().enumerate() {
            *site = residues[P_SITES - k];
        }

        Ok(CleavageWindow {
            p_sites,
            co_marker: residues[0],
        })
    }

    /// Minimal furin site: R at P1 with R/K at P2 (R-R) or at P3 (R-X-K/R).
    pub fn is_multibasic(&self) -> bool {
        let basic = |aa: u8| matches!(aa, b'R' | b'K');
        self.p_sites[0] == b'R' && (basic(self.p_sites[1]) || basic(self.p_sites[2]))
    }

    pub fn has_aromatic_co_marker(&self) -> bool {
        matches!(self.co_marker, b'F' | b'W')
    }

    pub fn has_p2_aromatic(&self) -> bool {
        matches!(self.p_sites[1], b'F' | b'Y' | b'W')
    }

    pub fn motif(&self) -> String {
        self.p_sites.iter().map(|&aa| aa as char).collect()
    }
}

/// Classify `seq` given the first base of HA2, or `None` if it is unknown.
pub fn classify(seq: &[u8], position: Option<usize>) -> Pathotype {
    let Some(position) = position else {
        return Pathotype::Indeterminate(IndeterminateReason::NotFound);
    };

    match CleavageWindow::extract(seq, position) {
        Ok(window) => Pathotype::Called(ClassificationResult {
            is_high_pathogenic: window.is_multibasic(),
            has_aromatic_co_marker: window.has_aromatic_co_marker(),
            has_p2_aromatic: window.has_p2_aromatic(),
            motif: window.motif(),
        }),
        Err(reason) => Pathotype::Indeterminate(reason),
    }
}

/// Classify at a resolved position. A located site whose P1 codon did not
/// align is not trusted.
pub fn classify_source(seq: &[u8], source: &CleavageSource) -> Pathotype {
    match source {
        CleavageSource::Located(site) if !site.p1_aligned => {
            Pathotype::Indeterminate(IndeterminateReason::MissingP1Base {
                position: site.position,
            })
        }
        _ => classify(seq, source.position()),
    }
}

/// Resolution and classification of one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaVerdict {
    pub source: CleavageSource,
    pub pathotype: Pathotype,
}

/// Validate `seq`, resolve its cleavage site and classify it.
///
/// # Errors
///
/// Empty input, non-nucleotide characters, or a position hint outside the
/// sequence.
pub fn classify_ha(seq: &[u8], hints: &CleavageHints, config: &LocatorConfig) -> Result<HaVerdict> {
    validate_sequence(seq)?;
    let source = resolve(seq, hints, config)?;
    let pathotype = classify_source(seq, &source);
    Ok(HaVerdict { source, pathotype })
}
