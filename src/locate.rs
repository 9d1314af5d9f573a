//src/locate.rs

use std::fmt;
use std::str::FromStr;

use crate::align::{local_align, IupacScorer, ResidueScorer};
use crate::error::{HaPathError, Result};
use crate::translate::translate_frame;

/// HA2 consensus in IUPAC codes. The first codon is P1, HA2 begins at base 3.
pub const HA2_NT_ANCHOR: &[u8] = b"ARRGGNHTNYHNRGNGCNDWHRYNRKNYKBAT";

/// P1 followed by the conserved HA2 fusion peptide.
pub const HA2_AA_ANCHOR: &[u8] = b"RGLFGAIAGFIEGGW";

/// Bases before the HA2 start in [`HA2_NT_ANCHOR`] (the P1 codon).
const NT_ANCHOR_LEAD: usize = 3;
/// Residues before the HA2 start in [`HA2_AA_ANCHOR`].
const AA_ANCHOR_LEAD: usize = 1;

pub const DEFAULT_MIN_SCORE: i32 = 40;
pub const DEFAULT_GAP_OPEN: i32 = -10;
pub const DEFAULT_GAP_EXTEND: i32 = -1;

/// What the anchor is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorKind {
    /// IUPAC consensus against the raw bases; frame free.
    #[default]
    Nucleotide,
    /// Fusion-peptide anchor against all three forward translations.
    Protein,
}

impl FromStr for AnchorKind {
    type Err = HaPathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nt" | "nucleotide" => Ok(AnchorKind::Nucleotide),
            "aa" | "protein" => Ok(AnchorKind::Protein),
            other => Err(HaPathError::InvalidConfig(format!("unknown anchor kind '{other}'"))),
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorKind::Nucleotide => write!(f, "nucleotide"),
            AnchorKind::Protein => write!(f, "protein"),
        }
    }
}

/// Settings for [`locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorConfig {
    pub anchor: AnchorKind,
    /// Hits scoring below this are reported as not found.
    pub min_score: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorKind::Nucleotide,
            min_score: DEFAULT_MIN_SCORE,
            gap_open: DEFAULT_GAP_OPEN,
            gap_extend: DEFAULT_GAP_EXTEND,
        }
    }
}

impl LocatorConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// `min_score` must be positive and both gap penalties negative.
    pub fn new(anchor: AnchorKind, min_score: i32, gap_open: i32, gap_extend: i32) -> Result<Self> {
        if min_score <= 0 {
            return Err(HaPathError::InvalidConfig("min_score must be positive".into()));
        }
        if gap_open >= 0 || gap_extend >= 0 {
            return Err(HaPathError::InvalidConfig("gap penalties must be negative".into()));
        }
        Ok(Self { anchor, min_score, gap_open, gap_extend })
    }
}

/// A cleavage site inferred by alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedSite {
    /// First base of HA2 (0-based).
    pub position: usize,
    /// Alignment score, the match quality.
    pub score: i32,
    /// False when the P1 part of the anchor was left out of the local
    /// alignment; `position` is then only an estimate.
    pub p1_aligned: bool,
    /// Reading frame of the hit for protein anchors.
    pub frame: Option<usize>,
}

/// Find the HA1/HA2 junction in `seq` without outside hints.
///
/// Returns `None` for empty or too-short input and whenever the best hit
/// scores below `config.min_score`.
pub fn locate(seq: &[u8], config: &LocatorConfig) -> Option<LocatedSite> {
    let site = match config.anchor {
        AnchorKind::Nucleotide => locate_nucleotide(seq, config),
        AnchorKind::Protein => locate_protein(seq, config),
    }?;

    if site.position >= seq.len() {
        return None;
    }
    log::debug!(
        "{} anchor hit: HA2 start {} score {} (P1 aligned: {})",
        config.anchor,
        site.position,
        site.score,
        site.p1_aligned
    );
    Some(site)
}

/// [`locate`] with the default nucleotide anchor.
pub fn locate_cleavage_site(seq: &[u8]) -> Option<LocatedSite> {
    locate(seq, &LocatorConfig::default())
}

fn locate_nucleotide(seq: &[u8], config: &LocatorConfig) -> Option<LocatedSite> {
    let hit = local_align(HA2_NT_ANCHOR, seq, &IupacScorer, config.gap_open, config.gap_extend)?;
    if hit.score < config.min_score {
        return None;
    }

    Some(LocatedSite {
        position: (hit.target_start + NT_ANCHOR_LEAD).saturating_sub(hit.anchor_start),
        score: hit.score,
        p1_aligned: hit.anchor_start == 0,
        frame: None,
    })
}

fn locate_protein(seq: &[u8], config: &LocatorConfig) -> Option<LocatedSite> {
    let mut best: Option<LocatedSite> = None;

    for frame in 0..3 {
        let protein = translate_frame(seq, frame);
        let Some(hit) = local_align(
            HA2_AA_ANCHOR,
            &protein,
            &ResidueScorer,
            config.gap_open,
            config.gap_extend,
        ) else {
            continue;
        };
        if hit.score < config.min_score {
            continue;
        }

        let residue = (hit.target_start + AA_ANCHOR_LEAD).saturating_sub(hit.anchor_start);
        let candidate = LocatedSite {
            position: frame + 3 * residue,
            score: hit.score,
            p1_aligned: hit.anchor_start == 0,
            frame: Some(frame),
        };

        best = match best {
            Some(b) if b.score > candidate.score => Some(b),
            Some(b) if b.score == candidate.score && b.position <= candidate.position => Some(b),
            _ => Some(candidate),
        };
    }

    best
}
