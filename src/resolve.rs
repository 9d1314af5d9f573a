//src/resolve.rs

use crate::error::{HaPathError, Result};
use crate::locate::{locate, LocatedSite, LocatorConfig};

/// Where a cleavage position came from. Exactly one source wins per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleavageSource {
    /// Supplied by the caller.
    Explicit(usize),
    /// Read from a feature table.
    TableDerived(usize),
    /// Inferred by the locator.
    Located(LocatedSite),
    NotFound,
}

impl CleavageSource {
    /// 0-based first base of HA2, if any source produced one.
    pub fn position(&self) -> Option<usize> {
        match self {
            CleavageSource::Explicit(p) | CleavageSource::TableDerived(p) => Some(*p),
            CleavageSource::Located(site) => Some(site.position),
            CleavageSource::NotFound => None,
        }
    }

    /// Alignment score when the locator was used.
    pub fn score(&self) -> Option<i32> {
        match self {
            CleavageSource::Located(site) => Some(site.score),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CleavageSource::Explicit(_) => "explicit",
            CleavageSource::TableDerived(_) => "table",
            CleavageSource::Located(_) => "located",
            CleavageSource::NotFound => "none",
        }
    }
}

/// Position hints gathered by the caller before resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleavageHints {
    /// HA2 start given directly (0-based).
    pub ha2_start: Option<usize>,
    /// HA2 start found in a feature table (0-based).
    pub table_start: Option<usize>,
}

fn check_bounds(position: usize, len: usize) -> Result<usize> {
    if position >= len {
        return Err(HaPathError::PositionOutOfRange { position, len });
    }
    Ok(position)
}

/// Merge the hints into one cleavage position.
///
/// Explicit beats table, table beats the locator. Supplied positions are
/// only bounds-checked.
///
/// # Errors
///
/// [`HaPathError::PositionOutOfRange`] when the winning hint does not fall
/// inside `seq`.
pub fn resolve(seq: &[u8], hints: &CleavageHints, config: &LocatorConfig) -> Result<CleavageSource> {
    if let Some(position) = hints.ha2_start {
        return Ok(CleavageSource::Explicit(check_bounds(position, seq.len())?));
    }
    if let Some(position) = hints.table_start {
        return Ok(CleavageSource::TableDerived(check_bounds(position, seq.len())?));
    }

    Ok(match locate(seq, config) {
        Some(site) => CleavageSource::Located(site),
        None => CleavageSource::NotFound,
    })
}
