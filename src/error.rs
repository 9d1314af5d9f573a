//src/error.rs

use thiserror::Error;

/// Everything that can make an HA classification call fail outright.
///
/// An undeterminable cleavage site is not an error; it is reported as
/// [`crate::classify::Pathotype::Indeterminate`].
#[derive(Debug, Error)]
pub enum HaPathError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sequence is empty")]
    EmptySequence,

    /// `byte` is the raw input byte; the message shows it ASCII-escaped.
    #[error("invalid nucleotide '{}' at index {index}", std::ascii::escape_default(*byte))]
    InvalidBase { byte: u8, index: usize },

    #[error("HA2 start {position} is outside a sequence of length {len}")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("FASTA parse error: {0}")]
    Fasta(String),

    #[error("feature table: {0}")]
    FeatureTable(String),

    #[error("no HA sequence: {0}")]
    NoHaSequence(String),

    #[error("invalid locator configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HaPathError>;
