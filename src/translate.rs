//src/translate.rs

use crate::error::{HaPathError, Result};

/// Residue emitted for any codon holding a base outside `ACGT`/`U`.
pub const UNKNOWN_RESIDUE: u8 = b'X';

// Codon order: AAA, AAC, AAG, AAT, ACA, ... TTT (A=0, C=1, G=2, T=3)
const STANDARD_CODE: [u8; 64] = *b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

#[inline]
fn encode_base_2bit(b: u8) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

/// True for every IUPAC nucleotide code (either case), `U` and `X` included.
#[inline]
pub fn is_nucleotide(b: u8) -> bool {
    matches!(
        b.to_ascii_uppercase(),
        b'A' | b'C' | b'G' | b'T' | b'U' | b'N' | b'R' | b'Y' | b'K' | b'M'
            | b'S' | b'W' | b'B' | b'D' | b'H' | b'V' | b'X'
    )
}

/// Rejects empty input and anything outside the IUPAC nucleotide alphabet.
pub fn validate_sequence(seq: &[u8]) -> Result<()> {
    if seq.is_empty() {
        return Err(HaPathError::EmptySequence);
    }
    if let Some(index) = seq.iter().position(|&b| !is_nucleotide(b)) {
        return Err(HaPathError::InvalidBase {
            byte: seq[index],
            index,
        });
    }
    Ok(())
}

/// Translate one codon with the standard genetic code.
#[inline]
pub fn translate_codon(codon: &[u8]) -> u8 {
    match codon {
        [b1, b2, b3] => match (encode_base_2bit(*b1), encode_base_2bit(*b2), encode_base_2bit(*b3)) {
            (Some(x), Some(y), Some(z)) => STANDARD_CODE[x * 16 + y * 4 + z],
            _ => UNKNOWN_RESIDUE,
        },
        _ => UNKNOWN_RESIDUE,
    }
}

/// Amino acids produced by [`translate`], plus whether the input ran out first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub residues: String,
    pub truncated: bool,
}

impl Translation {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Translate `codon_count` codons starting at `start`.
///
/// Stops early (and sets `truncated`) instead of reading past the end of
/// `seq`; a trailing partial codon is dropped.
pub fn translate(seq: &[u8], start: usize, codon_count: usize) -> Translation {
    let available = seq.len().saturating_sub(start) / 3;
    let n = available.min(codon_count);

    let mut residues = String::with_capacity(n);
    for codon in seq[start.min(seq.len())..].chunks_exact(3).take(n) {
        residues.push(translate_codon(codon) as char);
    }

    Translation {
        residues,
        truncated: n < codon_count,
    }
}

/// Translate everything from `frame` (0, 1 or 2) to the last full codon.
pub fn translate_frame(seq: &[u8], frame: usize) -> Vec<u8> {
    if frame >= seq.len() {
        return Vec::new();
    }
    seq[frame..].chunks_exact(3).map(translate_codon).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_full_codons() {
        let t = translate(b"ATGGCCTGGTAA", 0, 4);
        assert_eq!(t.residues, "MAW*");
        assert!(!t.truncated);
    }

    #[test]
    fn case_and_uracil_insensitive() {
        let upper = translate(b"AGAAAGCGTTTC", 0, 4);
        let lower = translate(b"agaaagcguuuc", 0, 4);
        assert_eq!(upper, lower);
        assert_eq!(upper.residues, "RKRF");
    }

    #[test]
    fn ambiguous_codon_is_unknown() {
        let t = translate(b"ATGNNNGCRTGG", 0, 4);
        assert_eq!(t.residues, "MXXW");
    }

    #[test]
    fn drops_partial_codon_and_flags_truncation() {
        let t = translate(b"ATGGCCTG", 0, 3);
        assert_eq!(t.residues, "MA");
        assert!(t.truncated);

        let past_end = translate(b"ATG", 10, 2);
        assert!(past_end.is_empty());
        assert!(past_end.truncated);
    }

    #[test]
    fn every_length_multiple_of_three_yields_a_residue_per_codon() {
        let seq = b"ACGTTGCAAGGCTTACCGATGACT";
        for len in (0..=seq.len()).step_by(3) {
            let t = translate(&seq[..len], 0, len / 3);
            assert_eq!(t.len(), len / 3);
            assert!(!t.truncated);
        }
    }

    #[test]
    fn frames_shift_the_reading() {
        let seq = b"AATGGCC";
        assert_eq!(translate_frame(seq, 0), b"NG".to_vec());
        assert_eq!(translate_frame(seq, 1), b"MA".to_vec());
        assert_eq!(translate_frame(seq, 2), b"W".to_vec());
        assert!(translate_frame(seq, 9).is_empty());
    }

    #[test]
    fn validation_rejects_bad_alphabet() {
        assert!(validate_sequence(b"ACGTNRYKM").is_ok());
        assert!(matches!(validate_sequence(b""), Err(HaPathError::EmptySequence)));
        assert!(matches!(
            validate_sequence(b"ACG7T"),
            Err(HaPathError::InvalidBase { byte: b'7', index: 3 })
        ));
    }

    #[test]
    fn non_ascii_byte_is_escaped_in_message() {
        let err = validate_sequence("ACGé".as_bytes()).unwrap_err();
        assert!(matches!(err, HaPathError::InvalidBase { byte: 0xC3, index: 3 }));
        assert_eq!(err.to_string(), "invalid nucleotide '\\xc3' at index 3");
    }
}
