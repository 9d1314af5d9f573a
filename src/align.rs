//src/align.rs
//
// Bounded local alignment of a short anchor against a long target. Only the
// best hit and its coordinates are kept, so memory is two columns of the
// anchor length regardless of target size.

/// Substitution score between one target symbol and one anchor symbol.
pub trait PairScorer {
    fn score(&self, target: u8, anchor: u8) -> i32;
}

const NT_MATCH: i32 = 5;
const NT_MISMATCH: i32 = -4;
const NT_AMBIGUOUS: i32 = 1;
const NT_PURINE: i32 = 2;

const PURINE_MASK: u8 = 0b0101;

/// Bit set of the bases an IUPAC code stands for (A=1, C=2, G=4, T/U=8).
#[inline]
fn iupac_mask(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        b'A' => 0b0001,
        b'C' => 0b0010,
        b'G' => 0b0100,
        b'T' | b'U' => 0b1000,
        b'R' => PURINE_MASK,
        b'Y' => 0b1010,
        b'K' => 0b1100,
        b'M' => 0b0011,
        b'S' => 0b0110,
        b'W' => 0b1001,
        b'B' => 0b1110,
        b'D' => 0b1101,
        b'H' => 0b1011,
        b'V' => 0b0111,
        b'N' | b'X' => 0b1111,
        _ => 0,
    }
}

/// EDNAFULL-like nucleotide scoring where an ambiguity code never scores
/// negative against a base it can stand for.
#[derive(Debug, Clone, Copy, Default)]
pub struct IupacScorer;

impl PairScorer for IupacScorer {
    fn score(&self, target: u8, anchor: u8) -> i32 {
        let t = iupac_mask(target);
        let a = iupac_mask(anchor);
        if t == 0 || a == 0 || t & a == 0 {
            return NT_MISMATCH;
        }
        if t.count_ones() == 1 && a.count_ones() == 1 {
            return NT_MATCH;
        }
        if t == PURINE_MASK || a == PURINE_MASK {
            NT_PURINE
        } else {
            NT_AMBIGUOUS
        }
    }
}

/// Coarse amino-acid scoring: identity, same physico-chemical class, or neither.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidueScorer;

#[inline]
fn residue_class(aa: u8) -> Option<u8> {
    match aa.to_ascii_uppercase() {
        b'R' | b'K' | b'H' => Some(0),
        b'D' | b'E' => Some(1),
        b'N' | b'Q' => Some(2),
        b'S' | b'T' => Some(3),
        b'I' | b'L' | b'V' | b'M' => Some(4),
        b'F' | b'W' | b'Y' => Some(5),
        b'A' | b'G' => Some(6),
        _ => None,
    }
}

impl PairScorer for ResidueScorer {
    fn score(&self, target: u8, anchor: u8) -> i32 {
        let t = target.to_ascii_uppercase();
        let a = anchor.to_ascii_uppercase();
        if t == b'X' || a == b'X' {
            return 0;
        }
        match (residue_class(t), residue_class(a)) {
            (Some(_), Some(_)) if t == a => 5,
            (Some(x), Some(y)) if x == y => 1,
            _ => -3,
        }
    }
}

/// Coordinates of the best local alignment. Ranges are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalHit {
    pub score: i32,
    pub anchor_start: usize,
    pub anchor_end: usize,
    pub target_start: usize,
    pub target_end: usize,
}

#[derive(Clone, Copy)]
struct Cell {
    score: i32,
    start_anchor: usize,
    start_target: usize,
}

const NEG_INF: i32 = i32::MIN / 2;

impl Cell {
    fn reset(anchor: usize, target: usize) -> Self {
        Cell { score: 0, start_anchor: anchor, start_target: target }
    }

    fn closed() -> Self {
        Cell { score: NEG_INF, start_anchor: 0, start_target: 0 }
    }

    fn plus(self, delta: i32) -> Self {
        Cell { score: self.score + delta, ..self }
    }
}

/// Smith-Waterman with affine gaps (`gap_open` for the first gapped symbol,
/// `gap_extend` for each further one).
///
/// The target is scanned 5' to 3' and the maximum is only replaced by a
/// strictly better score, so among equal hits the one ending earliest in
/// the target wins. Returns `None` when nothing scores above zero.
pub fn local_align<S: PairScorer>(
    anchor: &[u8],
    target: &[u8],
    scorer: &S,
    gap_open: i32,
    gap_extend: i32,
) -> Option<LocalHit> {
    let m = anchor.len();
    if m == 0 || target.is_empty() {
        return None;
    }

    // Column j-1 and column j of H, plus the horizontal-gap column E.
    let mut h_prev: Vec<Cell> = (0..=m).map(|i| Cell::reset(i, 0)).collect();
    let mut h_cur: Vec<Cell> = h_prev.clone();
    let mut e: Vec<Cell> = vec![Cell::closed(); m + 1];

    let mut best: Option<LocalHit> = None;
    let mut best_score = 0;

    for j in 1..=target.len() {
        h_cur[0] = Cell::reset(0, j);
        let mut f = Cell::closed();

        for i in 1..=m {
            // gap in the anchor: consume target[j-1]
            let open_e = h_prev[i].plus(gap_open);
            let ext_e = e[i].plus(gap_extend);
            e[i] = if open_e.score >= ext_e.score { open_e } else { ext_e };

            // gap in the target: consume anchor[i-1]
            let open_f = h_cur[i - 1].plus(gap_open);
            let ext_f = f.plus(gap_extend);
            f = if open_f.score >= ext_f.score { open_f } else { ext_f };

            let diag = h_prev[i - 1].plus(scorer.score(target[j - 1], anchor[i - 1]));

            let mut cell = diag;
            if e[i].score > cell.score {
                cell = e[i];
            }
            if f.score > cell.score {
                cell = f;
            }
            if cell.score <= 0 {
                cell = Cell::reset(i, j);
            }
            h_cur[i] = cell;

            if cell.score > best_score {
                best_score = cell.score;
                best = Some(LocalHit {
                    score: cell.score,
                    anchor_start: cell.start_anchor,
                    anchor_end: i,
                    target_start: cell.start_target,
                    target_end: j,
                });
            }
        }

        std::mem::swap(&mut h_prev, &mut h_cur);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iupac_scores() {
        let s = IupacScorer;
        assert_eq!(s.score(b'A', b'A'), 5);
        assert_eq!(s.score(b'a', b'A'), 5);
        assert_eq!(s.score(b'U', b'T'), 5);
        assert_eq!(s.score(b'A', b'C'), -4);
        assert_eq!(s.score(b'A', b'R'), 2);
        assert_eq!(s.score(b'G', b'R'), 2);
        assert_eq!(s.score(b'C', b'R'), -4);
        assert_eq!(s.score(b'A', b'N'), 1);
        assert_eq!(s.score(b'T', b'H'), 1);
        assert_eq!(s.score(b'G', b'H'), -4);
        assert_eq!(s.score(b'-', b'A'), -4);
    }

    #[test]
    fn residue_scores() {
        let s = ResidueScorer;
        assert_eq!(s.score(b'R', b'R'), 5);
        assert_eq!(s.score(b'K', b'R'), 1);
        assert_eq!(s.score(b'G', b'F'), -3);
        assert_eq!(s.score(b'X', b'F'), 0);
        assert_eq!(s.score(b'*', b'*'), -3);
    }

    #[test]
    fn exact_anchor_is_found() {
        let hit = local_align(b"GATTACA", b"CCCCGATTACACCCC", &IupacScorer, -10, -1).unwrap();
        assert_eq!(hit.score, 35);
        assert_eq!((hit.target_start, hit.target_end), (4, 11));
        assert_eq!((hit.anchor_start, hit.anchor_end), (0, 7));
    }

    #[test]
    fn ties_prefer_earliest_target_position() {
        let hit = local_align(b"GATTACA", b"GATTACATTTGATTACA", &IupacScorer, -10, -1).unwrap();
        assert_eq!(hit.target_start, 0);
    }

    #[test]
    fn tolerates_an_insertion() {
        let anchor = b"GGACTATTTGGAGCAATAGCG";
        let target = b"TTTTGGACTATTTGGAAAGCAATAGCGTTTT";
        let hit = local_align(anchor, target, &IupacScorer, -10, -1).unwrap();
        assert_eq!(hit.anchor_start, 0);
        assert_eq!(hit.anchor_end, anchor.len());
        assert_eq!(hit.target_start, 4);
        assert_eq!(hit.score, 21 * 5 - 10 - 1);
    }

    #[test]
    fn nothing_positive_is_none() {
        assert!(local_align(b"AAAA", b"CCCCCC", &IupacScorer, -10, -1).is_none());
        assert!(local_align(b"", b"ACGT", &IupacScorer, -10, -1).is_none());
        assert!(local_align(b"ACGT", b"", &IupacScorer, -10, -1).is_none());
    }
}
