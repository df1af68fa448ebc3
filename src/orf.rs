//! Open reading frame discovery.
//!
//! A window is read in three phases on each strand. Within one frame, the
//! codon stream is cut at every stop codon; each piece that was closed by a
//! stop and contains a start codon becomes a candidate ORF, beginning at its
//! first start codon. The stop codon itself is never part of an ORF, and the
//! tail of a frame that never reaches a stop is not a candidate.

use thiserror::Error;

use crate::genetic_code::{Codon, StopCodons, START_CODONS};

/// A byte outside `{A, C, G, T}` was found while complementing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported base '{}' at window offset {position}", base_char(.base))]
pub struct UnsupportedBase {
    pub base: u8,
    /// Offset in the window that was complemented
    pub position: usize,
}

fn base_char(base: &u8) -> String {
    base.escape_ascii().to_string()
}

/// Splits a window into its three reading frames.
///
/// Frame `p` holds the triplets starting at `p, p + 3, p + 6, ...` that fit
/// entirely inside the window, so it has `(len - p) / 3` codons. Trailing
/// partial codons are dropped.
pub fn reading_frames(seq: &[u8]) -> [Vec<Codon>; 3] {
    [0, 1, 2].map(|offset| {
        seq.windows(3)
            .skip(offset)
            .step_by(3)
            .map(|w| [w[0], w[1], w[2]])
            .collect()
    })
}

/// Returns the reverse complement of `seq`.
///
/// Only uppercase `A`, `C`, `G` and `T` are accepted.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>, UnsupportedBase> {
    seq.iter()
        .enumerate()
        .rev()
        .map(|(position, &base)| match base {
            b'A' => Ok(b'T'),
            b'T' => Ok(b'A'),
            b'C' => Ok(b'G'),
            b'G' => Ok(b'C'),
            _ => Err(UnsupportedBase { base, position }),
        })
        .collect()
}

/// Cuts a frame at its stop codons.
///
/// Every run that ends at a stop codon is returned, including empty ones.
/// The codons after the last stop are discarded.
pub fn stop_delimited_runs<'a>(frame: &'a [Codon], stops: &StopCodons) -> Vec<&'a [Codon]> {
    let mut runs: Vec<&[Codon]> = frame.split(|codon| stops.contains(codon)).collect();
    // `split` always yields one more piece than there are stops; the last is unterminated
    runs.pop();
    runs
}

/// Drops the codons before the first start codon, or the whole run if it has none.
pub fn trim_to_start(run: &[Codon]) -> Option<&[Codon]> {
    run.iter()
        .position(|codon| START_CODONS.contains(codon))
        .map(|first| &run[first..])
}

/// Start-trimmed, stop-delimited candidate ORFs of one frame, left to right.
pub fn candidate_orfs<'a>(frame: &'a [Codon], stops: &StopCodons) -> Vec<&'a [Codon]> {
    stop_delimited_runs(frame, stops)
        .into_iter()
        .filter_map(trim_to_start)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic_code::{standard_code, GeneticCode};
    use proptest::prelude::*;

    fn stops(codons: &[&[u8; 3]]) -> StopCodons {
        let code: GeneticCode = codons.iter().map(|&&c| (c, '*')).collect();
        code.stop_codons()
    }

    fn codons(list: &[&[u8; 3]]) -> Vec<Codon> {
        list.iter().map(|&&c| c).collect()
    }

    #[test]
    fn test_reading_frames_split_by_phase() {
        let [f0, f1, f2] = reading_frames(b"AATGTTTTAG");
        assert_eq!(f0, codons(&[b"AAT", b"GTT", b"TTA"]));
        assert_eq!(f1, codons(&[b"ATG", b"TTT", b"TAG"]));
        assert_eq!(f2, codons(&[b"TGT", b"TTT"]));
    }

    #[test]
    fn test_reading_frame_lengths() {
        for len in 0..20usize {
            let seq = vec![b'A'; len];
            let frames = reading_frames(&seq);
            for (offset, frame) in frames.iter().enumerate() {
                assert_eq!(frame.len(), len.saturating_sub(offset) / 3, "len={len} offset={offset}");
            }
        }
    }

    #[test]
    fn test_reading_frames_match_direct_slicing() {
        let seq = b"ACGTTGCAGGTACCATGAC";
        let frames = reading_frames(seq);
        for (offset, frame) in frames.iter().enumerate() {
            let direct: Vec<Codon> = seq[offset..]
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect();
            assert_eq!(frame, &direct);
        }
    }

    #[test]
    fn test_short_window_has_empty_frames() {
        let frames = reading_frames(b"AT");
        assert!(frames.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"ATGC").unwrap(), b"GCAT");
        assert_eq!(reverse_complement(b"ATGAAATAA").unwrap(), b"TTATTTCAT");
        assert_eq!(reverse_complement(b"").unwrap(), b"");
    }

    #[test]
    fn test_reverse_complement_rejects_unknown_bases() {
        let err = reverse_complement(b"ACNGT").unwrap_err();
        assert_eq!(err, UnsupportedBase { base: b'N', position: 2 });
        assert_eq!(err.to_string(), "unsupported base 'N' at window offset 2");

        assert!(reverse_complement(b"acgt").is_err());
    }

    #[test]
    fn test_non_ascii_base_is_escaped() {
        let err = reverse_complement(&[b'A', 0xC3, b'T']).unwrap_err();
        assert_eq!(err, UnsupportedBase { base: 0xC3, position: 1 });
        assert_eq!(err.to_string(), "unsupported base '\\xc3' at window offset 1");
    }

    #[test]
    fn test_runs_need_a_closing_stop() {
        let frame = codons(&[b"ATG", b"AAA", b"TAA", b"ATG", b"CCC"]);
        let runs = stop_delimited_runs(&frame, &stops(&[b"TAA"]));
        assert_eq!(runs, vec![&frame[0..2]]);
    }

    #[test]
    fn test_frame_without_stop_has_no_runs() {
        let frame = codons(&[b"ATG", b"AAA", b"CCC"]);
        assert!(stop_delimited_runs(&frame, &stops(&[b"TAA"])).is_empty());
        assert!(stop_delimited_runs(&[], &stops(&[b"TAA"])).is_empty());
    }

    #[test]
    fn test_consecutive_stops_give_empty_runs() {
        let frame = codons(&[b"TAA", b"TAG", b"ATG", b"TAA"]);
        let runs = stop_delimited_runs(&frame, &stops(&[b"TAA", b"TAG"]));
        assert_eq!(runs.len(), 3);
        assert!(runs[0].is_empty());
        assert!(runs[1].is_empty());
        assert_eq!(runs[2], &codons(&[b"ATG"])[..]);
    }

    #[test]
    fn test_trim_to_start() {
        let run = codons(&[b"AAA", b"ATG", b"CCC"]);
        assert_eq!(trim_to_start(&run), Some(&run[1..]));

        let run = codons(&[b"AAA", b"CCC"]);
        assert_eq!(trim_to_start(&run), None);
        assert_eq!(trim_to_start(&[]), None);
    }

    #[test]
    fn test_trim_keeps_later_start_codons() {
        let run = codons(&[b"CCC", b"ATG", b"AAA", b"ATG"]);
        assert_eq!(trim_to_start(&run).unwrap().len(), 3);
    }

    #[test]
    fn test_candidate_orfs() {
        let frame = codons(&[
            b"CCC", b"ATG", b"AAA", b"TAA", // trimmed to ATG AAA
            b"GGG", b"TGA", // no start codon
            b"TAG", // empty run
            b"ATG", b"TTT", b"TAA", // ATG TTT
            b"ATG", b"CCC", // unterminated
        ]);
        let stops = standard_code().stop_codons();
        let orfs = candidate_orfs(&frame, &stops);
        assert_eq!(orfs, vec![&frame[1..3], &frame[7..9]]);
    }

    proptest! {
        #[test]
        fn reverse_complement_is_an_involution(
            seq in prop::collection::vec(prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')], 0..200),
        ) {
            let rc = reverse_complement(&seq).unwrap();
            prop_assert_eq!(rc.len(), seq.len());
            prop_assert_eq!(reverse_complement(&rc).unwrap(), seq);
        }
    }
}
