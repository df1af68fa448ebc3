//! Genetic code tables and codon translation.
//!
//! This module provides:
//! - A codon to amino acid mapping built from a user-supplied table
//! - The stop codon set derived from that mapping
//! - Strict translation of codon runs (unknown codons are errors)

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

/// A nucleotide triplet.
pub type Codon = [u8; 3];

/// Symbol the genetic code uses for stop codons.
pub const STOP_SYMBOL: char = '*';

/// Codons that initiate translation. Fixed, not taken from the code table.
pub const START_CODONS: &[Codon] = &[*b"ATG"];

/// Renders a codon for messages; bytes are shown lossily.
pub fn codon_str(codon: &Codon) -> String {
    String::from_utf8_lossy(codon).into_owned()
}

/// A codon absent from the genetic code was looked up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("codon '{}' not found in genetic code", codon_str(.codon))]
pub struct CodonNotFound {
    pub codon: Codon,
}

/// A genetic code table for translating codons to amino acids.
#[derive(Debug, Clone, Default)]
pub struct GeneticCode {
    codon_table: HashMap<Codon, char>,
}

impl GeneticCode {
    /// Creates an empty genetic code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the symbol for `codon`, returning the previous one.
    pub fn insert(&mut self, codon: Codon, symbol: char) -> Option<char> {
        self.codon_table.insert(codon, symbol)
    }

    /// Number of codons in the table.
    pub fn len(&self) -> usize {
        self.codon_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codon_table.is_empty()
    }

    /// Derives the set of codons mapped to [`STOP_SYMBOL`].
    pub fn stop_codons(&self) -> StopCodons {
        StopCodons(
            self.codon_table
                .iter()
                .filter(|&(_, &aa)| aa == STOP_SYMBOL)
                .map(|(&codon, _)| codon)
                .collect(),
        )
    }

    /// Translates a single codon to its amino acid symbol.
    pub fn translate_codon(&self, codon: &Codon) -> Result<char, CodonNotFound> {
        self.codon_table
            .get(codon)
            .copied()
            .ok_or(CodonNotFound { codon: *codon })
    }

    /// Translates a run of codons, failing on the first codon not in the table.
    pub fn translate_orf(&self, orf: &[Codon]) -> Result<String, CodonNotFound> {
        orf.iter().map(|codon| self.translate_codon(codon)).collect()
    }
}

impl FromIterator<(Codon, char)> for GeneticCode {
    fn from_iter<I: IntoIterator<Item = (Codon, char)>>(iter: I) -> Self {
        Self {
            codon_table: iter.into_iter().collect(),
        }
    }
}

/// Codons whose genetic-code symbol is the stop symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopCodons(HashSet<Codon>);

impl StopCodons {
    pub fn contains(&self, codon: &Codon) -> bool {
        self.0.contains(codon)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StopCodons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codons: Vec<String> = self.0.iter().map(codon_str).collect();
        codons.sort();
        write!(f, "{}", codons.join(","))
    }
}

/// Builds a code from an NCBI-style 64-symbol string in TCAG order.
#[cfg(test)]
pub(crate) fn from_ncbieaa(ncbieaa: &str) -> GeneticCode {
    const BASES: [u8; 4] = [b'T', b'C', b'A', b'G'];
    let mut symbols = ncbieaa.chars();
    let mut code = GeneticCode::new();
    for &b1 in &BASES {
        for &b2 in &BASES {
            for &b3 in &BASES {
                code.insert([b1, b2, b3], symbols.next().unwrap_or('X'));
            }
        }
    }
    code
}

/// The standard code (NCBI table 1), for tests.
#[cfg(test)]
pub(crate) fn standard_code() -> GeneticCode {
    from_ncbieaa("FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_code_translation() {
        let standard = standard_code();

        assert_eq!(standard.len(), 64);
        assert_eq!(standard.translate_codon(b"ATG"), Ok('M'));
        assert_eq!(standard.translate_codon(b"TAA"), Ok('*'));
        assert_eq!(standard.translate_codon(b"TTT"), Ok('F'));
        assert_eq!(standard.translate_codon(b"GGG"), Ok('G'));
    }

    #[test]
    fn test_stop_codons_are_derived() {
        let stops = standard_code().stop_codons();
        assert_eq!(stops.len(), 3);
        assert!(stops.contains(b"TAA"));
        assert!(stops.contains(b"TAG"));
        assert!(stops.contains(b"TGA"));
        assert!(!stops.contains(b"ATG"));
        assert_eq!(stops.to_string(), "TAA,TAG,TGA");
    }

    #[test]
    fn test_stop_codons_follow_table() {
        // Vertebrate mitochondrial: TGA is Trp, AGA/AGG are stops
        let mito = from_ncbieaa("FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG");
        let stops = mito.stop_codons();
        assert!(!stops.contains(b"TGA"));
        assert!(stops.contains(b"AGA"));
        assert!(stops.contains(b"AGG"));
    }

    #[test]
    fn test_translate_orf() {
        let standard = standard_code();
        let orf = [*b"ATG", *b"AAA", *b"TTT"];
        assert_eq!(standard.translate_orf(&orf).unwrap(), "MKF");
        assert_eq!(standard.translate_orf(&[]).unwrap(), "");
    }

    #[test]
    fn test_missing_codon_is_an_error() {
        let code: GeneticCode = [(*b"ATG", 'M'), (*b"TAA", '*')].into_iter().collect();
        let err = code.translate_orf(&[*b"ATG", *b"CCC"]).unwrap_err();
        assert_eq!(err.codon, *b"CCC");
        assert_eq!(err.to_string(), "codon 'CCC' not found in genetic code");
    }

    #[test]
    fn test_ambiguous_codon_is_not_substituted() {
        let standard = standard_code();
        assert!(standard.translate_codon(b"ATN").is_err());
        assert!(standard.translate_codon(b"atg").is_err());
    }

    #[test]
    fn test_insert_replaces() {
        let mut code = GeneticCode::new();
        assert_eq!(code.insert(*b"TGA", '*'), None);
        assert_eq!(code.insert(*b"TGA", 'W'), Some('*'));
        assert!(code.stop_codons().is_empty());
    }
}
