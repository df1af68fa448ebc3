//! # orfseek - longest ORF translation for gene intervals
//!
//! Given contigs, gene intervals on those contigs and a genetic code, finds
//! for each interval the longest start/stop delimited open reading frame
//! across all six frames and translates it.
//!
//! ## Architecture
//!
//! - `model`: Sequences, intervals, reading frames and results
//! - `genetic_code`: Codon table, stop codon set and codon translation
//! - `orf`: Reading frames, reverse complement and ORF segmentation
//! - `translate`: Six-frame selection and batch translation
//! - `formats`: FASTA and tab-separated table input/output
//! - `controller`: One end-to-end run, from files to FASTA output
//!
//! ## Example
//!
//! ```
//! use orfseek::genetic_code::GeneticCode;
//! use orfseek::translate::Translator;
//!
//! let code: GeneticCode = [(*b"ATG", 'M'), (*b"AAA", 'K'), (*b"TAA", '*')]
//!     .into_iter()
//!     .collect();
//! let translator = Translator::new(&code);
//! let hit = translator.longest_protein(b"ATGAAATAA").unwrap();
//! assert_eq!(hit.protein, "MK");
//! ```

#[macro_use]
mod par;

pub mod controller;
pub mod formats;
pub mod genetic_code;
pub mod model;
pub mod orf;
pub mod translate;
