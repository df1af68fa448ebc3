//! Input and output formats.
//!
//! - FASTA for contigs (input) and proteins (output)
//! - Tab-separated genetic code and gene interval tables
//!
//! [`load_inputs`] reads all three inputs up front; nothing is streamed.

pub mod fasta;
pub mod table;

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::genetic_code::GeneticCode;
use crate::model::{IntervalTable, SequenceSet};

/// Errors that can occur while loading the inputs.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("genetic code {}: {source}", .path.display())]
    GeneticCode {
        path: PathBuf,
        #[source]
        source: table::TableError,
    },

    #[error("intervals {}: {source}", .path.display())]
    Intervals {
        path: PathBuf,
        #[source]
        source: table::TableError,
    },

    #[error("sequences {}: {source}", .path.display())]
    Sequences {
        path: PathBuf,
        #[source]
        source: fasta::FastaError,
    },

    #[error("genetic code {} defines no codons", .0.display())]
    EmptyGeneticCode(PathBuf),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Locations of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub code: PathBuf,
    pub intervals: PathBuf,
    pub sequences: PathBuf,
}

/// Everything a translation run needs, fully loaded.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub code: GeneticCode,
    pub intervals: IntervalTable,
    pub sequences: SequenceSet,
}

pub fn load_genetic_code(path: &Path) -> ParseResult<GeneticCode> {
    let code = table::read_genetic_code_file(path).map_err(|source| ParseError::GeneticCode {
        path: path.to_path_buf(),
        source,
    })?;
    if code.is_empty() {
        return Err(ParseError::EmptyGeneticCode(path.to_path_buf()));
    }
    Ok(code)
}

pub fn load_intervals(path: &Path) -> ParseResult<IntervalTable> {
    table::read_intervals_file(path).map_err(|source| ParseError::Intervals {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_sequences(path: &Path) -> ParseResult<SequenceSet> {
    fasta::parse_fasta_file(path).map_err(|source| ParseError::Sequences {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the genetic code, interval table and sequences, in that order.
pub fn load_inputs(paths: &InputPaths) -> ParseResult<Inputs> {
    let code = load_genetic_code(&paths.code)?;
    info!("Read {} codons from {}", code.len(), paths.code.display());

    let intervals = load_intervals(&paths.intervals)?;
    info!(
        "Read {} intervals on {} sequences from {}",
        intervals.interval_count(),
        intervals.sequence_ids().count(),
        paths.intervals.display()
    );

    let sequences = load_sequences(&paths.sequences)?;
    info!(
        "Read {} sequences from {}",
        sequences.len(),
        paths.sequences.display()
    );

    Ok(Inputs {
        code,
        intervals,
        sequences,
    })
}
