//! Run controller.
//!
//! This module orchestrates one batch run:
//! - Loading the genetic code, interval table and contigs
//! - Translating every interval
//! - Writing the proteins as FASTA to a file or stdout

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::formats::fasta::write_translations;
use crate::formats::{load_inputs, InputPaths};
use crate::model::Strand;
use crate::translate::{translate_all, FailurePolicy, IntervalFailure};

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "genes.fasta";

/// Where translated proteins go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` selects stdout, anything else is a file path.
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub inputs: InputPaths,
    pub output: OutputTarget,
    pub policy: FailurePolicy,
    /// Add window and frame to each output header
    pub annotate: bool,
}

/// What a run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: Vec<IntervalFailure>,
    pub missing_sequences: Vec<String>,
}

/// Loads the inputs, translates every interval and writes the proteins.
///
/// Nothing is written if the run fails.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    info!("Reading provided information ...");
    let inputs = load_inputs(&config.inputs)?;

    info!("Translating ...");
    let report = translate_all(
        &inputs.code,
        &inputs.intervals,
        &inputs.sequences,
        config.policy,
    )
    .context("Translation aborted")?;

    info!(
        "Translated {} intervals ({} forward, {} reverse strand)",
        report.translations.len(),
        report.strand_count(Strand::Forward),
        report.strand_count(Strand::Reverse)
    );
    if !report.skipped.is_empty() {
        warn!("Skipped {} intervals that could not be translated", report.skipped.len());
    }

    match &config.output {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            write_translations(stdout.lock(), &report.translations, config.annotate)
                .context("Failed to write to stdout")?;
        }
        OutputTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_translations(BufWriter::new(file), &report.translations, config.annotate)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Output is printed to file '{}'.", path.display());
        }
    }

    Ok(RunSummary {
        written: report.translations.len(),
        skipped: report.skipped,
        missing_sequences: report.missing_sequences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_parse() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::parse("out.fa"),
            OutputTarget::File(PathBuf::from("out.fa"))
        );
        assert_eq!(
            OutputTarget::default(),
            OutputTarget::File(PathBuf::from("genes.fasta"))
        );
    }
}
