//! orfseek - translate the longest ORF of each gene interval.
//!
//! ## Usage
//!
//! ```bash
//! orfseek -c code.tsv -i intervals.tsv -s contigs.fasta
//! orfseek -c code.tsv -i intervals.tsv -s contigs.fasta -o - --skip-failures
//! ```
//!
//! Proteins are written to `genes.fasta` unless `-o/--output` says otherwise.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info, LevelFilter};

use orfseek::controller::{run, OutputTarget, RunConfig, DEFAULT_OUTPUT};
use orfseek::formats::InputPaths;
use orfseek::translate::FailurePolicy;

/// orfseek - longest six-frame ORF translation for gene intervals
///
/// For every interval, reads the window in all six reading frames, keeps
/// ORFs that run from a start codon (ATG) up to a stop codon, and writes the
/// longest translated ORF as a FASTA record named after the gene.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Genetic code table (TSV with header: codon, amino acid; '*' marks stops)
    #[arg(short = 'c', long = "code")]
    code: PathBuf,

    /// Gene intervals (TSV with header: sequence id, start, end, gene id)
    #[arg(short = 'i', long = "intervals")]
    intervals: PathBuf,

    /// Contig sequences (FASTA)
    #[arg(short = 's', long = "sequences")]
    sequences: PathBuf,

    /// Output FASTA file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Skip intervals that cannot be translated instead of aborting the run
    #[arg(long = "skip-failures")]
    skip_failures: bool,

    /// Add the source window and reading frame to each output header
    #[arg(long = "annotate")]
    annotate: bool,

    /// Worker threads for translation (default: all cores)
    #[arg(short = 'j', long = "threads")]
    threads: Option<usize>,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn run_config(&self) -> RunConfig {
        RunConfig {
            inputs: InputPaths {
                code: self.code.clone(),
                intervals: self.intervals.clone(),
                sequences: self.sequences.clone(),
            },
            output: OutputTarget::parse(&self.output),
            policy: if self.skip_failures {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
            annotate: self.annotate,
        }
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[cfg(feature = "parallel")]
fn init_threads(threads: Option<usize>) -> Result<()> {
    if let Some(threads) = threads {
        if threads == 0 {
            anyhow::bail!("Thread count must be at least 1");
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn init_threads(threads: Option<usize>) -> Result<()> {
    if threads.is_some() {
        log::warn!("Built without the 'parallel' feature; --threads is ignored");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level());
    init_threads(args.threads)?;

    let summary = run(&args.run_config())?;

    for failure in &summary.skipped {
        error!("Not translated: {}", failure);
    }
    info!(
        "Done. {} proteins written, {} intervals skipped.",
        summary.written,
        summary.skipped.len()
    );
    Ok(())
}
