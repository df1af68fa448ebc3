//! Six-frame ORF selection and batch translation.
//!
//! For each gene interval the window is read in all six frames, every
//! candidate ORF is translated, and the longest protein wins. Ties go to the
//! candidate seen first: forward frames before reverse, lower offsets first,
//! leftmost run first.

use log::{debug, info, warn};
use thiserror::Error;

use crate::genetic_code::{CodonNotFound, GeneticCode, StopCodons};
use crate::model::{GeneInterval, IntervalTable, ReadingFrame, Sequence, SequenceSet, Strand, Translation};
use crate::orf::{candidate_orfs, reading_frames, reverse_complement, UnsupportedBase};

/// Errors that end the translation of one interval.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error(transparent)]
    UnsupportedBase(#[from] UnsupportedBase),

    #[error(transparent)]
    CodonNotFound(#[from] CodonNotFound),

    #[error("no start/stop delimited ORF in any of the six frames")]
    NoCandidate,
}

/// An interval that could not be translated, with where it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("gene {gene_id} ({seq_id}:{start}-{end}): {source}")]
pub struct IntervalFailure {
    pub seq_id: String,
    pub gene_id: String,
    pub start: usize,
    pub end: usize,
    #[source]
    pub source: TranslationError,
}

/// What to do when an interval fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole batch at the first failing interval
    #[default]
    Abort,
    /// Leave the interval out and report it
    Skip,
}

/// A translated candidate ORF and the frame it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinHit {
    pub frame: ReadingFrame,
    pub protein: String,
}

impl ProteinHit {
    /// Number of residues; every codon yields exactly one symbol.
    pub fn residues(&self) -> usize {
        self.protein.chars().count()
    }
}

/// Picks the longest hit, keeping the earliest one on ties.
pub fn select_longest<I>(hits: I) -> Option<ProteinHit>
where
    I: IntoIterator<Item = ProteinHit>,
{
    let mut best: Option<(usize, ProteinHit)> = None;
    for hit in hits {
        let len = hit.residues();
        if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
            best = Some((len, hit));
        }
    }
    best.map(|(_, hit)| hit)
}

/// Translates windows with one genetic code.
///
/// The stop codon set is derived once, when the translator is built.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    code: &'a GeneticCode,
    stops: StopCodons,
}

impl<'a> Translator<'a> {
    pub fn new(code: &'a GeneticCode) -> Self {
        Self {
            code,
            stops: code.stop_codons(),
        }
    }

    pub fn stop_codons(&self) -> &StopCodons {
        &self.stops
    }

    /// Translates every candidate ORF of `window`, in frame order.
    ///
    /// A single untranslatable candidate fails the whole window.
    pub fn six_frame_candidates(&self, window: &[u8]) -> Result<Vec<ProteinHit>, TranslationError> {
        let reverse = reverse_complement(window)?;
        let [f0, f1, f2] = reading_frames(window);
        let [r0, r1, r2] = reading_frames(&reverse);
        let frames = [f0, f1, f2, r0, r1, r2];

        let mut hits = Vec::new();
        for (frame, codons) in ReadingFrame::ALL.iter().zip(&frames) {
            for orf in candidate_orfs(codons, &self.stops) {
                hits.push(ProteinHit {
                    frame: *frame,
                    protein: self.code.translate_orf(orf)?,
                });
            }
        }
        Ok(hits)
    }

    /// The longest protein encoded anywhere in `window`.
    pub fn longest_protein(&self, window: &[u8]) -> Result<ProteinHit, TranslationError> {
        select_longest(self.six_frame_candidates(window)?).ok_or(TranslationError::NoCandidate)
    }

    /// Translates one gene interval of `contig`.
    pub fn translate_interval(
        &self,
        contig: &Sequence,
        interval: &GeneInterval,
    ) -> Result<Translation, IntervalFailure> {
        let window = contig.slice(interval.start, interval.end);
        let hit = self.longest_protein(window).map_err(|source| IntervalFailure {
            seq_id: contig.id.clone(),
            gene_id: interval.gene_id.clone(),
            start: interval.start,
            end: interval.end,
            source,
        })?;
        debug!(
            "{} ({}:{}-{}): {} residues in frame {}",
            interval.gene_id,
            contig.id,
            interval.start,
            interval.end,
            hit.residues(),
            hit.frame
        );
        Ok(Translation {
            gene_id: interval.gene_id.clone(),
            seq_id: contig.id.clone(),
            start: interval.start,
            end: interval.end,
            frame: hit.frame,
            protein: hit.protein,
        })
    }
}

/// Outcome of a batch translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    /// One entry per translated interval, sorted by gene id
    pub translations: Vec<Translation>,
    /// Intervals left out under [`FailurePolicy::Skip`], in input order
    pub skipped: Vec<IntervalFailure>,
    /// Interval sequence ids with no matching FASTA record
    pub missing_sequences: Vec<String>,
}

impl TranslationReport {
    /// Count of translated sequences on the given strand.
    pub fn strand_count(&self, strand: Strand) -> usize {
        self.translations
            .iter()
            .filter(|t| t.frame.strand == strand)
            .count()
    }
}

/// Translates every interval whose sequence is present in `sequences`.
///
/// Sequences are visited in FASTA order and intervals in table order; the
/// results are then sorted by gene id (stable, so duplicate ids keep that
/// order). Under [`FailurePolicy::Abort`] the first failure in that order is
/// returned.
pub fn translate_all(
    code: &GeneticCode,
    intervals: &IntervalTable,
    sequences: &SequenceSet,
    policy: FailurePolicy,
) -> Result<TranslationReport, IntervalFailure> {
    let translator = Translator::new(code);
    info!("Stop codons: {}", translator.stop_codons());

    let jobs: Vec<(&Sequence, &GeneInterval)> = sequences
        .iter()
        .flat_map(|seq| {
            intervals
                .intervals_for(&seq.id)
                .iter()
                .map(move |interval| (seq, interval))
        })
        .collect();

    let missing_sequences: Vec<String> = intervals
        .sequence_ids()
        .filter(|id| !sequences.contains(id))
        .map(str::to_string)
        .collect();
    for id in &missing_sequences {
        warn!(
            "Sequence {} not found in FASTA; skipping its {} interval(s)",
            id,
            intervals.intervals_for(id).len()
        );
    }

    info!("Translating {} intervals", jobs.len());
    let outcomes: Vec<Result<Translation, IntervalFailure>> =
        par_map!(jobs, |&(contig, interval)| translator.translate_interval(contig, interval));

    let mut translations = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(translation) => translations.push(translation),
            Err(failure) => match policy {
                FailurePolicy::Abort => return Err(failure),
                FailurePolicy::Skip => {
                    warn!("Skipping {}", failure);
                    skipped.push(failure);
                }
            },
        }
    }

    translations.sort_by(|a, b| a.gene_id.cmp(&b.gene_id));

    Ok(TranslationReport {
        translations,
        skipped,
        missing_sequences,
    })
}
