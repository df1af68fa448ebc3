//! Data model for interval translation.
//!
//! This module contains the value types that flow through the pipeline:
//! - Sequences and the ordered set loaded from FASTA
//! - Gene intervals grouped by sequence identifier
//! - Reading frames and per-interval translation results

use std::collections::HashMap;
use std::fmt;

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// The nucleotide data, as read from the file
    data: Vec<u8>,
}

impl Sequence {
    /// Creates a new sequence from string data.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into().into_bytes(),
        }
    }

    /// Creates a new sequence from raw bytes.
    pub fn from_bytes(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self { id: id.into(), data }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw sequence bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the half-open window `[start, end)`.
    ///
    /// Both bounds are clamped to the sequence length and an inverted window
    /// is empty, so this never panics.
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        let end = end.min(self.data.len());
        let start = start.min(end);
        &self.data[start..end]
    }
}

/// Sequences keyed by identifier, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct SequenceSet {
    sequences: Vec<Sequence>,
    index: HashMap<String, usize>,
}

impl SequenceSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sequence.
    ///
    /// A record whose identifier is already present replaces the earlier one
    /// in place; the replaced record is returned.
    pub fn insert(&mut self, sequence: Sequence) -> Option<Sequence> {
        match self.index.get(&sequence.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.sequences[pos], sequence)),
            None => {
                self.index.insert(sequence.id.clone(), self.sequences.len());
                self.sequences.push(sequence);
                None
            }
        }
    }

    /// Looks up a sequence by identifier.
    pub fn get(&self, id: &str) -> Option<&Sequence> {
        self.index.get(id).map(|&pos| &self.sequences[pos])
    }

    /// Returns true if a sequence with this identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates over sequences in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }

    /// Returns the number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if the set holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl FromIterator<Sequence> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = Sequence>>(iter: I) -> Self {
        let mut set = Self::new();
        for sequence in iter {
            set.insert(sequence);
        }
        set
    }
}

/// A gene body on a contig, as zero-based half-open offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneInterval {
    pub start: usize,
    pub end: usize,
    pub gene_id: String,
}

impl GeneInterval {
    pub fn new(start: usize, end: usize, gene_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            gene_id: gene_id.into(),
        }
    }
}

/// Gene intervals grouped by the sequence they lie on.
///
/// Both the sequence identifiers and the intervals under each identifier
/// keep the order in which they were added.
#[derive(Debug, Clone, Default)]
pub struct IntervalTable {
    order: Vec<String>,
    by_sequence: HashMap<String, Vec<GeneInterval>>,
}

impl IntervalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval to the list for `seq_id`.
    pub fn push(&mut self, seq_id: impl Into<String>, interval: GeneInterval) {
        let seq_id = seq_id.into();
        if !self.by_sequence.contains_key(&seq_id) {
            self.order.push(seq_id.clone());
        }
        self.by_sequence.entry(seq_id).or_default().push(interval);
    }

    /// Intervals on `seq_id`, empty if the identifier is unknown.
    pub fn intervals_for(&self, seq_id: &str) -> &[GeneInterval] {
        self.by_sequence
            .get(seq_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sequence identifiers in first-seen order.
    pub fn sequence_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Total number of intervals across all sequences.
    pub fn interval_count(&self) -> usize {
        self.by_sequence.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Strand a reading frame is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

/// One of the six reading frames of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadingFrame {
    pub strand: Strand,
    /// Phase offset, 0..=2
    pub offset: usize,
}

impl ReadingFrame {
    pub const fn new(strand: Strand, offset: usize) -> Self {
        Self { strand, offset }
    }

    /// All six frames in selection order: forward 0..2, then reverse 0..2.
    pub const ALL: [ReadingFrame; 6] = [
        ReadingFrame::new(Strand::Forward, 0),
        ReadingFrame::new(Strand::Forward, 1),
        ReadingFrame::new(Strand::Forward, 2),
        ReadingFrame::new(Strand::Reverse, 0),
        ReadingFrame::new(Strand::Reverse, 1),
        ReadingFrame::new(Strand::Reverse, 2),
    ];
}

impl fmt::Display for ReadingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        };
        write!(f, "{}{}", sign, self.offset + 1)
    }
}

/// The protein chosen for one gene interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub gene_id: String,
    pub seq_id: String,
    pub start: usize,
    pub end: usize,
    /// Frame the winning ORF was read from
    pub frame: ReadingFrame,
    /// Amino-acid string
    pub protein: String,
}
