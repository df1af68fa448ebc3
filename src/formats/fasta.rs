//! FASTA reading and writing.
//!
//! Contigs are read from multi-line FASTA; translated proteins are written
//! back as one header line and one sequence line per gene.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::model::{Sequence, SequenceSet, Translation};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read FASTA: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses a FASTA file into a [`SequenceSet`].
///
/// # Examples
///
/// ```no_run
/// use orfseek::formats::fasta::parse_fasta_file;
///
/// let sequences = parse_fasta_file("contigs.fasta").unwrap();
/// println!("Loaded {} sequences", sequences.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<SequenceSet> {
    let file = File::open(path)?;
    parse_fasta(BufReader::with_capacity(1024 * 1024, file))
}

/// Parses FASTA content from a reader.
///
/// Handles both single-line and multi-line sequences. The identifier is the
/// header up to the first whitespace. Records without sequence data are
/// dropped, and a repeated identifier replaces the earlier record.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<SequenceSet> {
    let mut sequences = SequenceSet::new();
    let mut current_id: Option<String> = None;
    let mut current_seq: Vec<u8> = Vec::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                push_record(&mut sequences, id, std::mem::take(&mut current_seq));
            }

            let id = header.split_whitespace().next().unwrap_or(header);
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }
            current_id = Some(id.to_string());
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }

            // Fast append: most FASTA lines don't have internal whitespace
            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                current_seq.extend_from_slice(line.as_bytes());
            } else {
                current_seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
            }
        }
    }

    if let Some(id) = current_id {
        push_record(&mut sequences, id, current_seq);
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(sequences)
}

fn push_record(sequences: &mut SequenceSet, id: String, mut data: Vec<u8>) {
    if data.is_empty() {
        warn!("FASTA record {} has no sequence data; ignoring it", id);
        return;
    }
    data.shrink_to_fit();
    if let Some(previous) = sequences.insert(Sequence::from_bytes(id, data)) {
        warn!("Duplicate FASTA record {}; keeping the later one", previous.id);
    }
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> FastaResult<SequenceSet> {
    parse_fasta(content.as_bytes())
}

/// Writes translations as FASTA, one `>gene_id` record per translation.
///
/// With `annotate`, the header also carries the source window and the frame
/// the protein was read from, e.g. `>geneA seq1:0-9 frame=+1`.
pub fn write_translations<W: Write>(
    mut writer: W,
    translations: &[Translation],
    annotate: bool,
) -> std::io::Result<()> {
    for t in translations {
        if annotate {
            writeln!(
                writer,
                ">{} {}:{}-{} frame={}",
                t.gene_id, t.seq_id, t.start, t.end, t.frame
            )?;
        } else {
            writeln!(writer, ">{}", t.gene_id)?;
        }
        writeln!(writer, "{}", t.protein)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReadingFrame, Strand};

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nACGT\n>seq2\nTGCA\n";
        let sequences = parse_fasta_str(content).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences.get("seq1").unwrap().as_bytes(), b"ACGT");
        assert_eq!(sequences.get("seq2").unwrap().as_bytes(), b"TGCA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nACGT\nTGCA\nAAAA\n";
        let sequences = parse_fasta_str(content).unwrap();

        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences.get("seq1").unwrap().as_bytes(), b"ACGTTGCAAAAA");
    }

    #[test]
    fn test_parse_with_description() {
        let content = ">seq1 This is a description\nACGT\n";
        let sequences = parse_fasta_str(content).unwrap();

        assert!(sequences.contains("seq1"));
    }

    #[test]
    fn test_parse_with_empty_lines_and_crlf() {
        let content = ">seq1\r\nACGT\r\n\r\n>seq2\n\nTGCA";
        let sequences = parse_fasta_str(content).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences.get("seq1").unwrap().as_bytes(), b"ACGT");
        assert_eq!(sequences.get("seq2").unwrap().as_bytes(), b"TGCA");
    }

    #[test]
    fn test_records_keep_file_order() {
        let content = ">zeta\nAAA\n>alpha\nCCC\n>mid\nGGG\n";
        let sequences = parse_fasta_str(content).unwrap();
        let ids: Vec<&str> = sequences.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_records_are_dropped() {
        let content = ">empty\n>seq1\nACGT\n";
        let sequences = parse_fasta_str(content).unwrap();
        assert_eq!(sequences.len(), 1);
        assert!(!sequences.contains("empty"));
    }

    #[test]
    fn test_duplicate_id_keeps_later_record() {
        let content = ">seq1\nAAAA\n>seq2\nCCCC\n>seq1\nGGGG\n";
        let sequences = parse_fasta_str(content).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences.get("seq1").unwrap().as_bytes(), b"GGGG");
        assert_eq!(sequences.iter().next().unwrap().id, "seq1");
    }

    #[test]
    fn test_empty_file() {
        let result = parse_fasta_str("");
        assert!(matches!(result, Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        let content = "ACGT\n>seq1\nTGCA\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let result = parse_fasta_str(">\nACGT\n");
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_case_is_preserved() {
        let sequences = parse_fasta_str(">seq1\nacgt\n").unwrap();
        assert_eq!(sequences.get("seq1").unwrap().as_bytes(), b"acgt");
    }

    fn translation(gene_id: &str, protein: &str) -> Translation {
        Translation {
            gene_id: gene_id.to_string(),
            seq_id: "seq1".to_string(),
            start: 0,
            end: 9,
            frame: ReadingFrame::new(Strand::Reverse, 1),
            protein: protein.to_string(),
        }
    }

    #[test]
    fn test_write_translations() {
        let records = vec![translation("geneA", "MK"), translation("geneB", "MF")];
        let mut out = Vec::new();
        write_translations(&mut out, &records, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">geneA\nMK\n>geneB\nMF\n");
    }

    #[test]
    fn test_write_annotated_translations() {
        let records = vec![translation("geneA", "MK")];
        let mut out = Vec::new();
        write_translations(&mut out, &records, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">geneA seq1:0-9 frame=-2\nMK\n"
        );
    }

    #[test]
    fn test_written_output_reads_back() {
        let records = vec![translation("geneA", "MKLV")];
        let mut out = Vec::new();
        write_translations(&mut out, &records, true).unwrap();
        let parsed = parse_fasta(out.as_slice()).unwrap();
        assert_eq!(parsed.get("geneA").unwrap().as_bytes(), b"MKLV");
    }
}
