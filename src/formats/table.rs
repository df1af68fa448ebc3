//! Tab-separated input tables.
//!
//! Both tables start with a header row, which is skipped.
//!
//! Genetic code, one codon per row:
//! ```text
//! codon	aa
//! ATG	M
//! TAA	*
//! ```
//!
//! Gene intervals, zero-based half-open coordinates:
//! ```text
//! seq_id	start	end	gene_id
//! chr1	100	400	geneA
//! ```

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use thiserror::Error;

use crate::genetic_code::{codon_str, Codon, GeneticCode};
use crate::model::{GeneInterval, IntervalTable};

/// Errors that can occur while reading a table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("{source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: codon '{codon}' is not three bases long")]
    InvalidCodon { row: usize, codon: String },

    #[error("row {row}: amino acid '{symbol}' for codon {codon} is not a single character")]
    InvalidSymbol {
        row: usize,
        codon: String,
        symbol: String,
    },

    #[error("row {row}: {column} '{value}' is not a non-negative integer")]
    InvalidCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

fn tab_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Yields `(row, record)` for every data row, checking the column count.
/// Rows are numbered from 1, not counting the header.
fn records<R: Read>(
    reader: R,
    expected: usize,
) -> impl Iterator<Item = TableResult<(usize, StringRecord)>> {
    tab_reader(reader)
        .into_records()
        .enumerate()
        .map(move |(index, result)| {
            let row = index + 1;
            let record = result?;
            if record.len() != expected {
                return Err(TableError::ColumnCount {
                    row,
                    expected,
                    found: record.len(),
                });
            }
            Ok((row, record))
        })
}

/// Reads a `codon<TAB>amino-acid` table into a [`GeneticCode`].
///
/// A codon listed twice takes the symbol of its last row.
pub fn read_genetic_code<R: Read>(reader: R) -> TableResult<GeneticCode> {
    let mut code = GeneticCode::new();
    for entry in records(reader, 2) {
        let (row, record) = entry?;
        let codon: Codon = record[0].as_bytes().try_into().map_err(|_| TableError::InvalidCodon {
            row,
            codon: record[0].to_string(),
        })?;

        let mut chars = record[1].chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(symbol), None) => symbol,
            _ => {
                return Err(TableError::InvalidSymbol {
                    row,
                    codon: codon_str(&codon),
                    symbol: record[1].to_string(),
                })
            }
        };

        if let Some(previous) = code.insert(codon, symbol) {
            warn!(
                "Codon {} listed twice (row {}); '{}' replaces '{}'",
                codon_str(&codon),
                row,
                symbol,
                previous
            );
        }
    }
    Ok(code)
}

/// Reads a genetic code table from a file.
pub fn read_genetic_code_file<P: AsRef<Path>>(path: P) -> TableResult<GeneticCode> {
    read_genetic_code(std::fs::File::open(path).map_err(csv::Error::from)?)
}

fn coordinate(row: usize, column: &'static str, value: &str) -> TableResult<usize> {
    value.parse().map_err(|_| TableError::InvalidCoordinate {
        row,
        column,
        value: value.to_string(),
    })
}

/// Reads a `seq_id<TAB>start<TAB>end<TAB>gene_id` table, grouping rows by sequence.
pub fn read_intervals<R: Read>(reader: R) -> TableResult<IntervalTable> {
    let mut table = IntervalTable::new();
    for entry in records(reader, 4) {
        let (row, record) = entry?;
        let start = coordinate(row, "start", &record[1])?;
        let end = coordinate(row, "end", &record[2])?;
        if start > end {
            warn!(
                "Interval {} on {} has start {} after end {}; it will be empty",
                &record[3], &record[0], start, end
            );
        }
        table.push(&record[0], GeneInterval::new(start, end, &record[3]));
    }
    Ok(table)
}

/// Reads an interval table from a file.
pub fn read_intervals_file<P: AsRef<Path>>(path: P) -> TableResult<IntervalTable> {
    read_intervals(std::fs::File::open(path).map_err(csv::Error::from)?)
}
