use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::roster::{Roster, StudentRecord, REQUIRED_COLUMNS};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RosterReaderConfig {
    delimiter: Option<u8>,
}

#[derive(Debug, Error)]
pub enum RosterReadError {
    #[error("could not parse input file: {0}")]
    Parse(#[from] csv::Error),
    #[error("could not read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("input file is missing expected column '{name}'")]
    MissingColumn { name: String },
    #[error("input file has no header row")]
    EmptyFile,
}

pub struct ParseResult {
    pub roster: Roster,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseWarning {
    SkippedEmptyRow { index: usize },
}

impl RosterReaderConfig {
    pub fn with_delimiter(delimiter: u8) -> RosterReaderConfig {
        RosterReaderConfig {
            delimiter: Some(delimiter),
        }
    }

    /// Guesses the delimiter by counting candidate bytes over the whole
    /// input. Ties go to the earlier candidate; a file with no candidate
    /// bytes at all is treated as comma-separated.
    pub fn default_from_file<R>(mut reader: R) -> Result<RosterReaderConfig, RosterReadError>
    where
        R: std::io::Read,
    {
        let delimiter_candidates = [b',', b';', b'\t'];
        let mut delimiter_counts = [0usize; 3];
        let mut buffer = Vec::new();

        reader.read_to_end(&mut buffer)?;

        for byte in buffer.iter() {
            for (i, delimiter) in delimiter_candidates.iter().enumerate() {
                if byte == delimiter {
                    delimiter_counts[i] += 1;
                }
            }
        }

        let delimiter = delimiter_counts
            .into_iter()
            .enumerate()
            .filter(|(_, c)| *c > 0)
            .max_by_key(|(_, c)| *c)
            .map(|(i, _)| delimiter_candidates[i])
            .unwrap_or(b',');

        debug!(delimiter = %(delimiter as char), "sniffed input delimiter");

        Ok(RosterReaderConfig {
            delimiter: Some(delimiter),
        })
    }

    /// Reads the header row and every record into a `Roster`. Cells are kept
    /// verbatim. Rows shorter than the header are padded with empty cells;
    /// rows whose cells are all empty are skipped with a warning.
    pub fn parse<R>(&self, reader: R) -> Result<ParseResult, RosterReadError>
    where
        R: std::io::Read,
    {
        let delimiter = self.delimiter.unwrap_or(b',');
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        if columns.is_empty() {
            return Err(RosterReadError::EmptyFile);
        }

        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(RosterReadError::MissingColumn {
                    name: required.to_string(),
                });
            }
        }

        let mut students = Vec::new();
        let mut warnings = Vec::new();

        for (row_idx, row) in reader.records().enumerate() {
            let row = row?;

            if row.iter().all(|cell| cell.is_empty()) {
                warnings.push(ParseWarning::SkippedEmptyRow { index: row_idx });
                continue;
            }

            let mut record = StudentRecord::default();
            for (col_idx, column) in columns.iter().enumerate() {
                record.set(column.clone(), row.get(col_idx).unwrap_or(""));
            }
            students.push(record);
        }

        debug!(num_students = students.len(), "read student roster");

        Ok(ParseResult {
            roster: Roster { columns, students },
            warnings,
        })
    }
}

/// Reads a roster from a file path, sniffing the delimiter first.
pub fn read_roster_file(path: &Path) -> Result<ParseResult, RosterReadError> {
    let buffer = std::fs::read(path)?;
    let config = RosterReaderConfig::default_from_file(&buffer[..])?;
    config.parse(&buffer[..])
}
