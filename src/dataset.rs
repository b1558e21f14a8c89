//! Dataset records and the CSV boundary.
//!
//! # Input format
//!
//! UTF-8 text, comma-separated. The first line is a header and is discarded.
//! One configurable column carries the record id; every other column is
//! parsed as an `f32` feature. All records must have the same feature arity
//! (checked against the first data row).
//!
//! # Parse policy
//!
//! The permissive policy maps malformed numeric fields to `0.0`, which is
//! what downstream consumers of the historical output format expect. It can
//! silently mask corrupt input, so a strict policy that fails fast on the
//! first malformed field is available as well. Permissive is the default.
//!
//! # Output format
//!
//! Header line `ID,Risk`, then one `id,risk` line per input record, in input
//! order.

use crate::output::OutputSink;
use std::fmt;
use std::io::{self, BufRead, Write};

/// One dataset record: an opaque id plus a fixed-arity feature vector.
///
/// Immutable after construction; the whole dataset is shared read-only by
/// every worker for the duration of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Externally assigned unique id. Never interpreted, only echoed to the
    /// output.
    pub id: String,
    /// Feature values, same length for every record in a dataset.
    pub features: Vec<f32>,
}

/// How to treat feature fields that fail to parse as `f32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Malformed fields become `0.0` (historical behavior).
    #[default]
    Permissive,
    /// Malformed fields abort the read with [`DatasetError::Parse`].
    Strict,
}

/// Errors from reading a dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// Underlying I/O error.
    Io(io::Error),
    /// A feature field failed to parse under [`ParsePolicy::Strict`].
    Parse {
        /// 1-based line number in the input (header is line 1).
        line: usize,
        /// 0-based column index of the offending field.
        column: usize,
        /// The offending field text.
        value: String,
    },
    /// A row's feature count differs from the first data row's.
    ArityMismatch {
        /// 1-based line number in the input.
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "dataset i/o error: {}", e),
            DatasetError::Parse {
                line,
                column,
                value,
            } => write!(
                f,
                "line {}: column {} is not a number: {:?}",
                line, column, value
            ),
            DatasetError::ArityMismatch {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} features, found {}",
                line, expected, found
            ),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(e: io::Error) -> Self {
        DatasetError::Io(e)
    }
}

/// Parse one CSV row into a record.
///
/// The field at `id_index` becomes the id; every other field is a feature.
/// A missing id column leaves the id empty, matching the permissive spirit
/// of the input format.
fn parse_record(
    row: &str,
    line: usize,
    id_index: usize,
    policy: ParsePolicy,
) -> Result<Record, DatasetError> {
    let mut id = String::new();
    let mut features = Vec::new();
    for (column, field) in row.split(',').enumerate() {
        if column == id_index {
            id = field.to_string();
            continue;
        }
        let value = match field.trim().parse::<f32>() {
            Ok(v) => v,
            Err(_) => match policy {
                ParsePolicy::Permissive => 0.0,
                ParsePolicy::Strict => {
                    return Err(DatasetError::Parse {
                        line,
                        column,
                        value: field.to_string(),
                    })
                }
            },
        };
        features.push(value);
    }
    Ok(Record { id, features })
}

/// Read a dataset from CSV text.
///
/// Skips the header line, then parses every remaining line as one record.
/// Rejects rows whose feature arity differs from the first data row, so that
/// the background knowledge size `h` stays meaningful for every record.
pub fn read_records<R: BufRead>(
    reader: R,
    id_index: usize,
    policy: ParsePolicy,
) -> Result<Vec<Record>, DatasetError> {
    let mut dataset = Vec::new();
    let mut arity: Option<usize> = None;

    // Line 1 is the header; data starts at line 2.
    for (i, row) in reader.lines().enumerate().skip(1) {
        let row = row?;
        let line = i + 1;
        let record = parse_record(&row, line, id_index, policy)?;
        match arity {
            None => arity = Some(record.features.len()),
            Some(expected) if expected != record.features.len() => {
                return Err(DatasetError::ArityMismatch {
                    line,
                    expected,
                    found: record.features.len(),
                });
            }
            Some(_) => {}
        }
        dataset.push(record);
    }
    Ok(dataset)
}

/// Write the risk report: `ID,Risk` header, one line per record, input order.
///
/// Formats the whole report into one buffer and hands it to the sink in a
/// single batch, mirroring how workers batch output elsewhere.
pub fn write_risk(dataset: &[Record], risks: &[f32], sink: &dyn OutputSink) {
    assert_eq!(dataset.len(), risks.len());

    let mut buf = Vec::with_capacity(16 * (dataset.len() + 1));
    buf.extend_from_slice(b"ID,Risk\n");
    for (record, risk) in dataset.iter().zip(risks) {
        // Writes into a Vec cannot fail.
        let _ = writeln!(buf, "{},{}", record.id, risk);
    }
    sink.write_all(&buf);
    sink.flush();
}
