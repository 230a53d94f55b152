//! Minimal comma-separated parser for the published sheet export.
//!
//! Lines are split on bare commas. Quoted fields are not understood, so a
//! value containing a comma shifts every column after it.

use thiserror::Error;
use tracing::{debug, warn};

use crate::record::{CheatRecord, RECOGNIZED_FIELDS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("csv input has no header row")]
    MissingHeader,
}

pub fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|v| v.trim().to_string()).collect()
}

pub fn parse_csv(text: &str) -> Result<Vec<CheatRecord>, CsvError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let headers = match lines.next() {
        Some(line) => split_row(line),
        None => return Err(CsvError::MissingHeader),
    };

    for field in RECOGNIZED_FIELDS {
        if !headers.iter().any(|h| h == field) {
            warn!("csv header row has no '{field}' column, cards will show it empty");
        }
    }

    let records: Vec<CheatRecord> = lines
        .map(|line| {
            let mut values = split_row(line).into_iter();
            let fields = headers
                .iter()
                .map(|h| (h.clone(), values.next().unwrap_or_default()))
                .collect();
            CheatRecord::from_fields(fields)
        })
        .collect();

    debug!(
        "parsed {} records with {} columns",
        records.len(),
        headers.len()
    );
    Ok(records)
}
