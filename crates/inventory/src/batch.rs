//! CSV batch uploads: file checks and line parsing.
//!
//! Each line is `color,cottonPart,quantity` with no header row. Parsing is pure;
//! applying the parsed deltas is the service's job.

use sockwarehouse_core::{DomainError, DomainResult};

use crate::record::{normalize_color, StockDelta};

/// Required suffix of an uploaded batch file name.
pub const BATCH_FILE_EXTENSION: &str = ".csv";

const FIELDS_PER_LINE: usize = 3;

/// An uploaded batch file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchUpload {
    pub file_name: Option<String>,
    pub content: Vec<u8>,
}

impl BatchUpload {
    pub fn new(file_name: Option<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name,
            content: content.into(),
        }
    }

    /// Reject empty files and names without the `.csv` suffix.
    pub fn validate(&self) -> DomainResult<()> {
        if self.content.is_empty() {
            return Err(DomainError::invalid_input("file must not be empty"));
        }
        match self.file_name.as_deref() {
            Some(name) if name.ends_with(BATCH_FILE_EXTENSION) => Ok(()),
            Some(name) => Err(DomainError::invalid_input(format!(
                "unsupported file '{name}': a {BATCH_FILE_EXTENSION} file is required"
            ))),
            None => Err(DomainError::invalid_input(format!(
                "missing file name: a {BATCH_FILE_EXTENSION} file is required"
            ))),
        }
    }
}

/// Parse one CSV line into a normalized income delta.
///
/// `line_no` is 1-based and only used in error messages.
pub fn parse_batch_line(line_no: usize, line: &str) -> DomainResult<StockDelta> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELDS_PER_LINE {
        return Err(DomainError::invalid_input(format!(
            "line {line_no}: expected {FIELDS_PER_LINE} comma-separated fields, found {}",
            fields.len()
        )));
    }

    let cotton_part: i32 = fields[1].parse().map_err(|_| {
        DomainError::invalid_input(format!(
            "line {line_no}: cottonPart '{}' is not an integer",
            fields[1]
        ))
    })?;
    let quantity: u32 = fields[2].parse().map_err(|_| {
        DomainError::invalid_input(format!(
            "line {line_no}: quantity '{}' is not a non-negative integer",
            fields[2]
        ))
    })?;

    Ok(StockDelta::new(normalize_color(fields[0]), cotton_part, quantity))
}
