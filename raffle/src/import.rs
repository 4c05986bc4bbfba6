//! Participant import from CSV exports.
//!
//! Expected layout is a header row followed by `name,lastName,status`
//! rows. Only rows with status `approved` are admitted.

use std::path::Path;
use thiserror::Error;

use crate::pool::Participant;

/// Status value a row needs to be imported
pub const APPROVED_STATUS: &str = "approved";

/// Import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// File could not be read
    #[error("could not read participant file: {0}")]
    Io(#[from] std::io::Error),

    /// File parsed but held no usable rows
    #[error("no 'approved' participants found, check the file format")]
    NoApprovedParticipants,
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Parse CSV text into import participants.
///
/// The first line is treated as a header. Both LF and CRLF line endings are
/// accepted, fields are trimmed and double quotes stripped.
///
/// # Errors
///
/// Returns [`ImportError::NoApprovedParticipants`] if no row qualifies.
pub fn parse_csv(text: &str) -> ImportResult<Vec<Participant>> {
    let participants: Vec<Participant> = text.lines().skip(1).filter_map(parse_row).collect();

    if participants.is_empty() {
        return Err(ImportError::NoApprovedParticipants);
    }

    log::debug!("Parsed {} approved participant(s)", participants.len());
    Ok(participants)
}

/// Read and parse a CSV file.
pub async fn load_csv(path: impl AsRef<Path>) -> ImportResult<Vec<Participant>> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_csv(&text)
}

fn parse_row(line: &str) -> Option<Participant> {
    if line.trim().is_empty() {
        return None;
    }

    let mut fields = line.split(',').map(|s| s.trim().replace('"', ""));
    let first_name = fields.next()?;
    let last_name = fields.next()?;
    let status = fields.next()?;

    if !status.eq_ignore_ascii_case(APPROVED_STATUS) || first_name.is_empty() || last_name.is_empty()
    {
        return None;
    }

    Some(Participant::imported(&first_name, &last_name))
}
