//! Error types for the RSVP core.

use thiserror::Error;

/// Errors that can occur while resolving parties or reconciling RSVPs.
#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("No data found in spreadsheet")]
    EmptySheet,

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Spreadsheet store error: {0}")]
    Store(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

/// Result type alias for RSVP operations.
pub type RsvpResult<T> = Result<T, RsvpError>;
