use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by MIDI discovery and the reader.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("MIDI backend init failed: {0}")]
    Init(String),

    #[error("MIDI input port not found: {port}")]
    PortNotFound { port: String },

    #[error("Failed to open MIDI input '{port}': {reason}")]
    Connect { port: String, reason: String },

    #[error("No matching MIDI input appeared within {waited:?} (keyword: {keyword:?})")]
    DetectTimeout {
        keyword: Option<String>,
        waited: Duration,
    },
}
