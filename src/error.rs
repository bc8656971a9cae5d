//! Crate-wide error type.
//!
//! The terminal engine itself never fails: every key and every command is
//! a total function over strings. Errors only come from the ambient layer
//! around it (content files, the preference file, terminal I/O, logging).

use std::io;
use std::path::PathBuf;

/// Everything that can go wrong outside the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A content file could not be read or did not match the expected shape.
    #[error("invalid content file {}: {reason}", .path.display())]
    Content { path: PathBuf, reason: String },

    /// The preference file could not be written.
    #[error("cannot save preferences to {}: {reason}", .path.display())]
    Preference { path: PathBuf, reason: String },

    /// A section name given on the command line is not known.
    #[error("unknown section '{0}' (expected contact, experience, volunteering, education or languages)")]
    UnknownSection(String),

    /// The logging subscriber could not be installed.
    #[error("cannot initialise logging: {0}")]
    Logging(String),

    /// Serializing a report failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
