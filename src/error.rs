//! Crate error type
//!
//! Problems with the expression itself are diagnostics, not errors; see
//! [`crate::parser::diagnostics`]. Everything here is about the program
//! around the parser.

use crate::parser::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The result of a fallible operation outside the parser core.
pub type BasesResult<T> = Result<T, BasesError>;

/// An error raised by the binary or the terminal UI.
#[derive(Debug, Error)]
pub enum BasesError {
    /// Terminal or standard stream I/O failed
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The log file could not be opened
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An expression was required to parse cleanly and did not
    #[error("syntax error at {0}")]
    Syntax(#[from] ParseError),

    /// The tracing subscriber could not be installed
    #[error("cannot install log subscriber: {0}")]
    Logging(String),
}
