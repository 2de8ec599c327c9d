//! Error type shared by the library and the CLI.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GenError {
    /// The input file could not be opened.
    InputOpen { path: PathBuf, source: io::Error },
    /// The input file was opened but reading from it failed.
    InputRead { path: PathBuf, source: io::Error },
    /// An output file could not be created or written.
    OutputWrite { path: PathBuf, source: io::Error },
    /// The configuration file is missing, unreadable, or malformed.
    Config(String),
    InvalidRule(String),
    /// The run report could not be serialized.
    Report(String),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::InputOpen { path, source } => {
                write!(f, "Failed to open input file {}: {}", path.display(), source)
            }
            GenError::InputRead { path, source } => {
                write!(f, "Failed to read input file {}: {}", path.display(), source)
            }
            GenError::OutputWrite { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            GenError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GenError::InvalidRule(msg) => write!(f, "Invalid rewrite rule: {}", msg),
            GenError::Report(msg) => write!(f, "Failed to serialize report: {}", msg),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::InputOpen { source, .. }
            | GenError::InputRead { source, .. }
            | GenError::OutputWrite { source, .. } => Some(source),
            GenError::Config(_) | GenError::InvalidRule(_) | GenError::Report(_) => None,
        }
    }
}
