//! Error types.

use thiserror::Error;

/// Result alias for netsetup operations.
pub type Result<T> = std::result::Result<T, NetsetupError>;

/// Errors returned by netsetup operations.
#[derive(Debug, Error)]
pub enum NetsetupError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration (or backup) file to read does not exist.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// The expected path.
        path: String,
    },

    /// Refused to overwrite an existing file with the template.
    #[error("configuration file already exists: {path}")]
    ConfigExists {
        /// The path that is already occupied.
        path: String,
    },

    /// Interactive service selection received something other than a number
    /// in `1..=count`.
    #[error("invalid selection {input:?}: expected a number between 1 and {count}")]
    InvalidSelection {
        /// The rejected operator input, trimmed.
        input: String,
        /// How many services were listed.
        count: usize,
    },

    /// An external command exited with a non-zero status (or could not be
    /// spawned). `detail` carries the command's own diagnostic output.
    #[error("`{command}` failed: {detail}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Combined stdout/stderr, or the spawn error.
        detail: String,
    },

    /// `networksetup` listed no network services at all.
    #[error("no network services reported by networksetup")]
    NoServices,

    /// A reverse-lookup target specification could not be expanded.
    #[error("invalid lookup target: {0}")]
    InvalidTarget(String),
}
