//! Error types for source discovery.
//!
//! These cover failures of the traversal and of the tool's own inputs
//! (configuration, pattern). Problems inside a schema file are not errors
//! here: they are reported as [`Fault`](hyperschema_core::Fault)s and
//! collected per file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing or walking the source tree.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration file is not valid YAML for [`CheckConfig`](crate::CheckConfig).
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file-name pattern is not a valid regular expression.
    #[error("invalid file pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A source given on the command line does not exist.
    #[error("source path '{}' does not exist", .0.display())]
    MissingSource(PathBuf),

    /// The traversal itself failed (unreadable directory, symlink loop...).
    #[error("cannot walk '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
