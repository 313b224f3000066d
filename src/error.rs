//! Error taxonomy for dataset generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the synthesizer and the chunked writer.
///
/// Nothing is retried; a failure mid-stream leaves already flushed batches on disk.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A count, chunk size or configuration value is out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The destination could not be created, opened or appended to
    #[error("i/o failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized to the output file
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

impl GeneratorError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the `InvalidArgument` kind
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::invalid("count must be at least 1, got 0");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: count must be at least 1, got 0"
        );

        let err = GeneratorError::io(
            "/nope/out.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_invalid_argument());
        assert!(err.to_string().contains("/nope/out.csv"));
    }
}
