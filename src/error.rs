use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while counting words for a corpus
#[derive(Error, Debug)]
pub enum CountError {
    #[error("failed to open file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot partition {len} bytes across {workers} workers")]
    InvalidPartition { workers: usize, len: usize },

    #[error("failed to start worker {worker}: {source}")]
    WorkerSpawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("a worker thread panicked during counting")]
    WorkerPanicked,

    #[error("channel error: {0}")]
    Channel(String),
}

/// Result type alias for counting operations
pub type Result<T> = std::result::Result<T, CountError>;

impl CountError {
    /// Process-scoped errors abort the whole run; everything else is confined to one file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CountError::WorkerSpawn { .. } | CountError::WorkerPanicked | CountError::Channel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CountError::InvalidPartition { workers: 0, len: 12 };
        assert_eq!(err.to_string(), "cannot partition 12 bytes across 0 workers");

        let err = CountError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to open file missing.txt"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(!CountError::InvalidPartition { workers: 4, len: 0 }.is_fatal());
        assert!(
            !CountError::Io {
                path: PathBuf::from("x"),
                source: std::io::Error::other("boom"),
            }
            .is_fatal()
        );
        assert!(CountError::WorkerPanicked.is_fatal());
        assert!(CountError::Channel("closed".into()).is_fatal());
        assert!(
            CountError::WorkerSpawn {
                worker: 2,
                source: std::io::Error::other("no threads"),
            }
            .is_fatal()
        );
    }
}
