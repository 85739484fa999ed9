use std::io;
use std::path::PathBuf;

/// Errors raised while configuring or running the generator.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid magnitude bound `{0}`")]
    InvalidBound(String),

    #[error("unknown operation `{0}` (expected one of mul, add, sub, div, rem)")]
    UnknownOperation(String),

    #[error("failed to load config file {}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
