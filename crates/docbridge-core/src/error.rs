use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Setup-time failures. These are fatal: nothing can be served without them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Engine binary not found: {}", .path.display())]
    MissingEngine { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read configuration: {0}")]
    Figment(#[from] figment::Error),
}

/// A single document could not be read, decoded or written.
///
/// Always recovered: the batch records it and moves on to sibling documents.
#[derive(Debug, Error)]
pub enum DocumentIoError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("{} is not valid UTF-8", .path.display())]
    Decode { path: PathBuf },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

impl DocumentIoError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. } | Self::Decode { path } | Self::Write { path, .. } => path,
        }
    }
}

/// Per-call failures talking to the external engine.
///
/// Request paths recover from every variant by answering with an empty result set.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine could not be started ({}): {source}", .path.display())]
    EngineUnavailable { path: PathBuf, source: std::io::Error },

    #[error("Engine exited with status {}: {stderr}", describe_exit(.exit_code))]
    InvocationFailed { exit_code: Option<i32>, stderr: String },

    #[error("Engine did not finish within {after:?}")]
    Timeout { after: Duration },

    #[error("Document directory does not exist: {}", .path.display())]
    InvalidDocumentDir { path: PathBuf },
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

pub type Result<T> = std::result::Result<T, EngineError>;
