//! Domain types shared by the normalizer, the engine bridge and the HTTP layer.
//!
//! Everything here is transient: created for one request or one batch run and
//! dropped afterwards.

use serde::{Deserialize, Serialize};

/// One ranked document returned by the engine.
///
/// - `doc_path`: the document path as reported by the engine, separators
///   normalized for the host
/// - `score`: engine-assigned, non-negative, passed through untouched
/// - `preview`: bounded excerpt read from disk by the bridge, or a sentinel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub doc_path: String,
    pub score: f64,
    pub preview: String,
}

/// Hits in exactly the order the engine emitted them.
pub type SearchResultSet = Vec<SearchHit>;

/// The two operations the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    BuildIndex,
    Search,
}

/// A single engine call: which operation and the argument vector passed to the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInvocation {
    pub mode: EngineMode,
    pub args: Vec<String>,
}

impl EngineInvocation {
    /// `<engine> <abs_doc_dir>`
    pub fn build_index(doc_dir: &str) -> Self {
        Self { mode: EngineMode::BuildIndex, args: vec![doc_dir.to_string()] }
    }

    /// `<engine> search <query>`
    pub fn search(query: &str) -> Self {
        Self { mode: EngineMode::Search, args: vec!["search".to_string(), query.to_string()] }
    }
}

/// Captured result of a finished engine process. Output is lossily decoded UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}
