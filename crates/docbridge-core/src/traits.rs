use crate::error::EngineError;
use crate::types::SearchResultSet;

/// Something that answers a query with engine-ordered hits.
///
/// The HTTP layer and the suggestion deriver only see this seam, so they can
/// be exercised without a live engine.
pub trait SearchBackend: Send + Sync {
    fn search(&self, query: &str) -> Result<SearchResultSet, EngineError>;
}

/// Maps a word to its stem. Must be deterministic.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Leaves words untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}
