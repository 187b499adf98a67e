//! Prefix completions mined from search previews.
//!
//! This is approximate: it runs an ordinary search for the prefix and
//! harvests words from the previews of whatever comes back. Words that only
//! appear in documents the engine did not return, or past the preview budget,
//! are never offered. There is no prefix index behind it.

use std::collections::BTreeSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use docbridge_core::config::SuggestSettings;
use docbridge_core::traits::SearchBackend;

use crate::backend::search_or_empty;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b[a-z]+\b").expect("word pattern");
}

#[derive(Clone)]
pub struct SuggestionDeriver {
    backend: Arc<dyn SearchBackend>,
    max_suggestions: usize,
    min_prefix_chars: usize,
}

impl SuggestionDeriver {
    pub fn new(backend: Arc<dyn SearchBackend>, settings: &SuggestSettings) -> Self {
        Self { backend, max_suggestions: settings.max_suggestions, min_prefix_chars: settings.min_prefix_chars }
    }

    /// Sorted, deduplicated, lowercase; at most `max_suggestions` entries.
    /// Prefixes below the minimum length give nothing. Otherwise the prefix
    /// itself is always a candidate, so an engine failure yields `[prefix]`.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.chars().count() < self.min_prefix_chars {
            return Vec::new();
        }

        let hits = search_or_empty(self.backend.as_ref(), &prefix);
        let mut candidates: BTreeSet<String> = hits
            .iter()
            .flat_map(|hit| {
                let lowered = hit.preview.to_lowercase();
                WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect::<Vec<_>>()
            })
            .filter(|word| word.len() > prefix.len() && word.starts_with(&prefix))
            .collect();
        candidates.insert(prefix);

        candidates.into_iter().take(self.max_suggestions).collect()
    }
}
