use docbridge_core::config::Settings;
use docbridge_core::error::{ConfigError, EngineError};
use docbridge_core::traits::SearchBackend;
use docbridge_core::types::SearchResultSet;

use crate::client::EngineClient;
use crate::parser::ResultParser;
use crate::preview::PreviewReader;
use crate::protocol::ReportSchema;

/// The production backend: engine subprocess plus report parsing.
#[derive(Debug, Clone)]
pub struct EngineSearch {
    client: EngineClient,
    parser: ResultParser,
}

impl EngineSearch {
    pub fn new(client: EngineClient, parser: ResultParser) -> Self { Self { client, parser } }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let client = EngineClient::new(&settings.engine)?;
        let parser = ResultParser::new(ReportSchema::v1(), PreviewReader::new(settings.preview.max_chars));
        Ok(Self::new(client, parser))
    }

    pub fn client(&self) -> &EngineClient { &self.client }
}

impl SearchBackend for EngineSearch {
    /// Blank queries never reach the engine.
    fn search(&self, query: &str) -> Result<SearchResultSet, EngineError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let output = self.client.query(query)?;
        if !output.stderr.trim().is_empty() {
            tracing::debug!(stderr = %output.stderr.trim_end(), "engine stderr");
        }
        Ok(self.parser.parse(&output.stdout))
    }
}

/// Search, logging and swallowing any engine failure as an empty result set.
pub fn search_or_empty(backend: &dyn SearchBackend, query: &str) -> SearchResultSet {
    match backend.search(query) {
        Ok(hits) => hits,
        Err(err) => {
            match &err {
                EngineError::InvocationFailed { exit_code, stderr } => {
                    tracing::warn!(exit_code = ?exit_code, stderr = %stderr.trim_end(), query, "engine search failed");
                }
                other => tracing::warn!(error = %other, query, "engine search failed"),
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbridge_core::types::SearchHit;

    struct Failing;
    impl SearchBackend for Failing {
        fn search(&self, _query: &str) -> Result<SearchResultSet, EngineError> {
            Err(EngineError::InvocationFailed { exit_code: Some(1), stderr: "index missing".to_string() })
        }
    }

    struct Fixed;
    impl SearchBackend for Fixed {
        fn search(&self, _query: &str) -> Result<SearchResultSet, EngineError> {
            Ok(vec![SearchHit { doc_path: "/a.txt".to_string(), score: 1.0, preview: "a".to_string() }])
        }
    }

    #[test]
    fn failures_become_empty_results() {
        assert!(search_or_empty(&Failing, "solar").is_empty());
    }

    #[test]
    fn successes_pass_through() {
        assert_eq!(search_or_empty(&Fixed, "solar").len(), 1);
    }
}
