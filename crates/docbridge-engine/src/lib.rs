//! docbridge-engine
//!
//! Everything that talks to the external search engine: the subprocess
//! [`client::EngineClient`], the versioned report format in [`protocol`],
//! [`parser::ResultParser`] with its preview reader, the [`backend::EngineSearch`]
//! backend used by the HTTP layer, and [`suggest::SuggestionDeriver`].

pub mod backend;
pub mod client;
pub mod parser;
pub mod preview;
pub mod protocol;
pub mod suggest;

pub use backend::{search_or_empty, EngineSearch};
pub use client::EngineClient;
pub use parser::ResultParser;
pub use preview::PreviewReader;
pub use protocol::ReportSchema;
pub use suggest::SuggestionDeriver;
