//! docbridge-text
//!
//! Text normalization for indexing: the staged [`normalizer::Normalizer`],
//! tantivy-backed analyzers in `tantivy_utils`, and the parallel
//! [`data_processor::DocumentBatchProcessor`] that writes one normalized
//! artifact per document under the document's base name.

pub mod data_processor;
pub mod normalizer;
pub mod tantivy_utils;

pub use data_processor::{BatchReport, DocumentBatchProcessor, OutputMode};
pub use normalizer::Normalizer;
