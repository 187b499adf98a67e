use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use docbridge_core::types::{SearchHit, SearchResultSet};

use crate::preview::PreviewReader;
use crate::protocol::ReportSchema;

/// Turns engine stdout into hits, reading a preview for each.
///
/// Fails open: no header, or nothing but unrecognized lines, gives an empty
/// set. Hit order is exactly the report's order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultParser {
    schema: ReportSchema,
    previews: PreviewReader,
}

impl ResultParser {
    pub fn new(schema: ReportSchema, previews: PreviewReader) -> Self { Self { schema, previews } }

    pub fn parse(&self, raw: &str) -> SearchResultSet {
        let report = self.schema.parse(raw);
        for (line, rejection) in &report.rejected {
            tracing::debug!(line = %line, reason = ?rejection, "skipping report line");
        }
        if let Some(declared) = report.declared {
            if declared != report.entries.len() {
                tracing::debug!(declared, accepted = report.entries.len(), "report count differs from accepted lines");
            }
        }
        report
            .entries
            .into_iter()
            .map(|entry| {
                let doc_path = normalize_separators(&entry.path);
                let preview = self.previews.read(Path::new(&doc_path));
                SearchHit { doc_path, score: entry.score, preview }
            })
            .collect()
    }
}

/// Rewrite both `/` and `\` to the host separator and drop redundant
/// components (`//`, `.`, and `..` after a normal component).
pub fn normalize_separators(path: &str) -> String {
    let unified: String = path.chars().map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c }).collect();
    let mut out = PathBuf::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => { out.pop(); }
                Some(Component::RootDir) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() { ".".to_string() } else { out.to_string_lossy().into_owned() }
}
