use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docbridge_core::config::{Decoding, NormalizerSettings};
use docbridge_core::encoding::decode;
use docbridge_core::error::DocumentIoError;

use crate::normalizer::Normalizer;

/// What gets written for each processed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Readable cleaned text (normalizer stages 1-5).
    Cleaned,
    /// Stems joined by single spaces, ready for the engine to index.
    #[default]
    Tokens,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub failures: Vec<DocumentIoError>,
}

pub struct DocumentBatchProcessor {
    normalizer: Normalizer,
    extensions: Vec<String>,
    decoding: Decoding,
    mode: OutputMode,
    progress: bool,
}

impl Default for DocumentBatchProcessor {
    fn default() -> Self { Self::new(&NormalizerSettings::default()) }
}

impl DocumentBatchProcessor {
    pub fn new(settings: &NormalizerSettings) -> Self {
        Self {
            normalizer: Normalizer::from_settings(settings),
            extensions: settings.extensions.iter().map(|e| e.trim_start_matches('.').to_ascii_lowercase()).collect(),
            decoding: settings.decoding,
            mode: OutputMode::default(),
            progress: false,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self { self.mode = mode; self }

    pub fn with_progress(mut self, progress: bool) -> Self { self.progress = progress; self }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self { self.normalizer = normalizer; self }

    /// Normalize every matching document directly under `input_dir`.
    ///
    /// A document that cannot be read, decoded or written is recorded in the
    /// report and never stops its siblings. Only an unusable `input_dir` or an
    /// `output_dir` that cannot be created fails the whole batch. Reruns
    /// overwrite earlier outputs.
    pub fn process_directory(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<BatchReport, DocumentIoError> {
        if !input_dir.is_dir() {
            return Err(DocumentIoError::Read {
                path: input_dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "input directory does not exist"),
            });
        }
        if let Some(out) = output_dir {
            fs::create_dir_all(out).map_err(|source| DocumentIoError::Write { path: out.to_path_buf(), source })?;
        }
        let files = self.list_documents(input_dir);
        if files.is_empty() {
            tracing::info!(dir = %input_dir.display(), "no matching documents found");
            return Ok(BatchReport::default());
        }

        let pb = if self.progress { ProgressBar::new(files.len() as u64) } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%)") {
            pb.set_style(style.progress_chars("#>-"));
        }

        let outcomes: Vec<Result<(), DocumentIoError>> = files
            .par_iter()
            .map(|path| {
                let outcome = self.process_document(path, output_dir);
                pb.inc(1);
                outcome
            })
            .collect();
        pb.finish_and_clear();

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(()) => report.processed += 1,
                Err(err) => {
                    tracing::warn!(path = %err.path().display(), error = %err, "skipping document");
                    report.failures.push(err);
                }
            }
        }
        tracing::info!(processed = report.processed, failed = report.failures.len(), dir = %input_dir.display(), "batch finished");
        Ok(report)
    }

    /// Read one document and render it in the configured mode.
    pub fn render_document(&self, path: &Path) -> Result<String, DocumentIoError> {
        let bytes = fs::read(path).map_err(|source| DocumentIoError::Read { path: path.to_path_buf(), source })?;
        let text = decode(bytes, self.decoding).ok_or_else(|| DocumentIoError::Decode { path: path.to_path_buf() })?;
        Ok(match self.mode {
            OutputMode::Cleaned => self.normalizer.clean(&text),
            OutputMode::Tokens => self.normalizer.normalize(&text).join(" "),
        })
    }

    fn process_document(&self, path: &Path, output_dir: Option<&Path>) -> Result<(), DocumentIoError> {
        tracing::debug!(path = %path.display(), "processing document");
        let rendered = self.render_document(path)?;
        if let (Some(out), Some(name)) = (output_dir, path.file_name()) {
            let target = out.join(name);
            fs::write(&target, rendered).map_err(|source| DocumentIoError::Write { path: target, source })?;
        }
        Ok(())
    }

    fn list_documents(&self, root: &Path) -> Vec<PathBuf> {
        let mut documents = Vec::new();
        for entry in walkdir::WalkDir::new(root).min_depth(1).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| !e.file_type().is_dir()) {
            let path = entry.path();
            let matches = path.extension().and_then(|s| s.to_str()).is_some_and(|ext| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
            if matches { documents.push(path.to_path_buf()); }
        }
        documents.sort(); documents
    }
}
