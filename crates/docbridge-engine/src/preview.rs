use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const MISSING_DOCUMENT: &str = "Document not found or path invalid";
pub const EMPTY_DOCUMENT: &str = "Document is empty";
const UNAVAILABLE_PREFIX: &str = "Preview unavailable: ";
const MAX_REASON_CHARS: usize = 50;
const CHUNK_BYTES: usize = 4096;

/// Reads a bounded excerpt of a hit's backing document.
///
/// Never fails: a missing, empty or unreadable document yields a non-empty
/// sentinel so the hit can still be returned in place.
#[derive(Debug, Clone, Copy)]
pub struct PreviewReader {
    max_chars: usize,
}

impl Default for PreviewReader {
    fn default() -> Self { Self { max_chars: 200 } }
}

impl PreviewReader {
    pub fn new(max_chars: usize) -> Self { Self { max_chars: max_chars.max(1) } }

    pub fn max_chars(&self) -> usize { self.max_chars }

    pub fn read(&self, path: &Path) -> String {
        if !path.exists() {
            return MISSING_DOCUMENT.to_string();
        }
        match self.read_excerpt(path) {
            Ok(excerpt) if excerpt.is_empty() => EMPTY_DOCUMENT.to_string(),
            Ok(excerpt) => excerpt,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "preview read failed");
                let reason: String = err.to_string().chars().take(MAX_REASON_CHARS).collect();
                format!("{UNAVAILABLE_PREFIX}{reason}")
            }
        }
    }

    /// Decode chunk by chunk until `max_chars` characters are collected or the
    /// file ends. Invalid bytes are dropped and do not count against the budget.
    fn read_excerpt(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        let mut excerpt = String::new();
        let mut taken = 0;
        let mut pending: Vec<u8> = Vec::new();
        let mut chunk = [0u8; CHUNK_BYTES];
        while taken < self.max_chars {
            let n = match file.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            pending.extend_from_slice(&chunk[..n]);
            let consumed = self.push_decoded(&pending, &mut excerpt, &mut taken);
            pending.drain(..consumed);
        }
        Ok(excerpt.trim().to_string())
    }

    /// Append valid UTF-8 from `bytes` to `out`, skipping invalid sequences.
    /// Returns how many bytes were consumed; an incomplete trailing sequence
    /// is left for the next chunk.
    fn push_decoded(&self, bytes: &[u8], out: &mut String, taken: &mut usize) -> usize {
        let mut consumed = 0;
        loop {
            let rest = &bytes[consumed..];
            let (valid, invalid) = match std::str::from_utf8(rest) {
                Ok(_) => (rest.len(), None),
                Err(err) => (err.valid_up_to(), err.error_len()),
            };
            let text = std::str::from_utf8(&rest[..valid]).unwrap_or_default();
            for c in text.chars() {
                if *taken >= self.max_chars {
                    return bytes.len();
                }
                out.push(c);
                *taken += 1;
            }
            consumed += valid;
            match invalid {
                Some(len) => consumed += len,
                None => return consumed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_sentinel() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(PreviewReader::default().read(&tmp.path().join("nope.txt")), MISSING_DOCUMENT);
    }

    #[test]
    fn empty_file_yields_sentinel() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "   \n").unwrap();
        assert_eq!(PreviewReader::default().read(&path), EMPTY_DOCUMENT);
    }

    #[test]
    fn long_documents_are_cut_at_the_budget() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("long.txt");
        fs::write(&path, "é".repeat(500)).unwrap();
        let preview = PreviewReader::new(200).read(&path);
        assert_eq!(preview.chars().count(), 200);
        assert!(preview.chars().all(|c| c == 'é'));
    }

    #[test]
    fn invalid_bytes_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mixed.txt");
        fs::write(&path, b"  solar \xff power  ").unwrap();
        assert_eq!(PreviewReader::default().read(&path), "solar  power");
    }

    #[test]
    fn leading_invalid_bytes_do_not_hide_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("noisy.txt");
        let mut bytes = vec![0xff; 800];
        bytes.extend_from_slice(b"hello world");
        fs::write(&path, bytes).unwrap();
        assert_eq!(PreviewReader::default().read(&path), "hello world");
    }

    #[test]
    fn characters_split_across_reads_survive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("split.txt");
        let mut bytes = vec![0xff; CHUNK_BYTES - 1];
        bytes.extend_from_slice("été".as_bytes());
        fs::write(&path, bytes).unwrap();
        assert_eq!(PreviewReader::default().read(&path), "été");
    }

    #[test]
    fn directory_yields_unavailable_sentinel() {
        let tmp = TempDir::new().unwrap();
        let preview = PreviewReader::default().read(tmp.path());
        assert!(preview.starts_with(UNAVAILABLE_PREFIX), "got {preview:?}");
    }
}
