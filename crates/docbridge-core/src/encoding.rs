//! Byte-to-text decoding shared by document reads, previews and engine output.

use crate::config::Decoding;

/// Decode UTF-8, dropping invalid sequences instead of substituting them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect(),
    }
}

/// `None` only when `decoding` is strict and the bytes are not valid UTF-8.
pub fn decode(bytes: Vec<u8>, decoding: Decoding) -> Option<String> {
    match decoding {
        Decoding::Lossy => Some(decode_lossy(&bytes)),
        Decoding::Strict => String::from_utf8(bytes).ok(),
    }
}
