use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors – every variant aborts dataset construction
// ---------------------------------------------------------------------------

/// Errors raised while building the device catalog at startup.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot read device data {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed device data {}: {reason}", .path.display())]
    MalformedSource { path: PathBuf, reason: String },

    #[error("invalid device data at line {line}, column {column}: {message}\n  near: {snippet}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
        /// Excerpt of the repaired text around the failure.
        snippet: String,
    },

    #[error("cannot load column map {}: {reason}", .path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("field '{field}' is absent from every record; check the column map")]
    MissingField { field: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Cut a short excerpt of `text` around byte offset `at`, on char boundaries.
pub fn snippet_around(text: &str, at: usize) -> String {
    const RADIUS: usize = 40;
    let at = at.min(text.len());
    let mut start = at.saturating_sub(RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (at + RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    text[start..end].replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_clamped_to_text() {
        assert_eq!(snippet_around("abc", 10), "abc");
        let long = "x".repeat(200);
        assert_eq!(snippet_around(&long, 100).len(), 80);
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let text = format!("{}é{}", "a".repeat(39), "b".repeat(60));
        let s = snippet_around(&text, 80);
        assert!(s.contains('b'));
    }
}
