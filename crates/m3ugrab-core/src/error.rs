//! Error taxonomy: fatal input/output failures vs per-channel resolution failures.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level library error.
///
/// `Input` and `Output` are fatal for a run; `Resolution` only fails the one
/// channel it names and is logged and skipped by the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Channel list file missing or unreadable. Raised before any network work.
    #[error("cannot read channel list {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single channel could not be resolved to a stream URL.
    #[error("channel {page}: {reason}")]
    Resolution { page: String, reason: String },

    /// Playlist target unwritable. Surfaced only after all resolution work so
    /// scraped data is not silently discarded.
    #[error("cannot write playlist {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_names_path() {
        let e = Error::Input {
            path: PathBuf::from("/no/such/list.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let msg = e.to_string();
        assert!(msg.contains("/no/such/list.txt"));
        assert!(msg.contains("channel list"));
    }

    #[test]
    fn resolution_error_names_page() {
        let e = Error::Resolution {
            page: "https://example.com/live".to_string(),
            reason: "HTTP 404".to_string(),
        };
        assert!(e.to_string().contains("https://example.com/live"));
        assert!(e.to_string().contains("HTTP 404"));
    }
}
