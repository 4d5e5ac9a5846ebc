//! Error types for fetching, extraction and configuration.
//!
//! Per-URL failures are values, not panics: the collection loop inspects
//! them to tell a network problem from a page that simply is not an article,
//! logs the reason, and moves on to the next candidate.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a page could not be downloaded.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body-decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    /// The URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Why a fetched page was not accepted as an article.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no h1 or h2 heading")]
    MissingTitle,
    #[error("title too short ({chars} chars)")]
    TitleTooShort { chars: usize },
    #[error("body below quality gate ({chars} chars, {words} words)")]
    BodyTooShort { chars: usize, words: usize },
}

/// Outcome of trying one candidate URL.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

/// Failure loading the optional YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
