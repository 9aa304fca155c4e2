// src/error.rs
//! Error types shared across the library.
//!
//! Each layer has its own small enum; `Error` wraps them so collectors and
//! the CLI can use a single `Result`. The binary turns these into a
//! `color_eyre` report.

use thiserror::Error;

pub use crate::compose::ComposeError;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{what} not found in {url}")]
    Missing { what: &'static str, url: String },

    #[error("no events listed on {0}")]
    NoEvents(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set (environment or .env)")]
    MissingEnv(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn file(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::File { path: path.display().to_string(), source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
