use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client could not be configured
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request failed or timed out
    #[error("failed to fetch page {page}: {source}")]
    Network {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("page {page} returned status {status}")]
    Status {
        page: u32,
        status: reqwest::StatusCode,
    },

    /// HTML could not be processed
    #[error("parse error: {0}")]
    Parse(String),

    /// Price text is not a number
    #[error("invalid price text: {text:?}")]
    Price { text: String },

    /// Title, link and price passes disagree on the number of listings
    #[error("page {page} is misaligned: {links} links, {titles} titles, {prices} prices")]
    Misaligned {
        page: u32,
        links: usize,
        titles: usize,
        prices: usize,
    },

    /// Table file does not exist
    #[error("table not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Table file exists but does not hold the expected columns
    #[error("malformed table {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
