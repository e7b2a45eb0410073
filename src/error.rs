use thiserror::Error;

/// Stage-level failures. Every stage short-circuits on the first error;
/// nothing is retried or recovered.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no qualifying annex link found on the landing page")]
    LocatorNotFound,

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("table extraction failed: {0}")]
    Extraction(String),

    #[error("reconciled table has {actual} columns, expected at least {expected}")]
    Schema { actual: usize, expected: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("archive failed: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
