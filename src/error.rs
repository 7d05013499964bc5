use std::num::ParseIntError;
use thiserror::Error;

/// Error definition for possible errors in this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when no target URL was given
    #[error("Target URL is required")]
    MissingTarget,
    /// Returned when the configured worker count is zero
    #[error("At least one download worker is required")]
    NoWorkers,
    /// Returned when the content-length couldn't be parsed
    #[error("Failed to parse content-length")]
    LenParse(#[from] ParseIntError),
    /// Returned when the header can't be parsed to a String
    #[error(transparent)]
    ToStr(#[from] reqwest::header::ToStrError),
    /// Returned when the HEAD response carries no usable content-length
    #[error("Missing or zero content-length")]
    NoLen,
    /// Represents problems with network connectivity
    #[error("Request error: {0}")]
    NetError(#[from] reqwest::Error),
    /// Returned when the url couldn't be parsed
    #[error("Failed to parse URL")]
    UrlParseError(#[from] url::ParseError),
    #[cfg(feature = "progress")]
    /// Returned when the progress bar template is invalid
    #[error("Progress template error: {0}")]
    Template(#[from] indicatif::style::TemplateError),
}

/// Alias for Result<T, brisk::Error>
pub type Result<T> = std::result::Result<T, Error>;
