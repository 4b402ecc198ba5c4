//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Per-item variants (`Decode`, `Persist`, `HttpStatus`, `MalformedIdentifier`)
//! are what batch reports carry; the rest are setup failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image couldn't be retrieved: {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Transfer of {url} broke off: {source}")]
    Transfer {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed identifier {identifier:?}: expected a segment after '{delimiter}'")]
    MalformedIdentifier { identifier: String, delimiter: char },

    #[error("Cannot open file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot save file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid profile {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn persist<E>(path: impl Into<PathBuf>, e: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Persist {
            path: path.into(),
            source: e.into(),
        }
    }

    /// Short machine-friendly label used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Http(_) | Error::HttpStatus { .. } | Error::Transfer { .. } => "network",
            Error::MalformedIdentifier { .. } => "malformed_identifier",
            Error::Decode { .. } => "decode",
            Error::Persist { .. } => "persist",
            Error::Resize(_) => "resize",
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::Config { .. } => "config",
        }
    }
}

impl From<fast_image_resize::ResizeError> for Error {
    fn from(e: fast_image_resize::ResizeError) -> Self {
        Error::Resize(e.to_string())
    }
}

impl From<fast_image_resize::ImageBufferError> for Error {
    fn from(e: fast_image_resize::ImageBufferError) -> Self {
        Error::Resize(e.to_string())
    }
}
