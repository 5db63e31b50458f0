// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Http(FetchError),
    Content(String),
    Config(String),
    Image(String),
    Io(String),
}

/// Specific error types for content-store fetch failures.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// The request did not complete within the client timeout
    Timeout,

    /// The content service could not be reached at all
    Connect,

    /// The service answered with a non-success HTTP status
    Status(u16),

    /// The response body could not be decoded into the expected documents
    Decode(String),

    /// Generic error with raw message
    Other(String),
}

impl FetchError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FetchError::Timeout => "error-fetch-timeout",
            FetchError::Connect => "error-fetch-connect",
            FetchError::Status(_) => "error-fetch-status",
            FetchError::Decode(_) => "error-fetch-decode",
            FetchError::Other(_) => "error-fetch-general",
        }
    }

    /// Categorizes a transport error from the HTTP client.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        if err.is_connect() {
            return FetchError::Connect;
        }
        if let Some(status) = err.status() {
            return FetchError::Status(status.as_u16());
        }
        if err.is_decode() || err.is_body() {
            return FetchError::Decode(err.to_string());
        }
        FetchError::Other(err.to_string())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => write!(f, "Request timed out"),
            FetchError::Connect => write!(f, "Could not connect to the content service"),
            FetchError::Status(code) => write!(f, "Content service returned HTTP {}", code),
            FetchError::Decode(msg) => write!(f, "Could not decode response: {}", msg),
            FetchError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Content(e) => write!(f, "Content Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Http(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(FetchError::from_reqwest(&err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Content(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
