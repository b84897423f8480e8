//! Error types for caller lookup

use thiserror::Error;

/// Failure of a remote lookup call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Provider rejected the request (invalid number, auth, quota, ...)
    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },

    /// Request never produced a provider answer
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with a body we could not read
    #[error("decode error: {0}")]
    Decode(String),

    /// Caller-name sub-result carried an error code that is not a number
    #[error("invalid caller error code: {0}")]
    InvalidCallerErrorCode(String),
}

impl LookupError {
    /// Short category name shown with unexpected failures
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Provider { .. } => "ProviderError",
            Self::Transport(_) => "TransportError",
            Self::Decode(_) => "DecodeError",
            Self::InvalidCallerErrorCode(_) => "FormatError",
        }
    }

    /// Errors reported against the phone number field rather than as a
    /// generic page error.
    pub fn is_provider_level(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Transport(_))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Startup configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required setting absent or blank
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// Settings file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// Base URL is not a usable URL
    #[error("invalid base url {0}")]
    InvalidBaseUrl(String),
}

/// Result type for lookup calls
pub type LookupResult<T> = Result<T, LookupError>;
