use std::time::Duration;
use thiserror::Error;

/// Failure of a single network call against an upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode upstream payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Connection failures, timeouts, 5xx and rate limiting are worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Decode(_) => false,
        }
    }

    /// A 4xx the upstream will keep answering the same way.
    pub fn is_rejection(&self) -> bool {
        matches!(self, FetchError::Status { status, .. } if (400..500).contains(status) && *status != 429)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("credential exchange failed: {0}")]
    Exchange(FetchError),
    #[error("credential exchange returned no usable token")]
    MissingToken,
}

/// Error type shared by every upstream collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Typed failure handed to the route layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("nothing found for '{name}'")]
    NotFound { name: String },
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl LookupError {
    pub fn not_found(name: &str) -> Self {
        LookupError::NotFound {
            name: name.to_string(),
        }
    }
}

impl From<FetchError> for LookupError {
    fn from(error: FetchError) -> Self {
        LookupError::Source(SourceError::Fetch(error))
    }
}

impl From<CredentialError> for LookupError {
    fn from(error: CredentialError) -> Self {
        LookupError::Source(SourceError::Credential(error))
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache payload could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}
