// Registry error types

use hyper::StatusCode;
use thiserror::Error;

/// Rejection reasons for registry operations
///
/// The `Display` text is returned verbatim to clients as the `detail` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Activity not found")]
    NotFound,

    #[error("Student is already signed up for this activity")]
    AlreadyRegistered,

    #[error("Student is not signed up for this activity")]
    NotRegistered,

    #[error("Activity is full")]
    ActivityFull,
}

impl RegistryError {
    /// HTTP status the boundary layer reports for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyRegistered | Self::NotRegistered | Self::ActivityFull => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// Errors raised while loading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid seed data: {0}")]
    Invalid(String),
}
