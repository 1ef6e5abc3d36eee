use thiserror::Error;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the crate.
///
/// The preparation pipeline itself never fails — it is designed to always
/// produce a usable request (see the crate docs). The only fallible surface
/// is loading and validating capability override files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("override file parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("validation error: {message}")]
    Validation { message: String },
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}
