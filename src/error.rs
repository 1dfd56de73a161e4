use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or log file setup.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid start path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Invalid configuration value.
    #[error("Config error: {0}")]
    Config(String),
}

/// Why a directory listing could not be produced.
///
/// Any of these leaves the affected pane empty; none of them stops navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The directory vanished between request and completion.
    #[error("not found")]
    NotFound,

    /// Enumeration was forbidden.
    #[error("permission denied")]
    PermissionDenied,

    /// Any other backend failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ProviderError::NotFound,
            std::io::ErrorKind::PermissionDenied => ProviderError::PermissionDenied,
            _ => ProviderError::Io(err.to_string()),
        }
    }
}
