use thiserror::Error;

/// Error type for the persistence and configuration edges of the core.
///
/// Financial computations never fail; only I/O around the stored document can.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure modes of [`crate::currency::parse_currency_input`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyParseError {
    #[error("no digits found in `{0}`")]
    NoDigits(String),
    #[error("amount `{0}` is too large")]
    Overflow(String),
}
