use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// Operation string or rear text does not follow the expected pattern.
    #[error("format error: {0}")]
    Format(String),

    /// A configuration value has no sane default (e.g. an unknown page size).
    #[error("configuration error: {0}")]
    Configuration(String),
}
