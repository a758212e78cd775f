use std::collections::BTreeMap;

use thiserror::Error;

/// Uniform failure shape for every catalog service call. The HTTP adapter
/// classifies transport and status outcomes into exactly one of these;
/// the controller turns them into user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("book not found")]
    NotFound,

    /// Field name → validation message, as the server reports them on 400.
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    /// The insight generator answered 503.
    #[error("insight service unavailable")]
    ServiceUnavailable,

    /// The service could not be reached at all.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success HTTP status.
    #[error("server error {status}")]
    Server { status: u16, message: Option<String> },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// "Error {status}: {message}" in the shape the UI alerts use.
    pub fn server_alert(&self) -> Option<String> {
        match self {
            Self::Server { status, message } => Some(format!(
                "Error {status}: {}",
                message.as_deref().unwrap_or("Something went wrong")
            )),
            _ => None,
        }
    }
}

/// Errors from loading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
