//! Error types shared by the couplebot crates.

use thiserror::Error;

/// Failures below the domain: files, serialization, configuration.
///
/// Game rule violations are [`crate::hangman::GameError`]; a `BotError`
/// reaching a game operation is wrapped in `GameError::Storage`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BotError {
    #[error("IO error: {message}")]
    Io { message: String },

    /// Storage backend refused the operation (e.g. a file lock could not be taken)
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: &'static str, // "TOML" or "JSON"
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Should not happen in normal operation (e.g. a storage task panicked)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON",
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML",
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BotError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML",
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: BotError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: BotError = parse.unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse = toml::from_str::<toml::Value>("key = ");
        let err: BotError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error: TOML"));
    }
}
