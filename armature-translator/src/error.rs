//! Error types for translation operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or formatting messages.
///
/// A missing translation key is not an error: lookups fall back to a
/// bracketed echo of the key instead.
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// A base or custom message resource could not be located
    #[error("Could not find the translation file \"{resource}\" at \"{}\"", .root.display())]
    TranslationFileNotFound { resource: String, root: PathBuf },

    /// Loader-level not-found signal
    #[error("Message resource not found: {0:?}")]
    ResourceNotFound(PathBuf),

    /// A custom file was requested before any language was activated
    #[error("No active language; cannot load custom messages from {filename}")]
    LanguageNotSet { filename: String },

    /// Failed to parse a message resource
    #[error("Failed to parse message resource: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Placeholder/argument mismatch
    #[error("Format error: {0}")]
    FormatError(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TranslatorError {
    /// Whether this error means "the requested resource does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TranslatorError::TranslationFileNotFound { .. } | TranslatorError::ResourceNotFound(_)
        )
    }
}
