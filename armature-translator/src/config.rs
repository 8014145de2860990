//! Translator Configuration
//!
//! Bootstrap settings for [`crate::MessageResolver`], loadable from a JSON or
//! TOML file, from environment variables, or from a `.env` file.
//!
//! ```toml
//! global_dir = "/srv/app/i18n"
//! modules_dir = "/srv/app/modules"
//! default_module = "system"
//! default_controller = "index"
//! default_language = "pt_BR"
//! ```

use crate::loader::FileFormat;
use crate::{Result, TranslatorError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODULE: &str = "system";
pub const DEFAULT_CONTROLLER: &str = "index";
pub const DEFAULT_LANGUAGE: &str = "pt_BR";

/// Resolver bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Root of custom message files (`<global_dir>/<language>/<file>`)
    pub global_dir: PathBuf,
    /// Root of per-module base messages
    pub modules_dir: PathBuf,
    #[serde(default = "default_module")]
    pub default_module: String,
    #[serde(default = "default_controller")]
    pub default_controller: String,
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_module() -> String {
    DEFAULT_MODULE.to_string()
}

fn default_controller() -> String {
    DEFAULT_CONTROLLER.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl TranslatorConfig {
    /// Create a config with the default module, controller and language.
    pub fn new(global_dir: impl Into<PathBuf>, modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_dir: global_dir.into(),
            modules_dir: modules_dir.into(),
            default_module: default_module(),
            default_controller: default_controller(),
            default_language: default_language(),
        }
    }

    /// Load from a `.json` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileFormat::from_extension)
            .ok_or_else(|| {
                TranslatorError::ConfigError(format!("Unsupported config format: {:?}", path))
            })?;

        let content = fs::read_to_string(path)?;
        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `<PREFIX>_GLOBAL_DIR`, `<PREFIX>_MODULES_DIR`,
    /// `<PREFIX>_DEFAULT_MODULE`, `<PREFIX>_DEFAULT_CONTROLLER` and
    /// `<PREFIX>_DEFAULT_LANGUAGE`. The two directories are required.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let var = |name: &str| env::var(format!("{}_{}", prefix, name)).ok();
        let required = |name: &str| {
            var(name).ok_or_else(|| {
                TranslatorError::ConfigError(format!("{}_{} is not set", prefix, name))
            })
        };

        let config = Self {
            global_dir: required("GLOBAL_DIR")?.into(),
            modules_dir: required("MODULES_DIR")?.into(),
            default_module: var("DEFAULT_MODULE").unwrap_or_else(default_module),
            default_controller: var("DEFAULT_CONTROLLER").unwrap_or_else(default_controller),
            default_language: var("DEFAULT_LANGUAGE").unwrap_or_else(default_language),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load a `.env` file into the process environment, then [`Self::from_env`].
    ///
    /// With no path, a missing `.env` in the working directory is ignored.
    pub fn from_dotenv(path: Option<&Path>, prefix: &str) -> Result<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)
                    .map_err(|e| TranslatorError::ConfigError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_env(prefix)
    }

    /// Reject empty directories and identifiers.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("global_dir", self.global_dir.as_os_str().is_empty()),
            ("modules_dir", self.modules_dir.as_os_str().is_empty()),
            ("default_module", self.default_module.trim().is_empty()),
            ("default_controller", self.default_controller.trim().is_empty()),
            ("default_language", self.default_language.trim().is_empty()),
        ];

        match checks.iter().find(|(_, empty)| *empty) {
            Some((field, _)) => Err(TranslatorError::ConfigError(format!(
                "{} must not be empty",
                field
            ))),
            None => Ok(()),
        }
    }
}
