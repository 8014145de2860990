//! Route-aware Message Translation for Armature
//!
//! Looks up localized message patterns by key:
//!
//! - **Base messages**: selected per language from the module/controller
//!   named in the request path (`/blog/post/42` → `blog/messages/<lang>/post-controller`)
//! - **Custom messages**: override files merged on demand, checked first
//! - **Positional formatting**: printf-style placeholders (`Post %s`, `%2$s`, `%05.2f`)
//! - **Soft misses**: an unknown key translates to `[key]`, never an error
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use armature_translator::{FormatArg, MessageResolver};
//!
//! let mut resolver = MessageResolver::new("/srv/i18n", "/srv/modules");
//! resolver.set_request_path("/blog/post/42?x=1");
//! resolver.set_language("en_US")?;
//!
//! resolver.translate("title", &[FormatArg::from("42")]);  // "Post 42"
//! resolver.translate("missing.key", &[]);                 // "[missing.key]"
//! ```
//!
//! # Message Files
//!
//! Resources are JSON or TOML; nested tables become dotted keys.
//!
//! ```json
//! { "title": "Post %s", "errors": { "required": "%s is required" } }
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use armature_translator::{MessageResolver, TranslatorConfig};
//!
//! let config = TranslatorConfig::from_env("ARMATURE_I18N")?;
//! let mut resolver = MessageResolver::from_config(&config);
//! resolver.set_language_or("en_US", &config.default_language)?;
//! ```

mod config;
mod error;
mod format;
mod loader;
mod logging;
mod messages;
mod resolver;
mod route;

pub use config::{DEFAULT_CONTROLLER, DEFAULT_LANGUAGE, DEFAULT_MODULE, TranslatorConfig};
pub use error::TranslatorError;
pub use format::{FormatArg, sprintf};
pub use loader::{FileFormat, FileLoader, MemoryLoader, MessageLoader};
pub use logging::{
    Format as LogFormat, Level as LogLevel, LogConfig, init as init_logging,
    set_level as set_log_level,
};
pub use messages::{MessageMap, merge_messages};
pub use resolver::MessageResolver;
pub use route::{RequestPathProvider, RouteTarget, StaticPath};

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        FormatArg, MessageLoader, MessageMap, MessageResolver, RequestPathProvider, Result,
        TranslatorConfig, TranslatorError,
    };
}
