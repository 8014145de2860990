//! Message Resolver
//!
//! Resolves translation keys against two message maps:
//!
//! 1. **custom** messages, merged in by [`MessageResolver::add_custom_language_file`]
//! 2. **base** messages, selected by [`MessageResolver::set_language`] from the
//!    module/controller named in the current request path
//!
//! A key found in neither map translates to `[key]`.

use crate::format::{FormatArg, sprintf};
use crate::loader::{FileLoader, MessageLoader};
use crate::logging::{debug, info, trace, warn};
use crate::route::{RequestPathProvider, RouteTarget};
use crate::{MessageMap, Result, TranslatorConfig, TranslatorError};
use std::path::{Path, PathBuf};

/// Route-aware translation lookup.
///
/// Not synchronized: use one resolver per request or session.
///
/// # Example
///
/// ```rust,ignore
/// use armature_translator::{FormatArg, MessageResolver};
///
/// let mut resolver = MessageResolver::new("/srv/i18n", "/srv/modules");
/// resolver.set_request_path("/blog/post/42?x=1");
/// resolver.set_language("en_US")?;          // blog/messages/en_US/post-controller
/// resolver.add_custom_language_file("overrides")?;
///
/// let title = resolver.translate("title", &[FormatArg::from("42")]);
/// ```
pub struct MessageResolver {
    global_dir: PathBuf,
    modules_dir: PathBuf,
    default_module: String,
    default_controller: String,
    language: Option<String>,
    messages: MessageMap,
    custom_messages: MessageMap,
    request_path: Option<String>,
    loader: Box<dyn MessageLoader>,
    path_provider: Option<Box<dyn RequestPathProvider>>,
}

impl std::fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageResolver")
            .field("global_dir", &self.global_dir)
            .field("modules_dir", &self.modules_dir)
            .field("language", &self.language)
            .field("messages", &self.messages.len())
            .field("custom_messages", &self.custom_messages.len())
            .field("request_path", &self.request_path)
            .finish_non_exhaustive()
    }
}

impl MessageResolver {
    /// Create a resolver reading files from the two roots.
    ///
    /// Defaults to module `system`, controller `index`. No I/O happens here.
    pub fn new(global_dir: impl Into<PathBuf>, modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_dir: global_dir.into(),
            modules_dir: modules_dir.into(),
            default_module: crate::config::DEFAULT_MODULE.to_string(),
            default_controller: crate::config::DEFAULT_CONTROLLER.to_string(),
            language: None,
            messages: MessageMap::new(),
            custom_messages: MessageMap::new(),
            request_path: None,
            loader: Box::new(FileLoader::new()),
            path_provider: None,
        }
    }

    /// Create a resolver from bootstrap configuration.
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(&config.global_dir, &config.modules_dir)
            .with_defaults(&config.default_module, &config.default_controller)
    }

    /// Set the module/controller used when the request path names none.
    pub fn with_defaults(
        mut self,
        module: impl Into<String>,
        controller: impl Into<String>,
    ) -> Self {
        self.default_module = module.into();
        self.default_controller = controller.into();
        self
    }

    /// Replace the resource loader.
    pub fn with_loader(mut self, loader: impl MessageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Source the request path from `provider` when none was set explicitly.
    pub fn with_path_provider(mut self, provider: impl RequestPathProvider + 'static) -> Self {
        self.path_provider = Some(Box::new(provider));
        self
    }

    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    pub fn set_request_path(&mut self, path: impl Into<String>) {
        self.request_path = Some(path.into());
    }

    /// The request path, pulled once from the provider if never set.
    ///
    /// Without a provider this is the empty string.
    pub fn request_path(&mut self) -> &str {
        if self.request_path.is_none() {
            let pulled = self
                .path_provider
                .as_ref()
                .and_then(|provider| provider.request_path())
                .unwrap_or_default();
            trace!("Request path pulled from provider: {:?}", pulled);
            self.request_path = Some(pulled);
        }

        self.request_path.as_deref().unwrap_or_default()
    }

    /// Load base messages for `language` from the current route.
    ///
    /// Exactly `language` is attempted. A resource that loads but holds no
    /// messages leaves the resolver unchanged. On failure the previous
    /// language and base messages are kept.
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        let path = self.request_path().to_string();
        let target = RouteTarget::from_path(&path, &self.default_module, &self.default_controller);
        let resource = target.resource(language);

        debug!(
            "Resolved {:?} to module={} controller={} resource={}",
            path, target.module, target.controller, resource
        );

        let loaded = self
            .loader
            .load(&self.modules_dir, &resource)
            .map_err(|e| self.file_not_found(e, resource.clone()))?;

        if loaded.is_empty() {
            warn!("Resource {} holds no messages; keeping current language", resource);
            return Ok(());
        }

        info!(
            "Activated language {} ({} messages from {})",
            language,
            loaded.len(),
            resource
        );
        self.messages = loaded;
        self.language = Some(language.to_string());
        Ok(())
    }

    /// Like [`Self::set_language`], but retries once with `default` when the
    /// resource for `language` does not exist.
    pub fn set_language_or(&mut self, language: &str, default: &str) -> Result<()> {
        match self.set_language(language) {
            Err(e) if e.is_not_found() && language != default => {
                warn!("{}; falling back to {}", e, default);
                self.set_language(default)
            }
            other => other,
        }
    }

    /// Merge `<global_dir>/<language>/<filename>` into the custom messages.
    ///
    /// Keys from the new file replace existing custom keys.
    pub fn add_custom_language_file(&mut self, filename: &str) -> Result<()> {
        let language = self
            .language
            .as_deref()
            .ok_or_else(|| TranslatorError::LanguageNotSet {
                filename: filename.to_string(),
            })?;
        let resource = format!("{}/{}", language, filename);

        let loaded = self
            .loader
            .load(&self.global_dir, &resource)
            .map_err(|e| self.file_not_found(e, resource.clone()))?;

        debug!("Merging {} custom messages from {}", loaded.len(), resource);
        self.custom_messages.extend_from(loaded);
        Ok(())
    }

    /// Drop all custom messages. Base messages are untouched.
    pub fn clear_custom_language_messages(&mut self) {
        self.custom_messages = MessageMap::new();
    }

    /// Translate `key`, substituting `params` into the pattern.
    ///
    /// Returns `[key]` when the key is unknown. With no params the pattern is
    /// returned as-is. If substitution fails the raw pattern is returned.
    pub fn translate(&self, key: &str, params: &[FormatArg]) -> String {
        match self.try_translate(key, params) {
            Ok(message) => message,
            Err(e) => {
                warn!("Cannot format message {}: {}", key, e);
                self.translation_pattern(key).unwrap_or(key).to_string()
            }
        }
    }

    /// Alias for [`Self::translate`].
    pub fn t(&self, key: &str, params: &[FormatArg]) -> String {
        self.translate(key, params)
    }

    /// Alias for [`Self::translate`].
    pub fn query(&self, key: &str, params: &[FormatArg]) -> String {
        self.translate(key, params)
    }

    /// Translate, surfacing placeholder/argument mismatches.
    pub fn try_translate(&self, key: &str, params: &[FormatArg]) -> Result<String> {
        match self.translation_pattern(key) {
            None => Ok(format!("[{}]", key)),
            Some(pattern) if params.is_empty() => Ok(pattern.to_string()),
            Some(pattern) => sprintf(pattern, params),
        }
    }

    /// Raw pattern for `key`, custom messages first.
    pub fn translation_pattern(&self, key: &str) -> Option<&str> {
        self.custom_messages
            .get(key)
            .or_else(|| self.messages.get(key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.custom_messages.contains(key) || self.messages.contains(key)
    }

    /// Active language, if one was set successfully.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Base messages of the active language.
    pub fn messages(&self) -> &MessageMap {
        &self.messages
    }

    pub fn custom_messages(&self) -> &MessageMap {
        &self.custom_messages
    }

    fn file_not_found(&self, err: TranslatorError, resource: String) -> TranslatorError {
        match err {
            TranslatorError::ResourceNotFound(path) => {
                warn!("Translation resource missing: {:?}", path);
                TranslatorError::TranslationFileNotFound {
                    resource,
                    root: self.global_dir.clone(),
                }
            }
            other => other,
        }
    }
}
