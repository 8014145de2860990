//! Message Resource Loading
//!
//! A [`MessageLoader`] turns a root directory plus a resource identifier
//! (e.g. `blog/messages/en_US/post-controller`) into a [`MessageMap`], or
//! reports [`TranslatorError::ResourceNotFound`].

use crate::logging::{debug, error};
use crate::{MessageMap, Result, TranslatorError};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Capability to load a message mapping by resource identifier.
pub trait MessageLoader {
    /// Load `resource` relative to `root`.
    ///
    /// An existing resource that declares no messages yields an empty map.
    fn load(&self, root: &Path, resource: &str) -> Result<MessageMap>;
}

impl<L: MessageLoader + ?Sized> MessageLoader for Box<L> {
    fn load(&self, root: &Path, resource: &str) -> Result<MessageMap> {
        (**self).load(root, resource)
    }
}

/// Supported message file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Toml => "toml",
        }
    }

    /// Parse file content in this format.
    pub fn parse(&self, content: &str) -> Result<MessageMap> {
        match self {
            FileFormat::Json => MessageMap::from_json(content),
            FileFormat::Toml => MessageMap::from_toml(content),
        }
    }
}

/// Filesystem loader.
///
/// A resource without a recognised extension is tried with each configured
/// format's extension in order (`post-controller.json`, then
/// `post-controller.toml`). Resources that would escape `root` are reported
/// as not found.
#[derive(Debug, Clone)]
pub struct FileLoader {
    formats: Vec<FileFormat>,
}

impl FileLoader {
    /// Create a loader trying JSON, then TOML.
    pub fn new() -> Self {
        Self {
            formats: vec![FileFormat::Json, FileFormat::Toml],
        }
    }

    /// Restrict/reorder the formats tried for extensionless resources.
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = FileFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    fn candidates(&self, path: &Path) -> Vec<(PathBuf, FileFormat)> {
        let explicit = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileFormat::from_extension);

        if let Some(format) = explicit {
            return vec![(path.to_path_buf(), format)];
        }

        self.formats
            .iter()
            .map(|format| {
                let mut file: OsString = path.as_os_str().to_owned();
                file.push(".");
                file.push(format.extension());
                (PathBuf::from(file), *format)
            })
            .collect()
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLoader for FileLoader {
    fn load(&self, root: &Path, resource: &str) -> Result<MessageMap> {
        let relative = Path::new(resource.trim_start_matches(['/', '\\']));
        let path = root.join(relative);

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            debug!("Rejecting resource outside root: {:?}", path);
            return Err(TranslatorError::ResourceNotFound(path));
        }

        for (file, format) in self.candidates(&path) {
            if file.is_file() {
                debug!("Loading messages from {:?}", file);
                let content = fs::read_to_string(&file)?;
                return format.parse(&content).inspect_err(|e| {
                    error!("Failed to parse {:?}: {}", file, e);
                });
            }
        }

        Err(TranslatorError::ResourceNotFound(path))
    }
}

/// In-memory loader, keyed by `root/resource`.
///
/// Useful for embedded bundles and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<PathBuf, MessageMap>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource.
    pub fn with_resource(
        mut self,
        root: impl AsRef<Path>,
        resource: &str,
        messages: MessageMap,
    ) -> Self {
        self.insert(root, resource, messages);
        self
    }

    pub fn insert(&mut self, root: impl AsRef<Path>, resource: &str, messages: MessageMap) {
        self.resources
            .insert(root.as_ref().join(resource), messages);
    }
}

impl MessageLoader for MemoryLoader {
    fn load(&self, root: &Path, resource: &str) -> Result<MessageMap> {
        let path = root.join(resource);
        self.resources
            .get(&path)
            .cloned()
            .ok_or(TranslatorError::ResourceNotFound(path))
    }
}
