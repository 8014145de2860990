//! Request Path Resolution
//!
//! Derives the `(module, controller)` pair that selects a base message
//! resource from the current request path.
//!
//! ```
//! use armature_translator::RouteTarget;
//!
//! let target = RouteTarget::from_path("/Blog/Post/42?x=1", "system", "index");
//! assert_eq!(target.module, "blog");
//! assert_eq!(target.controller, "post");
//! assert_eq!(target.resource("en_US"), "blog/messages/en_US/post-controller");
//! ```

/// Source of the current request path.
///
/// Injected into [`crate::MessageResolver`] so it never reads ambient
/// request state. Return `None` when no request is in flight.
pub trait RequestPathProvider {
    fn request_path(&self) -> Option<String>;
}

impl<F> RequestPathProvider for F
where
    F: Fn() -> Option<String>,
{
    fn request_path(&self) -> Option<String> {
        self()
    }
}

/// Provider that always yields the same path.
#[derive(Debug, Clone)]
pub struct StaticPath(String);

impl StaticPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl RequestPathProvider for StaticPath {
    fn request_path(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Lower-cased module/controller pair locating a base message resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub module: String,
    pub controller: String,
}

impl RouteTarget {
    /// Resolve a request path.
    ///
    /// The query string is dropped and `\` is treated as `/`. The second and
    /// third segments name the module and controller; a path with fewer than
    /// three segments, or with either segment empty, resolves to the defaults.
    pub fn from_path(path: &str, default_module: &str, default_controller: &str) -> Self {
        let (mut module, mut controller) = ("", "");

        let route = path.split('?').next().unwrap_or_default();
        let normalized = route.replace('\\', "/");

        if !normalized.is_empty() {
            let segments: Vec<&str> = normalized.split('/').collect();
            if segments.len() >= 3 {
                module = segments[1];
                controller = segments[2];
            }
        }

        if module.is_empty() || controller.is_empty() {
            module = default_module;
            controller = default_controller;
        }

        Self {
            module: module.to_ascii_lowercase(),
            controller: controller.to_ascii_lowercase(),
        }
    }

    /// Resource identifier of this target's messages in `language`.
    pub fn resource(&self, language: &str) -> String {
        format!(
            "{}/messages/{}/{}-controller",
            self.module, language, self.controller
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: &str) -> RouteTarget {
        RouteTarget::from_path(path, "system", "index")
    }

    #[test]
    fn test_module_and_controller() {
        let target = resolve("/blog/post/42?x=1");
        assert_eq!(target.module, "blog");
        assert_eq!(target.controller, "post");
    }

    #[test]
    fn test_two_segments_is_enough() {
        let target = resolve("/blog/post");
        assert_eq!(target.module, "blog");
        assert_eq!(target.controller, "post");
    }

    #[test]
    fn test_lowercases() {
        let target = resolve("/Admin/UserGroups");
        assert_eq!(target.resource("pt_BR"), "admin/messages/pt_BR/usergroups-controller");
    }

    #[test]
    fn test_lowercase_is_ascii_only() {
        let target = resolve("/Ärger/ÜBER");
        assert_eq!(target.module, "Ärger");
        assert_eq!(target.controller, "Über");
    }

    #[test]
    fn test_backslash_separators() {
        let target = resolve("\\shop\\cart\\view");
        assert_eq!(target.module, "shop");
        assert_eq!(target.controller, "cart");
    }

    #[test]
    fn test_defaults() {
        for path in ["", "/", "/blog", "/?q=1", "//post", "/blog/", "?x=/a/b"] {
            let target = resolve(path);
            assert_eq!(target.module, "system", "path {:?}", path);
            assert_eq!(target.controller, "index", "path {:?}", path);
        }
    }

    #[test]
    fn test_default_resource() {
        assert_eq!(
            resolve("").resource("en_US"),
            "system/messages/en_US/index-controller"
        );
    }

    #[test]
    fn test_providers() {
        let fixed = StaticPath::new("/a/b");
        assert_eq!(fixed.request_path().as_deref(), Some("/a/b"));

        let closure = || Some("/c/d".to_string());
        assert_eq!(closure.request_path().as_deref(), Some("/c/d"));

        let none = || None::<String>;
        assert_eq!(none.request_path(), None);
    }
}
