/// Engine configuration: where templates live and how they are named.
use std::path::{Path, PathBuf};

/// Environment variable naming the templates directory.
pub const TEMPLATES_DIR_ENV: &str = "PPTX_TEMPLATES_DIR";

const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_TEMPLATE: &str = "default";
const DEFAULT_EXTENSION: &str = "pptx";

/// Configuration for the template engine.
///
/// Templates are looked up by exact name plus a fixed extension inside a
/// single directory. Subdirectories are never searched.
///
/// # Examples
///
/// ```rust
/// use pptx_templater::template::EngineConfig;
///
/// let config = EngineConfig::new("/srv/templates")
///     .with_default_template("corporate")
///     .with_extension("potx");
/// assert_eq!(
///     config.template_path("q1").unwrap(),
///     std::path::Path::new("/srv/templates/q1.potx")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding the template files
    pub templates_dir: PathBuf,
    /// Template used when a request names none
    pub default_template: String,
    /// File extension of template files, without the dot
    pub extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATES_DIR)
    }
}

impl EngineConfig {
    /// Configuration for templates stored in `templates_dir`.
    pub fn new<P: Into<PathBuf>>(templates_dir: P) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            default_template: DEFAULT_TEMPLATE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Read the templates directory from `PPTX_TEMPLATES_DIR`, falling back
    /// to `templates`.
    pub fn from_env() -> Self {
        match std::env::var_os(TEMPLATES_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    #[inline]
    pub fn with_default_template<S: Into<String>>(mut self, name: S) -> Self {
        self.default_template = name.into();
        self
    }

    #[inline]
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    #[inline]
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Path of the template file called `name`.
    ///
    /// Returns `None` for names that could escape the templates directory:
    /// empty names, path separators, and parent references.
    pub fn template_path(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return None;
        }
        Some(self.templates_dir.join(format!("{}.{}", name, self.extension)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.default_template, "default");
        assert_eq!(
            config.template_path("default"),
            Some(PathBuf::from("templates").join("default.pptx"))
        );
    }

    #[test]
    fn test_unsafe_names_rejected() {
        let config = EngineConfig::new("t");
        assert_eq!(config.template_path(""), None);
        assert_eq!(config.template_path("../secret"), None);
        assert_eq!(config.template_path("a/b"), None);
        assert_eq!(config.template_path("a\\b"), None);
        assert_eq!(config.template_path(".."), None);
        assert!(config.template_path("report.v2").is_some());
    }
}
