//! Configuration structures for the showcase pipeline.
//!
//! - [`ShowcaseConfig`] - the raw `showcase.config.json` schema (camelCase)
//! - [`WatchConfig`] - file watcher settings (debouncing, recursion)
//! - [`ResolvedConfig`] - validated configuration with absolute paths
//!
//! A config is loaded once per command and never mutated afterwards. Every
//! relative path is resolved against the directory that contains the config
//! file (or an explicit root), so nothing downstream depends on the process
//! working directory.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::path::{absolutize, normalize};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "showcase.config.json";

/// Exclusion patterns applied when the config does not name its own.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/*.test.*",
    "**/*.spec.*",
];

/// Configuration for the file watcher.
///
/// # Examples
///
/// ```
/// use sc_core::WatchConfig;
///
/// let config = WatchConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.debounce_ms, 100);
/// assert!(config.recursive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchConfig {
    /// Whether `watch` mode may start a file watcher at all.
    pub enabled: bool,

    /// Debounce window in milliseconds.
    ///
    /// Multiple file changes within this window are batched into a single event.
    pub debounce_ms: u64,

    /// Whether to watch subdirectories recursively.
    pub recursive: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 100,
            recursive: true,
        }
    }
}

/// The `showcase.config.json` schema, as written by the user.
///
/// Every field except `showcasePaths` has a default. Use [`ShowcaseConfig::resolve`]
/// to validate it and turn relative paths into absolute ones.
///
/// # Examples
///
/// ```
/// use sc_core::ShowcaseConfig;
///
/// let config = ShowcaseConfig::from_json_str(
///     r#"{ "showcasePaths": ["src/**/*.showcase.tsx"], "port": 7000 }"#,
/// ).unwrap();
/// assert_eq!(config.port, 7000);
/// assert_eq!(config.title, "Showcase");
///
/// let resolved = config.resolve("/proj").unwrap();
/// assert_eq!(resolved.out_dir, "/proj/dist/showcase");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowcaseConfig {
    /// Glob patterns selecting showcase files, relative to the root.
    pub showcase_paths: Vec<String>,

    /// Glob patterns removed from the union of matches.
    pub exclude: Vec<String>,

    /// Title shown by the showcase UI.
    pub title: String,

    /// Dev server port. Kept wide here so out-of-range values reach validation.
    pub port: u32,

    /// Output directory for static builds.
    pub out_dir: Utf8PathBuf,

    /// Public base path of the showcase site.
    pub base: String,

    /// Stylesheet injected into every preview.
    pub global_css: Option<Utf8PathBuf>,

    /// Module wrapping every preview in a provider component.
    pub global_provider: Option<Utf8PathBuf>,

    /// Tailwind configuration forwarded to the host.
    pub tailwind_config: Option<Utf8PathBuf>,

    /// File watcher settings.
    pub watch: WatchConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            showcase_paths: Vec::new(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| (*s).to_owned()).collect(),
            title: "Showcase".to_owned(),
            port: 6060,
            out_dir: Utf8PathBuf::from("dist/showcase"),
            base: "/".to_owned(),
            global_css: None,
            global_provider: None,
            tailwind_config: None,
            watch: WatchConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Creates a config with the given patterns and defaults everywhere else.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            showcase_paths: patterns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses a config from JSON text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a config file without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file does not exist, or an
    /// I/O or parse error.
    pub fn load_raw(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_owned()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Loads, validates and resolves a config file.
    ///
    /// The root becomes the directory containing the file.
    ///
    /// # Errors
    ///
    /// Returns any error from [`ShowcaseConfig::load_raw`] or
    /// [`ShowcaseConfig::resolve`], or [`ConfigError::InvalidPath`] if the
    /// file's location cannot be expressed as UTF-8.
    pub fn load(path: &Utf8Path) -> Result<ResolvedConfig, ConfigError> {
        let raw = Self::load_raw(path)?;
        let canonical = path.canonicalize_utf8().map_err(|e| {
            ConfigError::invalid_path(path, format!("cannot canonicalize: {e}"))
        })?;
        let root = canonical
            .parent()
            .map(Utf8Path::to_path_buf)
            .ok_or_else(|| ConfigError::invalid_path(&canonical, "has no parent directory"))?;

        tracing::debug!(config = %canonical, root = %root, "loaded configuration");
        raw.resolve(root)
    }

    /// Checks every option for a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first violated option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.showcase_paths.is_empty() {
            return Err(ConfigError::invalid_option(
                "showcasePaths",
                "must contain at least one pattern",
            ));
        }
        if self.showcase_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid_option(
                "showcasePaths",
                "patterns must not be blank",
            ));
        }
        if self.exclude.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid_option(
                "exclude",
                "patterns must not be blank",
            ));
        }
        if !(1..=u32::from(u16::MAX)).contains(&self.port) {
            return Err(ConfigError::invalid_option(
                "port",
                format!("must be between 1 and 65535, got {}", self.port),
            ));
        }
        if !self.base.starts_with('/') {
            return Err(ConfigError::invalid_option("base", "must start with '/'"));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::invalid_option("title", "must not be empty"));
        }
        Ok(())
    }

    /// Validates the config and resolves every path against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `root` is relative, or the
    /// first [`ConfigError::InvalidOption`] found by [`ShowcaseConfig::validate`].
    pub fn resolve(self, root: impl Into<Utf8PathBuf>) -> Result<ResolvedConfig, ConfigError> {
        let root = root.into();
        if !root.is_absolute() {
            return Err(ConfigError::invalid_path(root, "root must be absolute"));
        }
        self.validate()?;

        let root = normalize(&root);
        let port = u16::try_from(self.port)
            .map_err(|_| ConfigError::invalid_option("port", "must fit in 16 bits"))?;
        let resolve_opt = |p: Option<Utf8PathBuf>| p.map(|p| absolutize(&root, &p));

        Ok(ResolvedConfig {
            out_dir: absolutize(&root, &self.out_dir),
            global_css: resolve_opt(self.global_css),
            global_provider: resolve_opt(self.global_provider),
            tailwind_config: resolve_opt(self.tailwind_config),
            showcase_paths: self.showcase_paths,
            exclude: self.exclude,
            title: self.title,
            port,
            base: self.base,
            watch: self.watch,
            root,
        })
    }
}

/// A validated configuration whose paths are all absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Discovery root; patterns are matched below it.
    pub root: Utf8PathBuf,

    /// Showcase glob patterns, as configured.
    pub showcase_paths: Vec<String>,

    /// Exclusion glob patterns, as configured.
    pub exclude: Vec<String>,

    /// Title shown by the showcase UI.
    pub title: String,

    /// Dev server port.
    pub port: u16,

    /// Absolute output directory.
    pub out_dir: Utf8PathBuf,

    /// Public base path.
    pub base: String,

    /// Absolute global stylesheet path.
    pub global_css: Option<Utf8PathBuf>,

    /// Absolute global provider module path.
    pub global_provider: Option<Utf8PathBuf>,

    /// Absolute Tailwind config path.
    pub tailwind_config: Option<Utf8PathBuf>,

    /// File watcher settings.
    pub watch: WatchConfig,
}

impl ResolvedConfig {
    /// Builds a config rooted at `root` with default options.
    ///
    /// # Errors
    ///
    /// See [`ShowcaseConfig::resolve`].
    pub fn with_patterns<I, S>(root: impl Into<Utf8PathBuf>, patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ShowcaseConfig::new(patterns).resolve(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_config_defaults() {
        let config = WatchConfig::default();
        assert!(config.enabled);
        assert_eq!(config.debounce_ms, 100);
        assert!(config.recursive);
    }

    #[test]
    fn test_showcase_config_defaults() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.exclude, DEFAULT_EXCLUDES);
        assert_eq!(config.title, "Showcase");
        assert_eq!(config.port, 6060);
        assert_eq!(config.out_dir, "dist/showcase");
        assert_eq!(config.base, "/");
        assert!(config.global_css.is_none());
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"showcasePaths": ["src/**/*.showcase.tsx"], "watch": {"debounceMs": 250}}"#;
        let config = ShowcaseConfig::from_json_str(json).unwrap();
        assert_eq!(config.showcase_paths, vec!["src/**/*.showcase.tsx"]);
        assert_eq!(config.watch.debounce_ms, 250);
        // Other fields should have defaults
        assert!(config.watch.recursive);
        assert_eq!(config.port, 6060);
    }

    #[test]
    fn test_validate_requires_patterns() {
        let err = ShowcaseConfig::default().validate().unwrap_err();
        assert_eq!(err.option(), Some("showcasePaths"));
    }

    #[test]
    fn test_validate_rejects_blank_pattern() {
        let err = ShowcaseConfig::new(["src/*.showcase.tsx", "  "])
            .validate()
            .unwrap_err();
        assert_eq!(err.option(), Some("showcasePaths"));
    }

    #[test]
    fn test_validate_port_range() {
        let mut config = ShowcaseConfig::new(["*.showcase.tsx"]);
        config.port = 0;
        assert_eq!(config.validate().unwrap_err().option(), Some("port"));
        config.port = 70_000;
        assert_eq!(config.validate().unwrap_err().option(), Some("port"));
        config.port = 65_535;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_and_title() {
        let mut config = ShowcaseConfig::new(["*.showcase.tsx"]);
        config.base = "docs/".to_owned();
        assert_eq!(config.validate().unwrap_err().option(), Some("base"));

        let mut config = ShowcaseConfig::new(["*.showcase.tsx"]);
        config.title = String::new();
        assert_eq!(config.validate().unwrap_err().option(), Some("title"));
    }

    #[test]
    fn test_resolve_makes_paths_absolute() {
        let mut config = ShowcaseConfig::new(["src/**/*.showcase.tsx"]);
        config.global_css = Some(Utf8PathBuf::from("./styles/global.css"));
        config.tailwind_config = Some(Utf8PathBuf::from("/etc/tailwind.config.js"));

        let resolved = config.resolve("/work/proj/./").unwrap();
        assert_eq!(resolved.root, "/work/proj");
        assert_eq!(resolved.out_dir, "/work/proj/dist/showcase");
        assert_eq!(
            resolved.global_css.as_deref(),
            Some(Utf8Path::new("/work/proj/styles/global.css"))
        );
        assert_eq!(
            resolved.tailwind_config.as_deref(),
            Some(Utf8Path::new("/etc/tailwind.config.js"))
        );
        assert!(resolved.global_provider.is_none());
        assert_eq!(resolved.port, 6060);
    }

    #[test]
    fn test_resolve_rejects_relative_root() {
        let err = ShowcaseConfig::new(["*.showcase.tsx"])
            .resolve("proj")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        let err = ShowcaseConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_load_roots_at_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        std::fs::write(
            &path,
            r#"{ "showcasePaths": ["src/**/*.showcase.tsx"], "title": "UI Kit" }"#,
        )
        .unwrap();

        let resolved = ShowcaseConfig::load(&path).unwrap();
        let expected_root = Utf8PathBuf::from_path_buf(dir.path().canonicalize().unwrap()).unwrap();
        assert_eq!(resolved.root, expected_root);
        assert_eq!(resolved.title, "UI Kit");
        assert_eq!(resolved.out_dir, expected_root.join("dist/showcase"));
    }

    #[test]
    fn test_load_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ShowcaseConfig::load(&path).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_resolved_config_snapshot() {
        let resolved = ResolvedConfig::with_patterns("/proj", ["src/**/*.showcase.tsx"]).unwrap();
        insta::assert_json_snapshot!(resolved, @r###"
        {
          "root": "/proj",
          "showcasePaths": [
            "src/**/*.showcase.tsx"
          ],
          "exclude": [
            "**/node_modules/**",
            "**/.git/**",
            "**/*.test.*",
            "**/*.spec.*"
          ],
          "title": "Showcase",
          "port": 6060,
          "outDir": "/proj/dist/showcase",
          "base": "/",
          "globalCss": null,
          "globalProvider": null,
          "tailwindConfig": null,
          "watch": {
            "enabled": true,
            "debounceMs": 100,
            "recursive": true
          }
        }
        "###);
    }
}
