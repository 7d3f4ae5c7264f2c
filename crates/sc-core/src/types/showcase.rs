//! Discovered showcase files and component-name derivation.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// File-name suffixes that mark a showcase file, in the order they are stripped.
pub const SHOWCASE_SUFFIXES: &[&str] = &[".showcase.tsx", ".showcase.jsx"];

/// One showcase file matched during a discovery run.
///
/// Records are rebuilt from scratch on every run and never patched in place.
/// Within a run there is exactly one record per `absolute_path`.
///
/// # Examples
///
/// ```
/// use sc_core::DiscoveredShowcase;
///
/// let file = DiscoveredShowcase::new(
///     "/proj/src/Button.showcase.tsx",
///     "src/Button.showcase.tsx",
///     "/proj/src/Button.showcase.tsx",
/// );
/// assert_eq!(file.file_name(), "Button.showcase.tsx");
/// assert_eq!(file.component_name(), "Button");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredShowcase {
    /// Normalized filesystem path; the deduplication key.
    pub absolute_path: Utf8PathBuf,

    /// Path relative to the discovery root, used for display and naming.
    pub relative_path: Utf8PathBuf,

    /// Specifier handed to the generated `import` statement.
    pub import_path: String,
}

impl DiscoveredShowcase {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        absolute_path: impl Into<Utf8PathBuf>,
        relative_path: impl Into<Utf8PathBuf>,
        import_path: impl Into<String>,
    ) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            relative_path: relative_path.into(),
            import_path: import_path.into(),
        }
    }

    /// Returns the base name of the file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.absolute_path
            .file_name()
            .unwrap_or(self.absolute_path.as_str())
    }

    /// Returns the logical component this file showcases.
    #[must_use]
    pub fn component_name(&self) -> String {
        component_name(self.file_name())
    }
}

/// Derives a component name from a showcase file's base name.
///
/// Each suffix in [`SHOWCASE_SUFFIXES`] is removed once, in order. A name
/// carrying neither suffix comes back unchanged and therefore forms its own
/// group.
///
/// # Examples
///
/// ```
/// use sc_core::component_name;
///
/// assert_eq!(component_name("Button.showcase.tsx"), "Button");
/// assert_eq!(component_name("Button.showcase.jsx"), "Button");
/// assert_eq!(component_name("Button.tsx"), "Button.tsx");
/// ```
#[must_use]
pub fn component_name(file_name: &str) -> String {
    SHOWCASE_SUFFIXES
        .iter()
        .fold(file_name.to_owned(), |name, suffix| name.replacen(suffix, "", 1))
}

/// Returns `true` if the path ends in one of the [`SHOWCASE_SUFFIXES`].
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use sc_core::is_showcase_path;
///
/// assert!(is_showcase_path(Utf8Path::new("src/Button.showcase.tsx")));
/// assert!(!is_showcase_path(Utf8Path::new("src/Button.tsx")));
/// ```
#[must_use]
pub fn is_showcase_path(path: &Utf8Path) -> bool {
    SHOWCASE_SUFFIXES
        .iter()
        .any(|suffix| path.as_str().ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_strips_known_suffixes() {
        assert_eq!(component_name("Card.showcase.tsx"), "Card");
        assert_eq!(component_name("DatePicker.showcase.jsx"), "DatePicker");
    }

    #[test]
    fn test_component_name_unknown_suffix_is_untouched() {
        assert_eq!(component_name("Card.stories.tsx"), "Card.stories.tsx");
        assert_eq!(component_name("Card.showcase.ts"), "Card.showcase.ts");
    }

    #[test]
    fn test_is_showcase_path_jsx() {
        assert!(is_showcase_path(Utf8Path::new("/a/b/Card.showcase.jsx")));
        assert!(!is_showcase_path(Utf8Path::new("/a/b/Card.showcase.ts")));
        assert!(!is_showcase_path(Utf8Path::new("/a/b/showcase.tsx")));
    }

    #[test]
    fn test_file_name_falls_back_to_path() {
        let file = DiscoveredShowcase::new("", "", "./");
        assert_eq!(file.file_name(), "");
    }

    #[test]
    fn test_serializes_camel_case() {
        let file = DiscoveredShowcase::new("/p/A.showcase.tsx", "A.showcase.tsx", "/p/A.showcase.tsx");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["absolutePath"], "/p/A.showcase.tsx");
        assert_eq!(json["relativePath"], "A.showcase.tsx");
        assert_eq!(json["importPath"], "/p/A.showcase.tsx");
    }
}
