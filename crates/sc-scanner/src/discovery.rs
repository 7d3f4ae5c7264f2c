//! A full discovery run: pattern matching followed by resolution.

use camino::{Utf8Path, Utf8PathBuf};
use sc_core::{DiscoveredShowcase, ResolvedConfig};
use tracing::{debug, info};

use crate::error::ScanError;
use crate::pattern::PatternMatcher;
use crate::resolver::resolve;

/// Discovers showcase files below a fixed root.
///
/// The matcher is compiled once; [`Discovery::run`] can be repeated for every
/// watch cycle and always reflects the current state of the filesystem.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use sc_scanner::Discovery;
///
/// let discovery = Discovery::new(
///     Utf8Path::new("/projects/ui"),
///     ["src/**/*.showcase.tsx"],
///     ["**/node_modules/**"],
/// )?;
/// for file in discovery.run()? {
///     println!("{} -> {}", file.relative_path, file.import_path);
/// }
/// # Ok::<(), sc_scanner::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Discovery {
    root: Utf8PathBuf,
    matcher: PatternMatcher,
}

impl Discovery {
    /// Creates a discovery rooted at `root`.
    ///
    /// # Errors
    ///
    /// - Returns [`ScanError::Config`] if `root` does not exist or is not a directory
    /// - Returns [`ScanError::InvalidPattern`] if a pattern fails to compile
    pub fn new<I, E>(root: &Utf8Path, patterns: I, excludes: E) -> Result<Self, ScanError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "discovery root is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: sc_core::path::normalize(root),
            matcher: PatternMatcher::new(patterns, excludes)?,
        })
    }

    /// Creates a discovery from a resolved configuration.
    ///
    /// # Errors
    ///
    /// See [`Discovery::new`].
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ScanError> {
        Self::new(&config.root, &config.showcase_paths, &config.exclude)
    }

    /// Returns the discovery root.
    #[inline]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the compiled matcher.
    #[inline]
    pub const fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Matches and resolves showcase files in discovery order.
    ///
    /// # Errors
    ///
    /// Returns the matcher's error; see [`PatternMatcher::matches`].
    pub fn run(&self) -> Result<Vec<DiscoveredShowcase>, ScanError> {
        let paths = self.matcher.matches(&self.root)?;
        let files = resolve(&paths, &self.root);

        if files.is_empty() {
            debug!(root = %self.root, "No showcase files discovered");
        } else {
            info!(root = %self.root, count = files.len(), "Discovered showcase files");
        }
        Ok(files)
    }
}

/// Runs a one-off discovery for `config`.
///
/// # Errors
///
/// See [`Discovery::new`] and [`Discovery::run`].
pub fn discover(config: &ResolvedConfig) -> Result<Vec<DiscoveredShowcase>, ScanError> {
    Discovery::from_config(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group;
    use std::fs;

    fn utf8_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, "export const Default = () => null;\n").expect("write file");
    }

    #[test]
    fn test_discover_excludes_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/components/Button.showcase.tsx");
        touch(&root, "node_modules/lib/Lib.showcase.tsx");

        let config =
            ResolvedConfig::with_patterns(root.clone(), ["**/*.showcase.tsx"]).unwrap();
        let files = discover(&config).unwrap();

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert_eq!(file.relative_path, "src/components/Button.showcase.tsx");
        assert_eq!(file.absolute_path, root.join("src/components/Button.showcase.tsx"));
        assert_eq!(file.import_path, file.absolute_path.as_str());
    }

    #[test]
    fn test_discover_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        for name in ["z/Zed", "a/Alpha", "m/Mid", "a/b/Deep"] {
            touch(&root, &format!("src/{name}.showcase.tsx"));
        }

        let discovery = Discovery::new(
            &root,
            ["src/**/*.showcase.tsx", "src/a/**/*.showcase.tsx"],
            Vec::<String>::new(),
        )
        .unwrap();
        let first = discovery.run().unwrap();
        let second = discovery.run().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_discover_dedup_at_first_match_position() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/Button.showcase.tsx");
        touch(&root, "src/Card.showcase.tsx");
        touch(&root, "docs/Intro.showcase.tsx");

        let discovery = Discovery::new(
            &root,
            [
                "src/Card.showcase.tsx",
                "docs/*.showcase.tsx",
                "src/*.showcase.tsx",
            ],
            Vec::<String>::new(),
        )
        .unwrap();
        let relative: Vec<_> = discovery
            .run()
            .unwrap()
            .into_iter()
            .map(|f| f.relative_path.to_string())
            .collect();

        assert_eq!(
            relative,
            vec![
                "src/Card.showcase.tsx",
                "docs/Intro.showcase.tsx",
                "src/Button.showcase.tsx",
            ]
        );
    }

    #[test]
    fn test_discover_then_group_tsx_and_jsx() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/Button.showcase.tsx");
        touch(&root, "src/Button.showcase.jsx");

        let discovery = Discovery::new(
            &root,
            ["src/*.showcase.{tsx,jsx}"],
            Vec::<String>::new(),
        )
        .unwrap();
        let groups = group(&discovery.run().unwrap());

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Button"]);
        assert_eq!(groups["Button"].len(), 2);
    }

    #[test]
    fn test_discover_no_matches_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);

        let config = ResolvedConfig::with_patterns(root, ["src/**/*.showcase.tsx"]).unwrap();
        assert!(discover(&config).unwrap().is_empty());
    }

    #[test]
    fn test_discovery_rejects_missing_root() {
        let err = Discovery::new(
            Utf8Path::new("/definitely/not/here"),
            ["**/*.showcase.tsx"],
            Vec::<String>::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_discovery_after_root_removed() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir).join("project");
        touch(&root, "Button.showcase.tsx");

        let discovery =
            Discovery::new(&root, ["*.showcase.tsx"], Vec::<String>::new()).unwrap();
        assert_eq!(discovery.run().unwrap().len(), 1);

        fs::remove_dir_all(&root).unwrap();
        assert!(discovery.run().is_err());
    }
}
