//! File filtering for watch events.
//!
//! Filters run on the blocking watcher thread, before events reach the
//! channel, so irrelevant changes never wake the async consumer.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use sc_watcher::{FileFilter, ShowcaseFilter};
//!
//! let filter = ShowcaseFilter::default();
//!
//! assert!(filter.should_process(Utf8Path::new("src/Button.showcase.tsx")));
//! assert!(filter.should_process(Utf8Path::new("src/Button.showcase.jsx")));
//!
//! assert!(!filter.should_process(Utf8Path::new("src/Button.tsx")));
//! assert!(!filter.should_process(Utf8Path::new("node_modules/ui/Button.showcase.tsx")));
//! ```

use camino::Utf8Path;
use sc_core::SHOWCASE_SUFFIXES;
use smallvec::SmallVec;

/// A predicate deciding which changed paths are forwarded.
///
/// Filters must be [`Send`], [`Sync`] and `'static` because they are moved
/// into the blocking watcher thread.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use sc_watcher::FileFilter;
///
/// struct OnlySrc;
///
/// impl FileFilter for OnlySrc {
///     fn should_process(&self, path: &Utf8Path) -> bool {
///         path.starts_with("src")
///     }
/// }
/// ```
pub trait FileFilter: Send + Sync + 'static {
    /// Returns `true` if a change to `path` should be forwarded.
    ///
    /// `path` is relative to the watched root, so directories above the
    /// root never influence the decision.
    fn should_process(&self, path: &Utf8Path) -> bool;
}

/// Accepts showcase files outside excluded directories.
///
/// A path passes when its name ends in `.showcase.tsx` or `.showcase.jsx`
/// and none of its directory components is `node_modules` or `.git`.
#[derive(Debug, Clone)]
pub struct ShowcaseFilter {
    suffixes: SmallVec<[&'static str; 4]>,
    excluded_dirs: SmallVec<[&'static str; 4]>,
}

impl ShowcaseFilter {
    /// Creates a filter with the default suffixes and excluded directories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            suffixes: SHOWCASE_SUFFIXES.iter().copied().collect(),
            excluded_dirs: SmallVec::from_slice(&["node_modules", ".git"]),
        }
    }

    fn has_suffix(&self, path: &Utf8Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.suffixes.iter().any(|suffix| name.ends_with(suffix)))
    }

    fn in_excluded_dir(&self, path: &Utf8Path) -> bool {
        path.parent().is_some_and(|parent| {
            parent
                .components()
                .any(|component| self.excluded_dirs.contains(&component.as_str()))
        })
    }
}

impl Default for ShowcaseFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileFilter for ShowcaseFilter {
    fn should_process(&self, path: &Utf8Path) -> bool {
        self.has_suffix(path) && !self.in_excluded_dir(path)
    }
}
