//! Directory traversal for pattern matching.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to walk
//! a directory tree in a deterministic order.
//!
//! # Features
//!
//! - Sorted traversal (file-name order at every level)
//! - Hidden entries are visited and `.gitignore` is not consulted; glob
//!   patterns and excludes are the sole authority over what matches
//! - Optional pruning of whole directories
//! - Converts paths to UTF-8 [`Utf8PathBuf`](camino::Utf8PathBuf)

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::ScanError;

/// Predicate deciding whether a directory is skipped with everything below it.
type PruneFn = Arc<dyn Fn(&Utf8Path) -> bool + Send + Sync>;

/// A file walker that lists every file in a directory tree.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use sc_scanner::FileWalker;
///
/// let walker = FileWalker::new(Utf8Path::new("./src"))?
///     .with_prune(|dir| dir.file_name() == Some("node_modules"));
/// let paths = walker.collect_paths()?;
///
/// println!("Found {} files", paths.len());
/// # Ok::<(), sc_scanner::ScanError>(())
/// ```
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Directories for which this returns `true` are not entered.
    prune: Option<PruneFn>,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            prune: None,
        })
    }

    /// Skips every directory for which `prune` returns `true`.
    ///
    /// The walk root itself is never pruned.
    #[must_use]
    pub fn with_prune<F>(mut self, prune: F) -> Self
    where
        F: Fn(&Utf8Path) -> bool + Send + Sync + 'static,
    {
        self.prune = Some(Arc::new(prune));
        self
    }

    /// Collects all file paths in the directory tree, in sorted walk order.
    ///
    /// Unreadable entries below the root and non-UTF-8 paths are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if the root itself cannot be read.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, ScanError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) if err.depth().is_some_and(|depth| depth > 0) => {
                    warn!(root = %self.root, error = %err, "Skipping unreadable entry");
                    continue;
                }
                Err(err) => return Err(ScanError::Walk(err)),
            };

            let is_file = entry.file_type().is_some_and(|ft| {
                ft.is_file() || (ft.is_symlink() && entry.path().is_file())
            });
            if !is_file {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                let error = ScanError::NonUtf8Path(entry.path().to_owned());
                warn!(%error, "Skipping entry");
                continue;
            };

            paths.push(path.to_owned());
        }

        Ok(paths)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            // Patterns decide, not .gitignore or dotfile conventions
            .standard_filters(false)
            .follow_links(false)
            .threads(1)
            .sort_by_file_name(|a, b| a.cmp(b));

        if let Some(prune) = &self.prune {
            let prune = Arc::clone(prune);
            builder.filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                Utf8Path::from_path(entry.path()).is_none_or(|dir| !prune(dir))
            });
        }

        builder.build()
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl std::fmt::Debug for FileWalker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWalker")
            .field("root", &self.root)
            .field("prune", &self.prune.is_some())
            .finish()
    }
}
