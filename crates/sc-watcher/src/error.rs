//! Error types for the sc-watcher crate.
//!
//! This module provides the [`WatchError`] type for errors that can occur
//! while watching a showcase tree.

use camino::Utf8PathBuf;

/// Errors that can occur during file watching operations.
///
/// # Error Recovery Strategy
///
/// - **Notify errors** ([`WatchError::Notify`]): Fatal - the watcher could not start
/// - **Path not found** ([`WatchError::PathNotFound`]): Fatal - the root must exist
/// - **Channel closed** ([`WatchError::ChannelClosed`]): Fatal - the watcher thread is gone
/// - **Non-UTF-8 path** ([`WatchError::NonUtf8Path`]): Recoverable - the event is skipped
/// - **I/O errors** ([`WatchError::Io`]): Fatal
///
/// # Examples
///
/// ```
/// use sc_watcher::WatchError;
///
/// fn handle_error(err: &WatchError) -> &'static str {
///     match err {
///         WatchError::Notify(_) => "notify",
///         WatchError::PathNotFound(_) => "missing",
///         WatchError::ChannelClosed => "closed",
///         WatchError::NonUtf8Path(_) => "utf8",
///         WatchError::Io(_) => "io",
///     }
/// }
///
/// assert_eq!(handle_error(&WatchError::ChannelClosed), "closed");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Failed to initialize or operate the notify watcher.
    #[error("notify watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// The watched root does not exist.
    #[error("path does not exist: {0}")]
    PathNotFound(Utf8PathBuf),

    /// The watcher task ended unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// A changed path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// An I/O error occurred while resolving the watch root.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    /// Creates a new [`WatchError::PathNotFound`] error.
    #[inline]
    pub fn path_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }
}
