//! Error types for the sc-virtual crate.

use sc_scanner::ScanError;
use sc_watcher::WatchError;

/// Errors from the watch coordinator.
///
/// A failed regeneration leaves the previously published module in place;
/// discovery and join errors describe why a cycle did not complete, and a
/// watcher error ends the watch loop.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// Discovery failed (invalid pattern, missing root, unreadable tree).
    #[error("discovery failed: {0}")]
    Scan(#[from] ScanError),

    /// The blocking discovery task panicked or was cancelled.
    #[error("regeneration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The file watcher failed.
    #[error("file watcher failed: {0}")]
    Watch(#[from] WatchError),
}
