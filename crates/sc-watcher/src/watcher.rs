//! File watcher with async event streaming.
//!
//! This module provides the [`FileWatcher`] type that bridges the synchronous
//! `notify` file watching crate to the async tokio runtime.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Blocking Thread (spawn_blocking)             │
//! │  ┌──────────────────┐    ┌────────────────┐    ┌────────────┐  │
//! │  │ RecommendedWatcher│ -> │ Debouncer      │ -> │ Callback   │  │
//! │  │ (notify)         │    │ (debounce_ms)  │    │ (filtering)│  │
//! │  └──────────────────┘    └────────────────┘    └─────┬──────┘  │
//! └──────────────────────────────────────────────────────│─────────┘
//!                                                        │
//!                                          blocking_send │
//!                                                        ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Async Runtime (tokio)                        │
//! │  ┌──────────────────┐    ┌────────────────┐                     │
//! │  │ FileWatcher      │    │ mpsc::Receiver │ -> WatchCoordinator │
//! │  │ (shutdown ctrl)  │    │ (events)       │                     │
//! │  └──────────────────┘    └────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use sc_core::WatchConfig;

use crate::error::WatchError;
use crate::events::FileEvent;
use crate::filter::FileFilter;

/// Default channel capacity for file events.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// A file watcher that streams filtered, debounced events to async code.
///
/// # Lifecycle
///
/// 1. **Creation**: [`FileWatcher::new`] validates the path, creates the
///    channels and starts the notify watcher on the blocking pool.
/// 2. **Event Reception**: [`FileWatcher::recv`] yields events that already
///    passed the filter.
/// 3. **Shutdown**: [`FileWatcher::shutdown`] stops the watcher thread and
///    waits for it. Dropping the watcher also signals the thread to stop.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use sc_core::WatchConfig;
/// use sc_watcher::{FileWatcher, ShowcaseFilter};
///
/// # async fn example() -> Result<(), sc_watcher::WatchError> {
/// let mut watcher = FileWatcher::new(
///     Utf8Path::new("./src"),
///     &WatchConfig::default(),
///     ShowcaseFilter::default(),
/// )?;
///
/// while let Some(event) = watcher.recv().await {
///     println!("Changed: {}", event.path);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FileWatcher {
    /// Signals the blocking task to stop; `None` once sent.
    shutdown_tx: Option<oneshot::Sender<()>>,

    /// Handle to the blocking watcher task.
    task_handle: Option<JoinHandle<Result<(), WatchError>>>,

    /// Event receiver for async consumption.
    event_rx: mpsc::Receiver<FileEvent>,

    /// The canonical path being watched.
    watch_path: Utf8PathBuf,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("watch_path", &self.watch_path)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Starts watching `path` with the default channel capacity.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - Returns [`WatchError::PathNotFound`] if the path doesn't exist
    /// - Returns [`WatchError::Io`] if the path cannot be canonicalized
    pub fn new<F: FileFilter>(
        path: &Utf8Path,
        config: &WatchConfig,
        filter: F,
    ) -> Result<Self, WatchError> {
        Self::with_capacity(path, config, filter, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Starts watching `path` with a custom channel capacity.
    ///
    /// When the channel is full the watcher thread waits, which applies
    /// backpressure to notify rather than dropping events.
    ///
    /// # Errors
    ///
    /// See [`FileWatcher::new`].
    pub fn with_capacity<F: FileFilter>(
        path: &Utf8Path,
        config: &WatchConfig,
        filter: F,
        channel_capacity: usize,
    ) -> Result<Self, WatchError> {
        if !path.exists() {
            return Err(WatchError::path_not_found(path));
        }

        let watch_path = path.canonicalize_utf8()?;

        let (event_tx, event_rx) = mpsc::channel(channel_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task_path = watch_path.clone();
        let debounce = Duration::from_millis(config.debounce_ms);
        let mode = if config.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        let task_handle = tokio::task::spawn_blocking(move || {
            run_watcher_loop(&task_path, debounce, mode, event_tx, shutdown_rx, filter)
        });

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
            event_rx,
            watch_path,
        })
    }

    /// Receives the next event; `None` once the watcher has stopped.
    pub async fn recv(&mut self) -> Option<FileEvent> {
        self.event_rx.recv().await
    }

    /// Returns the canonical path being watched.
    #[must_use]
    pub fn watch_path(&self) -> &Utf8Path {
        &self.watch_path
    }

    /// Returns `true` if the watcher thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some() && self.task_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the watcher thread and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns the watcher thread's error, or [`WatchError::ChannelClosed`]
    /// if the thread panicked.
    pub async fn shutdown(mut self) -> Result<(), WatchError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // The thread may already have exited
            let _ = tx.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            match handle.await {
                Ok(result) => result?,
                Err(_join_error) => return Err(WatchError::ChannelClosed),
            }
        }

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Runs the debounced notify watcher until the shutdown signal arrives.
fn run_watcher_loop<F: FileFilter>(
    path: &Utf8Path,
    debounce: Duration,
    mode: RecursiveMode,
    event_tx: mpsc::Sender<FileEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    filter: F,
) -> Result<(), WatchError> {
    let root = path.to_owned();
    let mut debouncer = new_debouncer(debounce, move |res: DebounceEventResult| match res {
        Ok(events) => {
            for event in events {
                let path = match Utf8PathBuf::try_from(event.path) {
                    Ok(path) => path,
                    Err(err) => {
                        let error = WatchError::NonUtf8Path(err.into_path_buf());
                        warn!(%error, "Skipping file event");
                        continue;
                    }
                };

                if !accepts(&filter, &root, &path) {
                    trace!(path = %path, "Filtered out file event");
                    continue;
                }

                if event_tx.blocking_send(FileEvent::new(path)).is_err() {
                    debug!("Event channel closed, dropping remaining events");
                    break;
                }
            }
        }
        Err(error) => warn!(error = %error, "Debouncer error"),
    })?;

    debouncer.watcher().watch(path.as_std_path(), mode)?;

    info!(path = %path, recursive = (mode == RecursiveMode::Recursive), "File watcher started");

    // Dropping the sender counts as a shutdown signal too
    let _ = shutdown_rx.blocking_recv();

    info!(path = %path, "File watcher stopped");

    Ok(())
}

/// Applies `filter` to `path` relative to the watched `root`.
fn accepts<F: FileFilter>(filter: &F, root: &Utf8Path, path: &Utf8Path) -> bool {
    filter.should_process(path.strip_prefix(root).unwrap_or(path))
}
