//! Watch-driven regeneration of the virtual module.
//!
//! The coordinator reacts to file changes with a two-phase cycle:
//!
//! 1. **Regenerate**: rerun discovery on the blocking pool, generate the
//!    module source and publish it
//! 2. **Signal**: invalidate the module in the host, then request a full reload
//!
//! Signals are only reached after the publish returns, so a host reacting to
//! `invalidate` always loads the new content.
//!
//! # State
//!
//! ```text
//!            on_file_change (showcase path)
//!   Idle ───────────────────────────────► Regenerating
//!    ▲                                        │
//!    └─────── published / failed ─────────────┘
//! ```
//!
//! Overlapping cycles are neither serialized, cancelled nor coalesced. The
//! state reports `Regenerating` while at least one cycle is in flight, and
//! the last cycle to publish wins. Each cycle's signal pair is sent without
//! another cycle's signals in between.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use camino::Utf8Path;
use parking_lot::Mutex;
use sc_core::{ResolvedConfig, is_showcase_path};
use sc_scanner::Discovery;
use sc_watcher::FileWatcher;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoordinatorError;
use crate::generate::generate;
use crate::provider::{HostSignals, VIRTUAL_MODULE_ID, VirtualModule};

/// Whether a regeneration cycle is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No cycle is running.
    Idle,
    /// At least one cycle is running.
    Regenerating,
}

/// What a file-change notification led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The path is not a showcase file; nothing ran.
    Ignored,
    /// A cycle completed and the host was signalled.
    Regenerated {
        /// Number of showcase files in the new module.
        showcases: usize,
        /// Version of the published content.
        version: u64,
    },
}

/// Keeps the in-flight counter balanced, including on early return.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owns the virtual module and keeps it in sync with the filesystem.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use camino::Utf8Path;
/// use sc_core::ShowcaseConfig;
/// use sc_virtual::{HostSignals, SourceProvider, VIRTUAL_MODULE_ID, WatchCoordinator};
///
/// struct Host;
/// impl HostSignals for Host {
///     fn invalidate(&self, id: &str) { println!("invalidate {id}"); }
///     fn full_reload(&self) { println!("reload"); }
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ShowcaseConfig::load(Utf8Path::new("showcase.config.json"))?;
/// let coordinator = WatchCoordinator::start(&config, Arc::new(Host)).await?;
///
/// let source = coordinator.module().load(VIRTUAL_MODULE_ID);
/// coordinator
///     .on_file_change(Utf8Path::new("/proj/src/Button.showcase.tsx"))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct WatchCoordinator {
    discovery: Arc<Discovery>,
    module: Arc<VirtualModule>,
    host: Arc<dyn HostSignals>,
    in_flight: AtomicUsize,
    cycles: AtomicU64,
    /// Held while one cycle sends its `invalidate` and `full_reload` pair.
    signalling: Mutex<()>,
}

impl std::fmt::Debug for WatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchCoordinator")
            .field("root", &self.discovery.root())
            .field("state", &self.state())
            .field("cycles", &self.cycles())
            .finish_non_exhaustive()
    }
}

impl WatchCoordinator {
    /// Runs the initial discovery and generation, then enters `Idle`.
    ///
    /// No signals are sent for the initial content.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Scan`] if the config's patterns are
    /// invalid or its root is not a directory.
    pub async fn start(
        config: &ResolvedConfig,
        host: Arc<dyn HostSignals>,
    ) -> Result<Self, CoordinatorError> {
        let discovery = Arc::new(Discovery::from_config(config)?);
        let source = Self::discover_and_generate(Arc::clone(&discovery)).await?;

        info!(
            root = %discovery.root(),
            showcases = source.showcases,
            "Virtual module ready"
        );

        Ok(Self {
            discovery,
            module: Arc::new(VirtualModule::new(source.text)),
            host,
            in_flight: AtomicUsize::new(0),
            cycles: AtomicU64::new(0),
            signalling: Mutex::new(()),
        })
    }

    /// Returns the served module.
    #[must_use]
    pub fn module(&self) -> Arc<VirtualModule> {
        Arc::clone(&self.module)
    }

    /// Returns whether a cycle is currently in flight.
    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            CoordinatorState::Idle
        } else {
            CoordinatorState::Regenerating
        }
    }

    /// Returns the number of cycles that published new content.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Reacts to a change of `path`.
    ///
    /// Paths without a showcase suffix are ignored. Otherwise discovery and
    /// generation rerun, the result is published, and only then the host
    /// receives `invalidate` followed by `full_reload`.
    ///
    /// # Errors
    ///
    /// Returns the discovery error when the cycle fails; the previous
    /// content stays published and no signals are sent.
    pub async fn on_file_change(&self, path: &Utf8Path) -> Result<ChangeOutcome, CoordinatorError> {
        if !is_showcase_path(path) {
            debug!(path = %path, "Ignoring non-showcase change");
            return Ok(ChangeOutcome::Ignored);
        }

        let (showcases, version) = {
            let _guard = InFlight::enter(&self.in_flight);
            debug!(path = %path, "Regenerating virtual module");

            let source = match Self::discover_and_generate(Arc::clone(&self.discovery)).await {
                Ok(source) => source,
                Err(error) => {
                    warn!(path = %path, error = %error, "Regeneration failed, keeping previous module");
                    return Err(error);
                }
            };

            let version = self.module.publish(source.text);
            self.cycles.fetch_add(1, Ordering::SeqCst);
            (source.showcases, version)
        };

        {
            let _pair = self.signalling.lock();
            self.host.invalidate(VIRTUAL_MODULE_ID);
            self.host.full_reload();
        }

        info!(path = %path, showcases, version, "Virtual module regenerated");
        Ok(ChangeOutcome::Regenerated { showcases, version })
    }

    /// Drives [`WatchCoordinator::on_file_change`] from `watcher` until
    /// `shutdown` is cancelled or the watcher stops.
    ///
    /// Each event is handled on its own task. Failed cycles are logged and
    /// do not end the loop. In-flight cycles are awaited before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Watch`] if the watcher fails to shut down
    /// cleanly.
    pub async fn run(
        self: Arc<Self>,
        mut watcher: FileWatcher,
        shutdown: CancellationToken,
    ) -> Result<(), CoordinatorError> {
        let mut tasks = JoinSet::new();
        info!(path = %watcher.watch_path(), "Watching for showcase changes");

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    debug!("Shutdown requested");
                    break;
                }
                event = watcher.recv() => {
                    let Some(event) = event else {
                        warn!("File watcher stopped unexpectedly");
                        break;
                    };
                    let coordinator = Arc::clone(&self);
                    tasks.spawn(async move {
                        // Failures are logged inside the cycle
                        let _ = coordinator.on_file_change(&event.path).await;
                    });
                }
            }

            while let Some(result) = tasks.try_join_next() {
                if let Err(error) = result {
                    warn!(error = %error, "Regeneration task panicked");
                }
            }
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(error) = result {
                warn!(error = %error, "Regeneration task panicked");
            }
        }

        watcher.shutdown().await?;
        Ok(())
    }

    async fn discover_and_generate(
        discovery: Arc<Discovery>,
    ) -> Result<GeneratedSource, CoordinatorError> {
        let files = tokio::task::spawn_blocking(move || discovery.run()).await??;
        Ok(GeneratedSource {
            showcases: files.len(),
            text: generate(&files),
        })
    }
}

struct GeneratedSource {
    showcases: usize,
    text: String,
}
