//! Debounced showcase file watcher with async event streaming.
//!
//! This crate wraps `notify` and `notify-debouncer-mini`, running the watcher
//! on tokio's blocking pool and forwarding filtered events over a bounded
//! mpsc channel.
//!
//! - [`FileWatcher`]: the watcher itself
//! - [`FileFilter`]: predicate applied on the watcher thread
//! - [`ShowcaseFilter`]: accepts `.showcase.tsx` / `.showcase.jsx` outside
//!   `node_modules` and `.git`
//! - [`FileEvent`]: one debounced change
//!
//! # Usage
//!
//! ```no_run
//! use camino::Utf8Path;
//! use sc_core::WatchConfig;
//! use sc_watcher::{FileWatcher, ShowcaseFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut watcher = FileWatcher::new(
//!         Utf8Path::new("/path/to/ui"),
//!         &WatchConfig::default(),
//!         ShowcaseFilter::default(),
//!     )?;
//!
//!     while let Some(event) = watcher.recv().await {
//!         println!("Showcase changed: {}", event.path);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Crate Dependencies
//!
//! ```text
//! sc-cli ──► sc-virtual ──► sc-scanner ──► sc-ts-parser ──► sc-core
//!                      └──► sc-watcher ─────────────────────►
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod filter;
pub mod watcher;

pub use error::WatchError;
pub use events::FileEvent;
pub use filter::{FileFilter, ShowcaseFilter};
pub use watcher::FileWatcher;
