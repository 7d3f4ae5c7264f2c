//! The virtual showcase module: generation, serving and live regeneration.
//!
//! The host bundler never reads the generated module from disk. It asks a
//! [`SourceProvider`] for the well-known id [`VIRTUAL_MODULE_ID`] and gets
//! back source that imports every discovered showcase:
//!
//! ```text
//! host ──resolve_id/load──► VirtualModule ◄──publish── WatchCoordinator
//!  ▲                                                      │
//!  └──────────── invalidate, full_reload ─────────────────┘
//! ```
//!
//! - [`generate`]: discovery result → module source (pure)
//! - [`VirtualModule`]: the single owner of the current source
//! - [`WatchCoordinator`]: regenerate-then-signal on every showcase change
//! - [`HostSignals`]: what the coordinator tells the host

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod coordinator;
pub mod error;
pub mod generate;
pub mod provider;

pub use coordinator::{ChangeOutcome, CoordinatorState, WatchCoordinator};
pub use error::CoordinatorError;
pub use generate::{EXPORT_NAME, MODULE_HEADER, generate};
pub use provider::{
    HostSignals, RESOLVED_VIRTUAL_MODULE_ID, SourceProvider, VIRTUAL_MODULE_ID, VirtualModule,
    is_virtual_module_id,
};
