//! Core types, configuration, and errors for the showcase pipeline.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - [`ShowcaseConfig`] / [`ResolvedConfig`] - the `showcase.config.json` schema
//!   and its validated, absolute-path form
//! - [`ConfigError`] - configuration loading and validation failures
//! - Domain types ([`DiscoveredShowcase`], [`ParsedShowcase`], [`LoadOutcome`])
//! - Lexical path helpers used instead of any process-wide working directory
//! - The `FxHashSet` alias used for path deduplication

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod path;
pub mod types;

pub use config::{
    CONFIG_FILE_NAME, DEFAULT_EXCLUDES, ResolvedConfig, ShowcaseConfig, WatchConfig,
};
pub use error::ConfigError;
pub use hash::{FxHashSet, fx_hash_set_with_capacity};
pub use types::{
    DiscoveredShowcase, LoadOutcome, ParsedShowcase, SHOWCASE_SUFFIXES, SourceLocation, Variant,
    VariantKind, component_name, is_showcase_path,
};
