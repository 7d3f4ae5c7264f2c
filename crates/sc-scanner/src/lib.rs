//! Showcase discovery: glob matching, resolution, parsing and grouping.
//!
//! This crate turns a [`ResolvedConfig`](sc_core::ResolvedConfig) into the
//! ordered list of showcase files the virtual module is generated from, and
//! optionally parses and groups them for documentation.
//!
//! # Overview
//!
//! - [`PatternMatcher`]: include/exclude globs → unique absolute paths
//! - [`resolve`]: paths → [`DiscoveredShowcase`](sc_core::DiscoveredShowcase) records
//! - [`Discovery`] / [`discover`]: both of the above, rooted at the config root
//! - [`ShowcaseLoader`] / [`parse`] / [`parse_all`]: per-file loading that
//!   never fails the batch
//! - [`group`] / [`group_parsed`] / [`documentation`]: grouping by component
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use sc_core::ShowcaseConfig;
//! use sc_scanner::{SourceLoader, discover, documentation, group_parsed, parse_all};
//!
//! let config = ShowcaseConfig::load(Utf8Path::new("showcase.config.json"))?;
//! let files = discover(&config)?;
//! let docs = documentation(group_parsed(parse_all(&SourceLoader, &files)));
//!
//! for (component, entries) in &docs {
//!     println!("{component}: {} file(s)", entries.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Discovery
//!     │
//!     ├── PatternMatcher (glob crate)
//!     │       │
//!     │       └── FileWalker (ignore crate, sorted, pruned)
//!     │
//!     └── resolve (dedup + import specifiers)
//!
//! parse_all (rayon)
//!     │
//!     └── SourceLoader → ShowcaseParser (sc-ts-parser)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod discovery;
pub mod error;
pub mod group;
pub mod loader;
pub mod pattern;
pub mod resolver;
pub mod walker;

pub use discovery::{Discovery, discover};
pub use error::ScanError;
pub use group::{ShowcaseDoc, documentation, group, group_parsed};
pub use loader::{ShowcaseLoader, SourceLoader, parse, parse_all};
pub use pattern::PatternMatcher;
pub use resolver::resolve;
pub use walker::FileWalker;
