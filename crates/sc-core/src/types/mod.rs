//! Domain types for the showcase pipeline.
//!
//! - [`showcase`] - discovered files and component-name derivation
//! - [`parsed`] - metadata, variants, and loader outcomes
//! - [`location`] - source positions
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use sc_core::{DiscoveredShowcase, LoadOutcome, ParsedShowcase};
//! ```

mod location;
mod parsed;
mod showcase;

pub use location::SourceLocation;
pub use parsed::{LoadOutcome, ParsedShowcase, Variant, VariantKind};
pub use showcase::{DiscoveredShowcase, SHOWCASE_SUFFIXES, component_name, is_showcase_path};
