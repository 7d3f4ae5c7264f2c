//! Loading and parsing of individual showcase files.
//!
//! A [`ShowcaseLoader`] turns one path into a [`LoadOutcome`]. Failures are
//! data, not errors: [`parse`] and [`parse_all`] log them and substitute an
//! empty [`ParsedShowcase`], so one broken file never affects another.

use camino::Utf8Path;
use rayon::prelude::*;
use sc_core::{DiscoveredShowcase, LoadOutcome, ParsedShowcase};
use sc_ts_parser::ShowcaseParser;
use tracing::{debug, warn};

use crate::error::ScanError;

/// Loads a single showcase module.
///
/// Implementations must be shareable across rayon workers.
pub trait ShowcaseLoader: Send + Sync {
    /// Loads the file at `path`.
    fn load(&self, path: &Utf8Path) -> LoadOutcome;
}

/// Production loader: reads the file and parses it statically with
/// tree-sitter.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use sc_scanner::{ShowcaseLoader, SourceLoader};
///
/// let outcome = SourceLoader.load(Utf8Path::new("src/Button.showcase.tsx"));
/// println!("loaded: {}", outcome.is_loaded());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceLoader;

impl SourceLoader {
    fn try_load(path: &Utf8Path) -> Result<ParsedShowcase, ScanError> {
        // Non-UTF-8 content surfaces as an `InvalidData` read error.
        let source = std::fs::read_to_string(path).map_err(|err| ScanError::read(path, err))?;
        let mut parser = ShowcaseParser::for_path(path).map_err(|err| ScanError::parse(path, err))?;
        parser.parse(&source).map_err(|err| ScanError::parse(path, err))
    }
}

impl ShowcaseLoader for SourceLoader {
    fn load(&self, path: &Utf8Path) -> LoadOutcome {
        match Self::try_load(path) {
            Ok(parsed) => LoadOutcome::Loaded {
                path: path.to_owned(),
                parsed,
            },
            Err(err) => LoadOutcome::Failed {
                path: path.to_owned(),
                error: err.to_string(),
            },
        }
    }
}

/// Loads one file, substituting an empty result on failure.
///
/// Never fails. A failed load is logged at `warn` with the path and error.
pub fn parse<L>(loader: &L, path: &Utf8Path) -> ParsedShowcase
where
    L: ShowcaseLoader + ?Sized,
{
    match loader.load(path) {
        LoadOutcome::Loaded { path, parsed } => {
            debug!(
                path = %path,
                variants = parsed.variants.len(),
                "Parsed showcase"
            );
            parsed
        }
        LoadOutcome::Failed { path, error } => {
            warn!(path = %path, error = %error, "Failed to load showcase");
            ParsedShowcase::default()
        }
    }
}

/// Loads every file in parallel, preserving input order.
pub fn parse_all<L>(
    loader: &L,
    files: &[DiscoveredShowcase],
) -> Vec<(DiscoveredShowcase, ParsedShowcase)>
where
    L: ShowcaseLoader + ?Sized,
{
    files
        .par_iter()
        .map(|file| (file.clone(), parse(loader, &file.absolute_path)))
        .collect()
}
