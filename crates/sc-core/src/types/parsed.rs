//! Parsed showcase content: metadata, variants, and load outcomes.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::location::SourceLocation;

/// The syntactic form of an invocable export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// `export function Primary() {}` (including generator functions).
    Function,
    /// `export const Primary = () => ...`.
    Arrow,
    /// `export const Primary = function () {}`.
    FunctionExpression,
    /// `export class Primary {}` or a class expression.
    Class,
}

impl VariantKind {
    /// Returns a short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Arrow => "arrow",
            Self::FunctionExpression => "function expression",
            Self::Class => "class",
        }
    }
}

/// A named, invocable export of a showcase file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// The exported name.
    pub name: String,

    /// How the value was declared.
    pub kind: VariantKind,

    /// Where the export's value is declared.
    pub location: SourceLocation,
}

/// The result of loading one showcase file.
///
/// `metadata` mirrors the file's default export; `variants` holds the named
/// exports that are invocable, in source order. A file that failed to load
/// is represented by [`ParsedShowcase::default`], i.e. both maps empty.
///
/// # Examples
///
/// ```
/// use sc_core::ParsedShowcase;
///
/// let parsed = ParsedShowcase::default();
/// assert!(parsed.is_empty());
/// assert_eq!(parsed.title(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedShowcase {
    /// The default export. JSON literals keep their JSON type; any other
    /// expression is stored as its verbatim source text.
    pub metadata: Map<String, Value>,

    /// Invocable named exports keyed by exported name.
    pub variants: IndexMap<String, Variant>,
}

impl ParsedShowcase {
    /// Returns `true` if neither metadata nor variants were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.variants.is_empty()
    }

    /// Returns the `title` metadata entry, if it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    /// Returns the `component` metadata entry (usually an identifier's source text).
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.metadata.get("component").and_then(Value::as_str)
    }

    /// Returns the variant exported under `name`.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.get(name)
    }

    /// Returns the variant names in source order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}

/// The tagged result of a showcase loader.
///
/// Loaders never raise; a failure carries the path and a rendered error so
/// callers can log it and carry on with the rest of the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The file was read and parsed.
    Loaded {
        /// The file that was loaded.
        path: Utf8PathBuf,
        /// Its metadata and variants.
        parsed: ParsedShowcase,
    },

    /// The file could not be read or parsed.
    Failed {
        /// The file that failed.
        path: Utf8PathBuf,
        /// The rendered underlying error.
        error: String,
    },
}

impl LoadOutcome {
    /// Returns the path this outcome refers to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Loaded { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    /// Returns `true` for [`LoadOutcome::Loaded`].
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Converts into the parsed content, degrading failures to an empty result.
    #[must_use]
    pub fn into_parsed(self) -> ParsedShowcase {
        match self {
            Self::Loaded { parsed, .. } => parsed,
            Self::Failed { .. } => ParsedShowcase::default(),
        }
    }
}
