//! Static showcase parser using tree-sitter.
//!
//! Showcase files are never executed. Instead this crate parses them with
//! the tree-sitter TSX grammar and reads off:
//!
//! - The **metadata**: the default export when it is an object literal
//!   (directly, or via a top-level binding, through `satisfies`/`as`/parens)
//! - The **variants**: every named export whose value is invocable
//!
//! # Overview
//!
//! The main entry point is [`ShowcaseParser`]:
//!
//! ```
//! use sc_core::VariantKind;
//! use sc_ts_parser::ShowcaseParser;
//!
//! let mut parser = ShowcaseParser::new()?;
//! let source = r#"
//!     import { Button } from "./Button";
//!
//!     const meta = { title: "Button", component: Button } satisfies Meta;
//!     export default meta;
//!
//!     export const Primary = () => <Button variant="primary" />;
//!     export const args = { label: "not a variant" };
//! "#;
//!
//! let parsed = parser.parse(source)?;
//! assert_eq!(parsed.title(), Some("Button"));
//! assert_eq!(parsed.component(), Some("Button"));
//! assert_eq!(parsed.variants.len(), 1);
//! assert_eq!(parsed.variants["Primary"].kind, VariantKind::Arrow);
//! # Ok::<(), sc_ts_parser::ParseError>(())
//! ```
//!
//! # Metadata Values
//!
//! | Expression | JSON value |
//! |------------|------------|
//! | `'text'`, `` `text` `` | string (escapes resolved) |
//! | `42`, `-1.5`, `0xff` | number |
//! | `true` / `false` | boolean |
//! | `null` / `undefined` | `null` |
//! | `[...]`, `{...}` | array / object, recursively |
//! | anything else | its verbatim source text |
//!
//! # Thread Safety
//!
//! [`ShowcaseParser`] is `Send` but not `Sync`; create one per worker
//! thread. The underlying tree-sitter queries are thread-safe and shared
//! globally.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod exports;
mod literal;
mod parser;
pub mod queries;

pub use error::ParseError;
pub use exports::{extract_showcase, is_invocable, variant_kind};
pub use parser::ShowcaseParser;
