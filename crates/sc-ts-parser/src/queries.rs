//! Pre-compiled tree-sitter queries for showcase module analysis.
//!
//! This module provides the [`MODULE_QUERY`] constant containing S-expression
//! patterns for the top-level statements a showcase file is made of, and
//! per-language accessors that lazily compile and cache the query.

use std::sync::OnceLock;

use tree_sitter::{Language, Query};

use crate::error::ParseError;

/// Tree-sitter query for the top level of a showcase module.
///
/// Only direct children of `program` are captured: nested declarations can
/// never be exports.
///
/// # Capture Names
///
/// - `export.statement` - An `export ...` statement
/// - `binding.declaration` - A top-level `const`/`let`/`var`, function, or
///   class declaration that an `export { ... }` clause or `export default`
///   may refer to
pub const MODULE_QUERY: &str = r"
; Export statements: export const / function / class / default / { ... }
(program
  (export_statement) @export.statement)

; Top-level const and let declarations
(program
  (lexical_declaration) @binding.declaration)

; Top-level var declarations
(program
  (variable_declaration) @binding.declaration)

; Top-level function declarations
(program
  (function_declaration) @binding.declaration)

; Top-level generator function declarations
(program
  (generator_function_declaration) @binding.declaration)

; Top-level class declarations
(program
  (class_declaration) @binding.declaration)
";

/// Capture index for `export.statement`.
pub const CAPTURE_EXPORT_STATEMENT: u32 = 0;

/// Capture index for `binding.declaration`.
pub const CAPTURE_BINDING_DECLARATION: u32 = 1;

/// Global cache for the compiled module query (TypeScript).
static COMPILED_QUERY_TS: OnceLock<Query> = OnceLock::new();

/// Global cache for the compiled module query (TSX).
static COMPILED_QUERY_TSX: OnceLock<Query> = OnceLock::new();

/// Returns the compiled module query for TypeScript.
///
/// The query is compiled once and cached for all subsequent calls.
///
/// # Errors
///
/// Returns [`ParseError::QueryCompile`] if the query fails to compile.
pub fn get_typescript_module_query() -> Result<&'static Query, ParseError> {
    if let Some(query) = COMPILED_QUERY_TS.get() {
        return Ok(query);
    }

    let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
    let query = compile_query(&language)?;

    Ok(COMPILED_QUERY_TS.get_or_init(|| query))
}

/// Returns the compiled module query for TSX.
///
/// The query is compiled once and cached for all subsequent calls.
///
/// # Errors
///
/// Returns [`ParseError::QueryCompile`] if the query fails to compile.
pub fn get_tsx_module_query() -> Result<&'static Query, ParseError> {
    if let Some(query) = COMPILED_QUERY_TSX.get() {
        return Ok(query);
    }

    let language: Language = tree_sitter_typescript::LANGUAGE_TSX.into();
    let query = compile_query(&language)?;

    Ok(COMPILED_QUERY_TSX.get_or_init(|| query))
}

fn compile_query(language: &Language) -> Result<Query, ParseError> {
    Query::new(language, MODULE_QUERY).map_err(|e| ParseError::QueryCompile {
        offset: e.offset,
        message: e.message,
    })
}
