//! Export extraction from showcase modules.
//!
//! A showcase module contributes two things:
//!
//! - **Metadata** - its default export, when that is (or names) an object literal
//! - **Variants** - every named export whose value is invocable
//!
//! # Export Forms Detected
//!
//! | Form | Example | Result |
//! |------|---------|--------|
//! | Function | `export function Primary() {}` | variant ([`VariantKind::Function`]) |
//! | Declarator | `export const Primary = () => <Button />` | variant ([`VariantKind::Arrow`]) |
//! | Class | `export class Playground {}` | variant ([`VariantKind::Class`]) |
//! | Clause | `export { Primary, Ghost as Secondary }` | one variant per invocable binding |
//! | Default | `export default { title: 'Button' }` | metadata |
//! | Re-export | `export { Primary } from './other'` | skipped |
//!
//! Re-exports name values living in another module, which cannot be evaluated
//! without loading it, so they never produce variants.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use sc_core::{ParsedShowcase, SourceLocation, Variant, VariantKind};
use smallvec::SmallVec;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor, Tree};

use crate::literal::{LiteralReader, unwrap_expression};
use crate::queries::{CAPTURE_BINDING_DECLARATION, CAPTURE_EXPORT_STATEMENT};

/// Top-level names mapped to the expression or declaration they are bound to.
pub(crate) type Bindings<'src, 'tree> = FxHashMap<&'src str, Node<'tree>>;

/// Maps a syntax node kind to the variant kind it produces.
///
/// This is the single invocability predicate: function declarations,
/// generator functions, arrow functions, function expressions and classes
/// are invocable. Everything else (objects, strings, numbers, calls such as
/// `memo(...)`) is not.
///
/// # Examples
///
/// ```
/// use sc_core::VariantKind;
/// use sc_ts_parser::variant_kind;
///
/// assert_eq!(variant_kind("arrow_function"), Some(VariantKind::Arrow));
/// assert_eq!(variant_kind("class_declaration"), Some(VariantKind::Class));
/// assert_eq!(variant_kind("object"), None);
/// assert_eq!(variant_kind("call_expression"), None);
/// ```
#[must_use]
pub fn variant_kind(node_kind: &str) -> Option<VariantKind> {
    match node_kind {
        "function_declaration" | "generator_function_declaration" => Some(VariantKind::Function),
        "arrow_function" => Some(VariantKind::Arrow),
        "function_expression" | "function" | "generator_function" => {
            Some(VariantKind::FunctionExpression)
        }
        "class" | "class_declaration" => Some(VariantKind::Class),
        _ => None,
    }
}

/// Returns `true` if the expression (ignoring parentheses, `as` and
/// `satisfies` wrappers) is invocable.
#[must_use]
pub fn is_invocable(node: Node<'_>) -> bool {
    variant_kind(unwrap_expression(node).kind()).is_some()
}

/// Extracts metadata and variants from a parsed showcase module.
///
/// # Arguments
///
/// * `tree` - The parsed syntax tree (free of syntax errors)
/// * `source` - The original source code
/// * `query` - The pre-compiled module query
pub fn extract_showcase(tree: &Tree, source: &str, query: &Query) -> ParsedShowcase {
    let source_bytes = source.as_bytes();
    let root = tree.root_node();

    let mut cursor = QueryCursor::new();
    let mut statements: SmallVec<[Node<'_>; 16]> = SmallVec::new();
    let mut bindings: Bindings<'_, '_> = FxHashMap::default();

    let mut matches = cursor.matches(query, root, source_bytes);
    while let Some(match_) = matches.next() {
        for capture in match_.captures {
            let node = capture.node;
            match capture.index {
                CAPTURE_EXPORT_STATEMENT => {
                    statements.push(node);
                    if let Some(declaration) = node.child_by_field_name("declaration") {
                        collect_bindings(declaration, source_bytes, &mut bindings);
                    }
                }
                CAPTURE_BINDING_DECLARATION => {
                    collect_bindings(node, source_bytes, &mut bindings);
                }
                _ => {}
            }
        }
    }

    // Variants keep source order.
    statements.sort_by_key(Node::start_byte);

    let reader = LiteralReader::new(source_bytes, &bindings);
    let mut parsed = ParsedShowcase::default();

    for statement in statements {
        if is_default_export(statement) {
            let value = statement
                .child_by_field_name("value")
                .or_else(|| statement.child_by_field_name("declaration"));
            if let Some(value) = value {
                parsed.metadata = reader.metadata(value);
            }
            continue;
        }

        if let Some(from) = statement.child_by_field_name("source") {
            tracing::debug!(
                source = node_text(from, source_bytes),
                line = statement.start_position().row + 1,
                "skipping re-export from another module"
            );
            continue;
        }

        if is_type_only_export(statement) {
            continue;
        }

        if let Some(declaration) = statement.child_by_field_name("declaration") {
            declared_variants(declaration, source_bytes, &mut parsed.variants);
            continue;
        }

        let mut cursor = statement.walk();
        for clause in statement
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "export_clause")
        {
            clause_exports(clause, source_bytes, &reader, &mut parsed);
        }
    }

    parsed
}

/// Records the names a top-level declaration binds.
fn collect_bindings<'src, 'tree>(
    declaration: Node<'tree>,
    source: &'src [u8],
    bindings: &mut Bindings<'src, 'tree>,
) {
    match declaration.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = declaration.walk();
            for declarator in declaration
                .named_children(&mut cursor)
                .filter(|n| n.kind() == "variable_declarator")
            {
                let name = declarator
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier");
                let value = declarator.child_by_field_name("value");
                if let (Some(name), Some(value)) = (name, value) {
                    bindings.insert(node_text(name, source), value);
                }
            }
        }
        "function_declaration" | "generator_function_declaration" | "class_declaration" => {
            if let Some(name) = declaration.child_by_field_name("name") {
                bindings.insert(node_text(name, source), declaration);
            }
        }
        _ => {}
    }
}

/// Adds variants for `export function`, `export class`, and `export const`.
fn declared_variants(
    declaration: Node<'_>,
    source: &[u8],
    variants: &mut IndexMap<String, Variant>,
) {
    match declaration.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = declaration.walk();
            for declarator in declaration
                .named_children(&mut cursor)
                .filter(|n| n.kind() == "variable_declarator")
            {
                let Some(name) = declarator
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                else {
                    continue;
                };
                let name = node_text(name, source);
                match declarator.child_by_field_name("value") {
                    Some(value) => push_variant(variants, name, unwrap_expression(value)),
                    None => tracing::debug!(name, "exported binding has no initializer"),
                }
            }
        }
        _ => {
            if let Some(name) = declaration.child_by_field_name("name") {
                push_variant(variants, node_text(name, source), declaration);
            }
        }
    }
}

/// Handles `export { a, b as c }` against top-level bindings.
fn clause_exports<'tree>(
    clause: Node<'tree>,
    source: &[u8],
    reader: &LiteralReader<'_, 'tree>,
    parsed: &mut ParsedShowcase,
) {
    let mut cursor = clause.walk();
    for specifier in clause
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "export_specifier")
    {
        let Some(local) = specifier.child_by_field_name("name") else {
            continue;
        };
        let exported = specifier
            .child_by_field_name("alias")
            .map_or_else(|| node_text(local, source), |alias| node_text(alias, source));

        if exported == "default" {
            parsed.metadata = reader.metadata(local);
            continue;
        }

        let target = reader.resolve(local);
        if target.id() == local.id() {
            tracing::debug!(
                name = exported,
                "exported name has no top-level binding"
            );
            continue;
        }
        push_variant(&mut parsed.variants, exported, target);
    }
}

fn push_variant(variants: &mut IndexMap<String, Variant>, name: &str, value: Node<'_>) {
    match variant_kind(value.kind()) {
        Some(kind) => {
            variants.insert(
                name.to_owned(),
                Variant {
                    name: name.to_owned(),
                    kind,
                    location: node_to_location(value),
                },
            );
        }
        None => tracing::debug!(name, kind = value.kind(), "export is not invocable"),
    }
}

fn is_default_export(statement: Node<'_>) -> bool {
    let mut cursor = statement.walk();
    statement
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "default")
}

/// `export type { Props }` names types only.
fn is_type_only_export(statement: Node<'_>) -> bool {
    let mut cursor = statement.walk();
    statement
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "type")
}

/// Extracts text from a node.
pub(crate) fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// Converts a node's position to a [`SourceLocation`].
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn node_to_location(node: Node<'_>) -> SourceLocation {
    let start = node.start_position();
    SourceLocation::new(
        start.row as u32 + 1, // Convert 0-indexed to 1-indexed
        start.column as u32,
        node.start_byte() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::get_tsx_module_query;
    use serde_json::json;
    use tree_sitter::Parser;

    fn extract(source: &str) -> ParsedShowcase {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .expect("TSX language");
        let tree = parser.parse(source, None).expect("tree");
        let query = get_tsx_module_query().expect("query");
        extract_showcase(&tree, source, query)
    }

    #[test]
    fn test_variant_kinds() {
        let parsed = extract(
            r"
export function Primary() { return null; }
export const Secondary = () => null;
export const Tertiary = function () { return null; };
export class Playground {}
export function* Steps() {}
",
        );

        let kinds: Vec<_> = parsed
            .variants
            .values()
            .map(|v| (v.name.as_str(), v.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("Primary", VariantKind::Function),
                ("Secondary", VariantKind::Arrow),
                ("Tertiary", VariantKind::FunctionExpression),
                ("Playground", VariantKind::Class),
                ("Steps", VariantKind::Function),
            ]
        );
    }

    #[test]
    fn test_non_invocable_exports_are_not_variants() {
        let parsed = extract(
            r"
export const args = { label: 'Hi' };
export const count = 3;
export const Memoized = memo(() => null);
export interface Props { label: string }
export type Size = 'sm' | 'lg';
",
        );
        assert!(parsed.variants.is_empty());
    }

    #[test]
    fn test_default_object_becomes_metadata() {
        let parsed = extract(
            r"
import { Button } from './Button';

export default {
  title: 'Button',
  component: Button,
  tags: ['ui', `forms`],
  order: -2,
  hidden: false,
  parameters: { layout: 'centered' },
};

export const Primary = () => <Button>Primary</Button>;
",
        );

        assert_eq!(
            serde_json::Value::Object(parsed.metadata.clone()),
            json!({
                "title": "Button",
                "component": "Button",
                "tags": ["ui", "forms"],
                "order": -2,
                "hidden": false,
                "parameters": { "layout": "centered" },
            })
        );
        assert_eq!(parsed.variant_names().collect::<Vec<_>>(), vec!["Primary"]);
    }

    #[test]
    fn test_default_through_binding_and_satisfies() {
        let parsed = extract(
            r"
const meta = ({ title: 'Card' }) satisfies Meta;
export default meta;
",
        );
        assert_eq!(parsed.title(), Some("Card"));
    }

    #[test]
    fn test_export_clause_resolves_local_bindings() {
        let parsed = extract(
            r"
const meta = { title: 'Badge' };
function Primary() { return null; }
const Outline = () => null;
const notAVariant = 'text';

export { meta as default, Primary, Outline as Secondary, notAVariant };
",
        );

        assert_eq!(parsed.title(), Some("Badge"));
        assert_eq!(
            parsed.variant_names().collect::<Vec<_>>(),
            vec!["Primary", "Secondary"]
        );
        assert_eq!(
            parsed.variant("Secondary").map(|v| v.kind),
            Some(VariantKind::Arrow)
        );
    }

    #[test]
    fn test_reexports_are_skipped() {
        let parsed = extract(
            r"
export { Primary } from './Primary.showcase';
export * from './shared';
export const Local = () => null;
",
        );
        assert_eq!(parsed.variant_names().collect::<Vec<_>>(), vec!["Local"]);
    }

    #[test]
    fn test_default_function_is_not_metadata_or_variant() {
        let parsed = extract("export default function Page() { return null; }\n");
        assert!(parsed.metadata.is_empty());
        assert!(parsed.variants.is_empty());
    }

    #[test]
    fn test_variant_location() {
        let parsed = extract("\n\nexport const Primary = () => null;\n");
        let location = parsed.variant("Primary").map(|v| v.location);
        assert_eq!(location, Some(SourceLocation::new(3, 23, 25)));
    }

    #[test]
    fn test_spread_and_shorthand_in_metadata() {
        let parsed = extract(
            r#"
const base = { layout: "padded" };
const title = "Avatar";
export default { title, parameters: { ...base, docs: true } };
"#,
        );
        assert_eq!(
            serde_json::Value::Object(parsed.metadata),
            json!({ "title": "Avatar", "parameters": { "layout": "padded", "docs": true } })
        );
    }

    #[test]
    fn test_self_referencing_spread_terminates() {
        let parsed = extract("const meta = { ...meta };\nexport default meta;\n");
        assert!(parsed.metadata.is_empty());

        let parsed = extract("const items = [1, ...items];\nexport default { items };\n");
        assert_eq!(parsed.metadata["items"][0], json!(1));
    }

    #[test]
    fn test_mutually_spreading_objects_terminate() {
        let parsed = extract(
            r#"
const a = { x: 1, ...b };
const b = { y: 2, ...a };
export default a;
export const Primary = () => null;
"#,
        );
        assert_eq!(
            serde_json::Value::Object(parsed.metadata),
            json!({ "x": 1, "y": 2 })
        );
        assert_eq!(parsed.variants.keys().collect::<Vec<_>>(), ["Primary"]);
    }
}
