//! Source generation for the virtual showcase module.
//!
//! The generated module imports every discovered showcase as a namespace and
//! re-exports them, in discovery order, as `showcaseModules`:
//!
//! ```text
//! // Generated showcase module. Do not edit.
//! import * as Showcase0 from "/proj/src/Button.showcase.tsx";
//! import * as Showcase1 from "/proj/src/Card.showcase.tsx";
//!
//! export const showcaseModules = [
//!   Showcase0,
//!   Showcase1,
//! ];
//! ```

use sc_core::DiscoveredShowcase;

/// First line of every generated module.
pub const MODULE_HEADER: &str = "// Generated showcase module. Do not edit.";

/// Name of the exported aggregate.
pub const EXPORT_NAME: &str = "showcaseModules";

/// Generates the module source for `files`.
///
/// Pure and deterministic: the same ordered input always yields
/// byte-identical output. Empty input yields an empty aggregate.
///
/// # Examples
///
/// ```
/// use sc_core::DiscoveredShowcase;
/// use sc_virtual::generate;
///
/// let source = generate(&[DiscoveredShowcase::new(
///     "/p/Button.showcase.tsx",
///     "Button.showcase.tsx",
///     "/p/Button.showcase.tsx",
/// )]);
/// assert!(source.contains(r#"import * as Showcase0 from "/p/Button.showcase.tsx";"#));
///
/// assert!(generate(&[]).ends_with("export const showcaseModules = [];\n"));
/// ```
#[must_use]
pub fn generate(files: &[DiscoveredShowcase]) -> String {
    let mut out = String::with_capacity(128 + files.len() * 96);
    out.push_str(MODULE_HEADER);
    out.push('\n');

    if files.is_empty() {
        out.push_str("\nexport const ");
        out.push_str(EXPORT_NAME);
        out.push_str(" = [];\n");
        return out;
    }

    for (index, file) in files.iter().enumerate() {
        out.push_str("import * as ");
        out.push_str(&namespace(index));
        out.push_str(" from ");
        push_js_string(&mut out, &file.import_path);
        out.push_str(";\n");
    }

    out.push_str("\nexport const ");
    out.push_str(EXPORT_NAME);
    out.push_str(" = [\n");
    for index in 0..files.len() {
        out.push_str("  ");
        out.push_str(&namespace(index));
        out.push_str(",\n");
    }
    out.push_str("];\n");

    out
}

fn namespace(index: usize) -> String {
    format!("Showcase{index}")
}

/// Appends `value` as a double-quoted JS string literal.
///
/// Escapes follow JSON, plus U+2028/U+2029 which older JS engines reject
/// inside string literals.
fn push_js_string(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if u32::from(c) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
