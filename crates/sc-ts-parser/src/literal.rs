//! Conversion of statically known expressions into JSON values.
//!
//! Showcase metadata is almost always a plain object literal. Literal parts
//! (strings, numbers, booleans, `null`, arrays, objects) keep their JSON
//! type; every other expression is kept as its verbatim source text, e.g.
//! `component: Button` becomes `"component": "Button"`.

use serde_json::{Map, Number, Value};
use tree_sitter::Node;

use crate::exports::Bindings;

/// Maximum nesting (and identifier indirection) followed before falling
/// back to source text.
const MAX_DEPTH: usize = 32;

/// Reads literal values out of a syntax tree.
pub(crate) struct LiteralReader<'a, 'tree> {
    source: &'a [u8],
    bindings: &'a Bindings<'a, 'tree>,
}

impl<'a, 'tree> LiteralReader<'a, 'tree> {
    pub(crate) const fn new(source: &'a [u8], bindings: &'a Bindings<'a, 'tree>) -> Self {
        Self { source, bindings }
    }

    /// Returns the object a default export evaluates to, or an empty map.
    pub(crate) fn metadata(&self, node: Node<'tree>) -> Map<String, Value> {
        match self.value(node) {
            Value::Object(map) => map,
            other => {
                tracing::debug!(
                    kind = node.kind(),
                    value = %other,
                    "default export is not an object literal"
                );
                Map::new()
            }
        }
    }

    /// Converts an expression into a JSON value.
    pub(crate) fn value(&self, node: Node<'tree>) -> Value {
        self.value_at(node, 0)
    }

    /// Follows identifiers through top-level bindings.
    ///
    /// Returns the bound expression (with wrappers removed), or `node`
    /// itself when it is not a bound identifier.
    pub(crate) fn resolve(&self, node: Node<'tree>) -> Node<'tree> {
        let mut current = unwrap_expression(node);
        for _ in 0..MAX_DEPTH {
            if current.kind() != "identifier" {
                break;
            }
            match self.bindings.get(self.text(current)) {
                Some(bound) => current = unwrap_expression(*bound),
                None => break,
            }
        }
        current
    }

    fn value_at(&self, node: Node<'tree>, depth: usize) -> Value {
        let node = unwrap_expression(node);
        if depth > MAX_DEPTH {
            return self.source_text(node);
        }

        match node.kind() {
            "string" => Value::String(self.string_literal(node)),
            "template_string" => self.template_literal(node),
            "number" => number_value(self.text(node)).unwrap_or_else(|| self.source_text(node)),
            "unary_expression" => self.unary_value(node),
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" | "undefined" => Value::Null,
            "array" => self.array_value(node, depth),
            "object" => Value::Object(self.object_value(node, depth)),
            "identifier" => self.identifier_value(node, depth),
            _ => self.source_text(node),
        }
    }

    /// An identifier bound to a literal takes that literal's value; any
    /// other identifier stays as its name.
    fn identifier_value(&self, node: Node<'tree>, depth: usize) -> Value {
        let target = self.resolve(node);
        if target.id() != node.id() && is_literal_kind(target.kind()) {
            self.value_at(target, depth + 1)
        } else {
            self.source_text(node)
        }
    }

    fn unary_value(&self, node: Node<'tree>) -> Value {
        let numeric = node
            .child_by_field_name("argument")
            .is_some_and(|arg| arg.kind() == "number");
        if numeric {
            if let Some(value) = number_value(self.text(node)) {
                return value;
            }
        }
        self.source_text(node)
    }

    fn array_value(&self, node: Node<'tree>, depth: usize) -> Value {
        if depth > MAX_DEPTH {
            return Value::Array(Vec::new());
        }
        let mut items = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "comment" => {}
                "spread_element" => match self.spread_target(child) {
                    Some(target) if target.kind() == "array" => {
                        if let Value::Array(spread) = self.value_at(target, depth + 1) {
                            items.extend(spread);
                        }
                    }
                    _ => items.push(self.source_text(child)),
                },
                _ => items.push(self.value_at(child, depth + 1)),
            }
        }

        Value::Array(items)
    }

    /// Spreads recurse through here directly, so the depth limit is checked
    /// again; a self-referencing spread ends as an empty object.
    fn object_value(&self, node: Node<'tree>, depth: usize) -> Map<String, Value> {
        if depth > MAX_DEPTH {
            return Map::new();
        }
        let mut map = Map::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "pair" => {
                    let (Some(key), Some(value)) = (
                        child.child_by_field_name("key"),
                        child.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    map.insert(self.property_key(key), self.value_at(value, depth + 1));
                }
                "shorthand_property_identifier" => {
                    let name = self.text(child).to_owned();
                    let value = match self.bindings.get(name.as_str()) {
                        Some(bound) if is_literal_kind(unwrap_expression(*bound).kind()) => {
                            self.value_at(*bound, depth + 1)
                        }
                        _ => Value::String(name.clone()),
                    };
                    map.insert(name, value);
                }
                "spread_element" => {
                    if let Some(target) = self.spread_target(child) {
                        if target.kind() == "object" {
                            map.extend(self.object_value(target, depth + 1));
                        }
                    }
                }
                "method_definition" => {
                    if let Some(key) = child.child_by_field_name("name") {
                        map.insert(self.property_key(key), self.source_text(child));
                    }
                }
                _ => {}
            }
        }

        map
    }

    /// Resolves the operand of `...expr`.
    fn spread_target(&self, spread: Node<'tree>) -> Option<Node<'tree>> {
        let mut cursor = spread.walk();
        let operand = spread
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment")?;
        Some(self.resolve(operand))
    }

    fn property_key(&self, key: Node<'tree>) -> String {
        match key.kind() {
            "string" => self.string_literal(key),
            "computed_property_name" => {
                let mut cursor = key.walk();
                let inner = key.named_children(&mut cursor).next();
                match inner {
                    Some(inner) if inner.kind() == "string" => self.string_literal(inner),
                    Some(inner) => self.text(inner).to_owned(),
                    None => self.text(key).to_owned(),
                }
            }
            _ => self.text(key).to_owned(),
        }
    }

    fn string_literal(&self, node: Node<'tree>) -> String {
        unescape(strip_delimiters(self.text(node)))
    }

    fn template_literal(&self, node: Node<'tree>) -> Value {
        let mut cursor = node.walk();
        let substituted = node
            .named_children(&mut cursor)
            .any(|n| n.kind() == "template_substitution");
        if substituted {
            self.source_text(node)
        } else {
            Value::String(unescape(strip_delimiters(self.text(node))))
        }
    }

    fn source_text(&self, node: Node<'tree>) -> Value {
        Value::String(self.text(node).to_owned())
    }

    fn text(&self, node: Node<'tree>) -> &'a str {
        node.utf8_text(self.source).unwrap_or_default()
    }
}

/// Strips wrappers that do not change a value: parentheses, `satisfies`,
/// `as` and non-null assertions.
pub(crate) fn unwrap_expression(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while matches!(
        current.kind(),
        "parenthesized_expression" | "satisfies_expression" | "as_expression" | "non_null_expression"
    ) {
        let mut cursor = current.walk();
        let inner = current
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment");
        match inner {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

fn is_literal_kind(kind: &str) -> bool {
    matches!(
        kind,
        "string"
            | "template_string"
            | "number"
            | "unary_expression"
            | "true"
            | "false"
            | "null"
            | "undefined"
            | "array"
            | "object"
    )
}

/// Removes the surrounding quote or backtick characters.
fn strip_delimiters(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'' | '`')), Some(close)) if open == close => chars.as_str(),
        _ => raw,
    }
}

/// Parses a JavaScript numeric literal.
///
/// Returns `None` for values JSON cannot represent (`BigInt`, NaN, overflow).
fn number_value(text: &str) -> Option<Value> {
    let cleaned: String = text.chars().filter(|c| *c != '_' && !c.is_whitespace()).collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };

    if digits.ends_with('n') {
        return None;
    }

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let value = i64::from_str_radix(digits.get(2..)?, radix).ok()?;
        return Some(Value::from(if negative { -value } else { value }));
    }

    if let Ok(value) = digits.parse::<i64>() {
        return Some(Value::from(if negative { -value } else { value }));
    }

    let value: f64 = digits.parse().ok()?;
    Number::from_f64(if negative { -value } else { value }).map(Value::Number)
}

/// Resolves JavaScript escape sequences.
///
/// Malformed escapes are kept verbatim; an unpaired surrogate becomes U+FFFD.
fn unescape(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            out.push('\\');
            break;
        };
        i += 1;
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => match hex_code(&chars, i, 2) {
                Some(code) => {
                    out.extend(char::from_u32(code));
                    i += 2;
                }
                None => out.push('x'),
            },
            'u' => match unicode_escape(&chars, i) {
                Some((code, len)) => {
                    i += len;
                    if (0xD800..=0xDBFF).contains(&code) {
                        // A high surrogate pairs with an immediately following low one.
                        let low = (chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'u'))
                            .then(|| unicode_escape(&chars, i + 2))
                            .flatten()
                            .filter(|(low, _)| (0xDC00..=0xDFFF).contains(low));
                        match low {
                            Some((low, low_len)) => {
                                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                                out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                                i += 2 + low_len;
                            }
                            None => out.push(char::REPLACEMENT_CHARACTER),
                        }
                    } else {
                        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    }
                }
                None => out.push('u'),
            },
            // Line continuation.
            '\n' => {}
            '\r' => {
                if chars.get(i) == Some(&'\n') {
                    i += 1;
                }
            }
            other => out.push(other),
        }
    }

    out
}

/// Parses `len` hex digits starting at `start`.
fn hex_code(chars: &[char], start: usize, len: usize) -> Option<u32> {
    let digits: String = chars.get(start..start + len)?.iter().collect();
    u32::from_str_radix(&digits, 16).ok()
}

/// Parses the body of a `\u` escape (`XXXX` or `{X...}`), returning the code
/// point and the number of characters consumed.
fn unicode_escape(chars: &[char], start: usize) -> Option<(u32, usize)> {
    if chars.get(start) == Some(&'{') {
        let close = chars.get(start..)?.iter().position(|c| *c == '}')?;
        let code = hex_code(chars, start + 1, close.checked_sub(1)?)?;
        Some((code, close + 1))
    } else {
        hex_code(chars, start, 4).map(|code| (code, 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_delimiters() {
        assert_eq!(strip_delimiters("'abc'"), "abc");
        assert_eq!(strip_delimiters("\"abc\""), "abc");
        assert_eq!(strip_delimiters("`abc`"), "abc");
        assert_eq!(strip_delimiters("abc"), "abc");
        assert_eq!(strip_delimiters("'"), "'");
    }

    #[test]
    fn test_unescape_common_sequences() {
        assert_eq!(unescape(r"It\'s"), "It's");
        assert_eq!(unescape(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(unescape(r"\x41B\u{43}"), "ABC");
        assert_eq!(unescape(r"back\\slash"), "back\\slash");
    }

    #[test]
    fn test_unescape_surrogate_pair() {
        assert_eq!(unescape(r"\uD83D\uDE00"), "\u{1F600}");
        assert_eq!(unescape(r"x\uD83Dy"), "x\u{FFFD}y");
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value("42"), Some(Value::from(42)));
        assert_eq!(number_value("-7"), Some(Value::from(-7)));
        assert_eq!(number_value("1_000"), Some(Value::from(1000)));
        assert_eq!(number_value("0xff"), Some(Value::from(255)));
        assert_eq!(number_value("1.5"), Some(Value::from(1.5)));
        assert_eq!(number_value(".5"), Some(Value::from(0.5)));
        assert_eq!(number_value("10n"), None);
    }
}
