//! Source location types.

use serde::{Deserialize, Serialize};

/// A position within a showcase source file.
///
/// - `line` is 1-indexed (first line is line 1)
/// - `column` is 0-indexed, counted in UTF-8 bytes within the line
/// - `byte_offset` is the absolute byte position from the start of the file
///
/// # Examples
///
/// ```
/// use sc_core::SourceLocation;
///
/// let loc = SourceLocation::new(3, 0, 58);
/// assert_eq!(loc.to_string(), "3:0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: u32,

    /// Column number (0-indexed).
    pub column: u32,

    /// Absolute byte offset from the start of the file.
    pub byte_offset: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    #[inline]
    #[must_use]
    pub const fn new(line: u32, column: u32, byte_offset: u32) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_ordering_fields() {
        let loc = SourceLocation::new(10, 4, 210);
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 4);
        assert_eq!(loc.byte_offset, 210);
    }

    #[test]
    fn test_location_serializes_camel_case() {
        let json = serde_json::to_string(&SourceLocation::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"line":1,"column":2,"byteOffset":3}"#);
    }
}
