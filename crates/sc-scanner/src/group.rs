//! Grouping of showcase files by logical component.

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use sc_core::{DiscoveredShowcase, ParsedShowcase};
use serde::Serialize;
use serde_json::{Map, Value};

/// Groups files by [`DiscoveredShowcase::component_name`].
///
/// Groups appear in first-encounter order; files keep their input order
/// within a group. A file whose name carries no showcase suffix forms its
/// own group keyed by its full base name.
///
/// # Examples
///
/// ```
/// use sc_core::DiscoveredShowcase;
/// use sc_scanner::group;
///
/// let files = vec![
///     DiscoveredShowcase::new("/p/Button.showcase.tsx", "Button.showcase.tsx", "/p/Button.showcase.tsx"),
///     DiscoveredShowcase::new("/p/Card.showcase.tsx", "Card.showcase.tsx", "/p/Card.showcase.tsx"),
///     DiscoveredShowcase::new("/p/Button.showcase.jsx", "Button.showcase.jsx", "/p/Button.showcase.jsx"),
/// ];
/// let groups = group(&files);
/// assert_eq!(groups.keys().collect::<Vec<_>>(), ["Button", "Card"]);
/// assert_eq!(groups["Button"].len(), 2);
/// ```
pub fn group(files: &[DiscoveredShowcase]) -> IndexMap<String, Vec<DiscoveredShowcase>> {
    group_by(files.iter().cloned(), DiscoveredShowcase::component_name)
}

/// Groups parsed files the same way as [`group`].
pub fn group_parsed(
    entries: Vec<(DiscoveredShowcase, ParsedShowcase)>,
) -> IndexMap<String, Vec<(DiscoveredShowcase, ParsedShowcase)>> {
    group_by(entries, |(file, _)| file.component_name())
}

fn group_by<T, F>(items: impl IntoIterator<Item = T>, key: F) -> IndexMap<String, Vec<T>>
where
    F: Fn(&T) -> String,
{
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Documentation entry for one showcase file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseDoc {
    /// Path relative to the discovery root.
    pub relative_path: Utf8PathBuf,
    /// The parsed default export.
    pub metadata: Map<String, Value>,
    /// Variant names in source order.
    pub variants: Vec<String>,
}

impl ShowcaseDoc {
    fn new(file: &DiscoveredShowcase, parsed: ParsedShowcase) -> Self {
        Self {
            relative_path: file.relative_path.clone(),
            variants: parsed.variants.into_keys().collect(),
            metadata: parsed.metadata,
        }
    }
}

/// Flattens grouped parse results into serializable documentation.
pub fn documentation(
    groups: IndexMap<String, Vec<(DiscoveredShowcase, ParsedShowcase)>>,
) -> IndexMap<String, Vec<ShowcaseDoc>> {
    groups
        .into_iter()
        .map(|(component, entries)| {
            let docs = entries
                .into_iter()
                .map(|(file, parsed)| ShowcaseDoc::new(&file, parsed))
                .collect();
            (component, docs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::{SourceLocation, Variant, VariantKind};

    fn file(relative: &str) -> DiscoveredShowcase {
        let absolute = format!("/proj/{relative}");
        DiscoveredShowcase::new(absolute.as_str(), relative, absolute.as_str())
    }

    #[test]
    fn test_group_tsx_and_jsx_share_component() {
        let files = vec![
            file("src/Button.showcase.tsx"),
            file("legacy/Button.showcase.jsx"),
        ];
        let groups = group(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Button"], files);
    }

    #[test]
    fn test_group_first_encounter_order() {
        let files = vec![
            file("src/Card.showcase.tsx"),
            file("src/Button.showcase.tsx"),
            file("src/nested/Card.showcase.jsx"),
        ];
        let groups = group(&files);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Card", "Button"]);
        let cards: Vec<_> = groups["Card"]
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(cards, vec!["src/Card.showcase.tsx", "src/nested/Card.showcase.jsx"]);
    }

    #[test]
    fn test_group_non_matching_name_is_own_group() {
        let files = vec![file("src/Button.tsx"), file("src/Button.showcase.tsx")];
        let groups = group(&files);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Button.tsx", "Button"]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_documentation_snapshot() {
        let mut parsed = ParsedShowcase::default();
        parsed
            .metadata
            .insert("title".to_owned(), Value::String("Button".to_owned()));
        parsed.variants.insert(
            "Primary".to_owned(),
            Variant {
                name: "Primary".to_owned(),
                kind: VariantKind::Arrow,
                location: SourceLocation {
                    line: 3,
                    column: 13,
                    byte_offset: 40,
                },
            },
        );

        let entries = vec![
            (file("src/Button.showcase.tsx"), parsed),
            (file("src/Button.showcase.jsx"), ParsedShowcase::default()),
        ];
        let docs = documentation(group_parsed(entries));

        insta::assert_json_snapshot!(docs, @r###"
        {
          "Button": [
            {
              "relativePath": "src/Button.showcase.tsx",
              "metadata": {
                "title": "Button"
              },
              "variants": [
                "Primary"
              ]
            },
            {
              "relativePath": "src/Button.showcase.jsx",
              "metadata": {},
              "variants": []
            }
          ]
        }
        "###);
    }
}
