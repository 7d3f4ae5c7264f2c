//! Glob pattern matching over a directory tree.
//!
//! [`PatternMatcher`] turns the configured `showcasePaths` and `exclude`
//! globs into a deduplicated list of absolute file paths.
//!
//! # Pattern Syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `*` | any run of characters within one path segment |
//! | `**` | zero or more whole directories |
//! | `?`, `[abc]`, `[!a-z]` | single-character classes |
//! | `{a,b}` | alternatives, expanded before compilation |
//!
//! Relative patterns are matched against the path relative to the discovery
//! root (a leading `./` is ignored); absolute patterns are matched against
//! the absolute path.

use std::sync::Arc;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern};
use sc_core::path::{normalize, relative_to};
use sc_core::{FxHashSet, fx_hash_set_with_capacity};
use tracing::debug;

use crate::error::ScanError;
use crate::walker::FileWalker;

/// `*` never crosses a separator; dotfiles are ordinary names.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Characters that end the literal prefix of a pattern.
const GLOB_META: &[char] = &['*', '?', '['];

/// A single compiled glob.
#[derive(Debug, Clone)]
struct Glob {
    pattern: Pattern,
    /// For patterns ending in `/**`: the directory part, so that everything
    /// below a matching directory matches too.
    subtree: Option<Pattern>,
}

impl Glob {
    fn new(raw: &str, source: &str) -> Result<Self, ScanError> {
        let compile =
            |text: &str| Pattern::new(text).map_err(|err| ScanError::invalid_pattern(source, err));

        let subtree = match raw.strip_suffix("/**") {
            Some(dir) if !dir.is_empty() => Some(compile(dir)?),
            _ => None,
        };

        Ok(Self {
            pattern: compile(raw)?,
            subtree,
        })
    }

    fn is_match(&self, candidate: &str) -> bool {
        if self.pattern.matches_with(candidate, MATCH_OPTIONS) {
            return true;
        }
        self.subtree.as_ref().is_some_and(|dir| {
            proper_ancestors(candidate).any(|ancestor| dir.matches_with(ancestor, MATCH_OPTIONS))
        })
    }

    /// Returns `true` if everything below `dir` matches.
    fn matches_dir(&self, dir: &str) -> bool {
        self.subtree
            .as_ref()
            .is_some_and(|subtree| subtree.matches_with(dir, MATCH_OPTIONS))
    }
}

/// Yields `a`, `a/b` for `a/b/c`.
fn proper_ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/')
        .map(|(index, _)| index)
        .filter(|&index| index > 0)
        .map(move |index| &path[..index])
}

/// One brace alternative of an include pattern.
#[derive(Debug, Clone)]
struct Alternative {
    glob: Glob,
    absolute: bool,
    /// Literal directory prefix; the walk never needs to look above it.
    base: Utf8PathBuf,
}

/// One configured include pattern.
#[derive(Debug, Clone)]
struct Include {
    raw: String,
    alternatives: Vec<Alternative>,
}

impl Include {
    fn new(raw: &str) -> Result<Self, ScanError> {
        let alternatives = expand_braces(raw)
            .iter()
            .map(|expanded| {
                let cleaned = clean_pattern(expanded);
                Ok(Alternative {
                    glob: Glob::new(cleaned, raw)?,
                    absolute: Utf8Path::new(cleaned).is_absolute(),
                    base: literal_base(cleaned),
                })
            })
            .collect::<Result<Vec<_>, ScanError>>()?;

        Ok(Self {
            raw: raw.to_owned(),
            alternatives,
        })
    }

    /// Directory the walk for this pattern starts at.
    fn walk_base(&self, root: &Utf8Path) -> Utf8PathBuf {
        let bases: Vec<Utf8PathBuf> = self
            .alternatives
            .iter()
            .map(|alt| normalize(&root.join(&alt.base)))
            .collect();
        common_ancestor(&bases).unwrap_or_else(|| root.to_owned())
    }

    fn is_match(&self, absolute: &Utf8Path, relative: &Utf8Path) -> bool {
        self.alternatives.iter().any(|alt| {
            let candidate = if alt.absolute { absolute } else { relative };
            alt.glob.is_match(candidate.as_str())
        })
    }
}

/// One compiled exclude glob.
///
/// Relative excludes only see the path below the discovery root, so
/// directories above the root never exclude anything.
#[derive(Debug, Clone)]
struct Exclude {
    glob: Glob,
    absolute: bool,
}

impl Exclude {
    fn new(raw: &str, source: &str) -> Result<Self, ScanError> {
        Ok(Self {
            glob: Glob::new(raw, source)?,
            absolute: Utf8Path::new(raw).is_absolute(),
        })
    }

    fn candidate<'p>(&self, absolute: &'p Utf8Path, relative: &'p Utf8Path) -> &'p str {
        if self.absolute {
            absolute.as_str()
        } else {
            relative.as_str()
        }
    }

    fn is_match(&self, absolute: &Utf8Path, relative: &Utf8Path) -> bool {
        self.glob.is_match(self.candidate(absolute, relative))
    }

    fn matches_dir(&self, absolute: &Utf8Path, relative: &Utf8Path) -> bool {
        self.glob.matches_dir(self.candidate(absolute, relative))
    }
}

/// Matches showcase globs against a directory tree.
///
/// Each include pattern is walked independently from its literal base
/// directory, in sorted order. Matches are concatenated in pattern order and
/// deduplicated, so a file matched by several patterns appears once, at the
/// position of its first match. Exclude patterns filter the union and prune
/// excluded directories from the walk.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use sc_scanner::PatternMatcher;
///
/// let matcher = PatternMatcher::new(
///     ["src/**/*.showcase.{tsx,jsx}"],
///     ["**/node_modules/**"],
/// )?;
/// for path in matcher.matches(Utf8Path::new("/projects/ui"))? {
///     println!("{path}");
/// }
/// # Ok::<(), sc_scanner::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    includes: Vec<Include>,
    excludes: Arc<[Exclude]>,
}

impl PatternMatcher {
    /// Compiles include and exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPattern`] for the first pattern that fails
    /// to compile.
    pub fn new<I, E>(patterns: I, excludes: E) -> Result<Self, ScanError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let includes = patterns
            .into_iter()
            .map(|pattern| Include::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut exclude_globs = Vec::new();
        for raw in excludes {
            let raw = raw.as_ref();
            for expanded in expand_braces(raw) {
                exclude_globs.push(Exclude::new(clean_pattern(&expanded), raw)?);
            }
        }

        Ok(Self {
            includes,
            excludes: exclude_globs.into(),
        })
    }

    /// Returns the include patterns as configured.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|include| include.raw.as_str())
    }

    /// Returns `true` if `path` is filtered out by an exclude pattern.
    ///
    /// Relative excludes are matched against `path` relative to `root`;
    /// absolute excludes against `path` itself.
    pub fn is_excluded(&self, path: &Utf8Path, root: &Utf8Path) -> bool {
        is_excluded_by(&self.excludes, path, &relative_to(path, root))
    }

    /// Finds every file under `root` matched by an include pattern and not
    /// excluded.
    ///
    /// Paths are absolute (when `root` is), normalized and unique. A pattern
    /// matching nothing, including one whose base directory does not exist,
    /// contributes nothing.
    ///
    /// # Errors
    ///
    /// - Returns [`ScanError::Config`] if `root` is not a directory
    /// - Returns [`ScanError::Walk`] if a pattern's base directory cannot be read
    pub fn matches(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "discovery root is not a directory: {root}"
            )));
        }
        let root = normalize(root);

        let mut seen: FxHashSet<Utf8PathBuf> = fx_hash_set_with_capacity(64);
        let mut matched = Vec::new();

        for include in &self.includes {
            let base = include.walk_base(&root);
            if !base.is_dir() {
                debug!(pattern = %include.raw, base = %base, "Pattern base directory not found");
                continue;
            }

            let excludes = Arc::clone(&self.excludes);
            let prune_root = root.clone();
            let walker = FileWalker::new(&base)?.with_prune(move |dir| {
                let relative = relative_to(dir, &prune_root);
                excludes
                    .iter()
                    .any(|exclude| exclude.matches_dir(dir, &relative))
            });

            let before = matched.len();
            for path in walker.collect_paths()? {
                let path = normalize(&path);
                let relative = relative_to(&path, &root);
                if !include.is_match(&path, &relative)
                    || is_excluded_by(&self.excludes, &path, &relative)
                {
                    continue;
                }
                if seen.insert(path.clone()) {
                    matched.push(path);
                }
            }

            if matched.len() == before {
                debug!(pattern = %include.raw, "Pattern matched no new files");
            }
        }

        debug!(root = %root, count = matched.len(), "Matched showcase paths");
        Ok(matched)
    }
}

fn is_excluded_by(excludes: &[Exclude], absolute: &Utf8Path, relative: &Utf8Path) -> bool {
    excludes
        .iter()
        .any(|exclude| exclude.is_match(absolute, relative))
}

/// Trims whitespace and a leading `./`.
fn clean_pattern(pattern: &str) -> &str {
    let trimmed = pattern.trim();
    trimmed.strip_prefix("./").unwrap_or(trimmed)
}

/// The directory components before the first one holding a glob
/// metacharacter. The final component never counts as a directory.
fn literal_base(pattern: &str) -> Utf8PathBuf {
    let components: Vec<Utf8Component<'_>> = Utf8Path::new(pattern).components().collect();
    let literal = components
        .iter()
        .position(|component| component.as_str().contains(GLOB_META))
        .unwrap_or(components.len());
    let end = literal.min(components.len().saturating_sub(1));

    components[..end]
        .iter()
        .map(Utf8Component::as_str)
        .collect()
}

/// Longest shared component prefix of `paths`.
fn common_ancestor(paths: &[Utf8PathBuf]) -> Option<Utf8PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut shared: Vec<Utf8Component<'_>> = first.components().collect();

    for path in rest {
        let len = shared
            .iter()
            .zip(path.components())
            .take_while(|(a, b)| *a == b)
            .count();
        shared.truncate(len);
    }

    Some(shared.iter().map(Utf8Component::as_str).collect())
}

/// Expands `{a,b}` alternatives, nested groups included.
///
/// Results keep left-to-right order with duplicates removed. An unbalanced
/// brace is left as written.
fn expand_braces(pattern: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for expanded in expand_first_group(pattern) {
        if !out.contains(&expanded) {
            out.push(expanded);
        }
    }
    out
}

fn expand_first_group(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_owned()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (index, ch) in pattern[open..].char_indices() {
        let index = open + index;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(index);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(index),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_owned()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = Vec::with_capacity(splits.len() + 2);
    bounds.push(open);
    bounds.extend(splits);
    bounds.push(close);

    bounds
        .windows(2)
        .flat_map(|window| {
            let option = &pattern[window[0] + 1..window[1]];
            expand_first_group(&format!("{prefix}{option}{suffix}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn utf8_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, "export const A = () => null;").expect("write file");
    }

    fn relative(root: &Utf8Path, paths: Vec<Utf8PathBuf>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(expand_braces("src/*.tsx"), vec!["src/*.tsx"]);
        assert_eq!(
            expand_braces("src/*.showcase.{tsx,jsx}"),
            vec!["src/*.showcase.tsx", "src/*.showcase.jsx"]
        );
        assert_eq!(
            expand_braces("{a,b/{c,d}}/x"),
            vec!["a/x", "b/c/x", "b/d/x"]
        );
        assert_eq!(expand_braces("{a,a}"), vec!["a"]);
        assert_eq!(expand_braces("src/{oops"), vec!["src/{oops"]);
    }

    #[test]
    fn test_literal_base() {
        assert_eq!(literal_base("src/**/*.showcase.tsx"), "src");
        assert_eq!(literal_base("src/components/Button.showcase.tsx"), "src/components");
        assert_eq!(literal_base("*.showcase.tsx"), "");
        assert_eq!(literal_base("/abs/dir/*.tsx"), "/abs/dir");
        assert_eq!(literal_base("../shared/**/*.tsx"), "../shared");
    }

    #[test]
    fn test_clean_pattern() {
        assert_eq!(clean_pattern("  ./src/**/*.tsx "), "src/**/*.tsx");
        assert_eq!(clean_pattern("src/*.tsx"), "src/*.tsx");
    }

    #[test]
    fn test_common_ancestor() {
        let paths = vec![
            Utf8PathBuf::from("/p/src/a"),
            Utf8PathBuf::from("/p/src/b/c"),
        ];
        assert_eq!(common_ancestor(&paths), Some(Utf8PathBuf::from("/p/src")));
        assert_eq!(common_ancestor(&[]), None);
    }

    #[test]
    fn test_glob_star_does_not_cross_separator() {
        let glob = Glob::new("src/*.tsx", "src/*.tsx").unwrap();
        assert!(glob.is_match("src/Button.tsx"));
        assert!(!glob.is_match("src/nested/Button.tsx"));
    }

    #[test]
    fn test_glob_trailing_double_star_matches_subtree() {
        let glob = Glob::new("**/node_modules/**", "**/node_modules/**").unwrap();
        assert!(glob.is_match("node_modules/pkg/Index.showcase.tsx"));
        assert!(glob.is_match("packages/ui/node_modules/pkg/deep/A.tsx"));
        assert!(!glob.is_match("src/Button.showcase.tsx"));
        assert!(glob.matches_dir("node_modules"));
        assert!(glob.matches_dir("packages/ui/node_modules"));
        assert!(!glob.matches_dir("src"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PatternMatcher::new(["src/[*.tsx"], Vec::<String>::new()).unwrap_err();
        match err {
            ScanError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "src/[*.tsx"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_matches_sorted_within_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/b/Card.showcase.tsx");
        touch(&root, "src/a/Button.showcase.tsx");
        touch(&root, "src/a/Button.tsx");

        let matcher =
            PatternMatcher::new(["src/**/*.showcase.tsx"], Vec::<String>::new()).unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(
            relative(&root, paths),
            vec!["src/a/Button.showcase.tsx", "src/b/Card.showcase.tsx"]
        );
    }

    #[test]
    fn test_overlapping_patterns_dedup_at_first_match() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/a/Button.showcase.tsx");
        touch(&root, "src/b/Card.showcase.tsx");

        let matcher = PatternMatcher::new(
            ["src/b/*.showcase.tsx", "src/**/*.showcase.tsx"],
            Vec::<String>::new(),
        )
        .unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(
            relative(&root, paths),
            vec!["src/b/Card.showcase.tsx", "src/a/Button.showcase.tsx"]
        );
    }

    #[test]
    fn test_excludes_filter_union() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/Button.showcase.tsx");
        touch(&root, "src/node_modules/lib/Lib.showcase.tsx");
        touch(&root, "src/Button.test.showcase.tsx");

        let matcher = PatternMatcher::new(
            ["src/**/*.showcase.tsx"],
            ["**/node_modules/**", "**/*.test.*"],
        )
        .unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(relative(&root, paths), vec!["src/Button.showcase.tsx"]);
        assert!(matcher.is_excluded(&root.join("src/node_modules/lib/Lib.showcase.tsx"), &root));
        assert!(!matcher.is_excluded(&root.join("src/Button.showcase.tsx"), &root));
    }

    #[test]
    fn test_relative_excludes_ignore_dirs_above_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir).join("node_modules/my-ui");
        touch(&root, "src/Button.showcase.tsx");
        touch(&root, "src/node_modules/dep/Dep.showcase.tsx");

        let matcher =
            PatternMatcher::new(["src/**/*.showcase.tsx"], ["**/node_modules/**"]).unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(relative(&root, paths), vec!["src/Button.showcase.tsx"]);
        assert!(!matcher.is_excluded(&root.join("src/Button.showcase.tsx"), &root));
    }

    #[test]
    fn test_absolute_exclude_matches_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/Button.showcase.tsx");
        touch(&root, "src/legacy/Old.showcase.tsx");

        let exclude = format!("{root}/src/legacy/**");
        let matcher = PatternMatcher::new(["src/**/*.showcase.tsx"], [exclude]).unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(relative(&root, paths), vec!["src/Button.showcase.tsx"]);
    }

    #[test]
    fn test_missing_base_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/Button.showcase.tsx");

        let matcher = PatternMatcher::new(
            ["missing/**/*.showcase.tsx", "src/*.showcase.tsx"],
            Vec::<String>::new(),
        )
        .unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(relative(&root, paths), vec!["src/Button.showcase.tsx"]);
    }

    #[test]
    fn test_brace_alternatives_share_one_walk() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "src/Button.showcase.jsx");
        touch(&root, "src/Button.showcase.tsx");
        touch(&root, "src/Card.showcase.tsx");

        let matcher =
            PatternMatcher::new(["./src/*.showcase.{tsx,jsx}"], Vec::<String>::new()).unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(
            relative(&root, paths),
            vec![
                "src/Button.showcase.jsx",
                "src/Button.showcase.tsx",
                "src/Card.showcase.tsx"
            ]
        );
    }

    #[test]
    fn test_absolute_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, "lib/Badge.showcase.tsx");

        let pattern = format!("{root}/lib/*.showcase.tsx");
        let matcher = PatternMatcher::new([pattern], Vec::<String>::new()).unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(paths, vec![root.join("lib/Badge.showcase.tsx")]);
    }

    #[test]
    fn test_hidden_directories_are_visited() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_root(&dir);
        touch(&root, ".storybook/Theme.showcase.tsx");
        fs::write(root.join(".gitignore"), ".storybook/\n").unwrap();

        let matcher = PatternMatcher::new(["**/*.showcase.tsx"], Vec::<String>::new()).unwrap();
        let paths = matcher.matches(&root).unwrap();

        assert_eq!(relative(&root, paths), vec![".storybook/Theme.showcase.tsx"]);
    }

    #[test]
    fn test_root_must_be_directory() {
        let matcher = PatternMatcher::new(["**/*.tsx"], Vec::<String>::new()).unwrap();
        let err = matcher.matches(Utf8Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_patterns_accessor() {
        let matcher =
            PatternMatcher::new(["src/**/*.tsx", "lib/*.jsx"], Vec::<String>::new()).unwrap();
        assert_eq!(
            matcher.patterns().collect::<Vec<_>>(),
            vec!["src/**/*.tsx", "lib/*.jsx"]
        );
    }
}
