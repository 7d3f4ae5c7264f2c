//! Turns matched paths into [`DiscoveredShowcase`] records.

use camino::Utf8Path;
use sc_core::path::{normalize, relative_to};
use sc_core::{DiscoveredShowcase, FxHashSet, fx_hash_set_with_capacity};

/// Resolves matched paths into ordered, unique showcase records.
///
/// Order follows the input; a path whose normalized form was already seen is
/// skipped. `relative_path` is computed lexically against `cwd` and may climb
/// out of it with `..` segments.
///
/// The import specifier is the normalized path when it is absolute. A
/// relative input is normalized and then prefixed with `./` so the bundler
/// does not treat it as a bare package name.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use sc_scanner::resolve;
///
/// let files = resolve(
///     ["/proj/src/Button.showcase.tsx", "/proj/src/Button.showcase.tsx"],
///     Utf8Path::new("/proj"),
/// );
/// assert_eq!(files.len(), 1);
/// assert_eq!(files[0].relative_path, "src/Button.showcase.tsx");
/// assert_eq!(files[0].import_path, "/proj/src/Button.showcase.tsx");
/// ```
pub fn resolve<I>(paths: I, cwd: &Utf8Path) -> Vec<DiscoveredShowcase>
where
    I: IntoIterator,
    I::Item: AsRef<Utf8Path>,
{
    let paths = paths.into_iter();
    let mut seen: FxHashSet<_> = fx_hash_set_with_capacity(paths.size_hint().0);
    let mut files = Vec::with_capacity(paths.size_hint().0);

    for path in paths {
        let path = path.as_ref();
        let absolute_path = normalize(path);
        if !seen.insert(absolute_path.clone()) {
            continue;
        }

        let relative_path = relative_to(&absolute_path, cwd);
        let import_path = if absolute_path.is_absolute() {
            absolute_path.as_str().to_owned()
        } else {
            format!("./{absolute_path}")
        };

        files.push(DiscoveredShowcase {
            absolute_path,
            relative_path,
            import_path,
        });
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_preserves_order_and_dedups() {
        let files = resolve(
            [
                "/proj/src/b/Card.showcase.tsx",
                "/proj/src/a/Button.showcase.tsx",
                "/proj/src/b/../b/Card.showcase.tsx",
            ],
            Utf8Path::new("/proj"),
        );

        let relative: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            relative,
            vec!["src/b/Card.showcase.tsx", "src/a/Button.showcase.tsx"]
        );
    }

    #[test]
    fn test_resolve_outside_cwd_uses_parent_segments() {
        let files = resolve(
            ["/shared/ui/Badge.showcase.tsx"],
            Utf8Path::new("/proj/app"),
        );
        assert_eq!(files[0].relative_path, "../../shared/ui/Badge.showcase.tsx");
        assert_eq!(files[0].import_path, "/shared/ui/Badge.showcase.tsx");
    }

    #[test]
    fn test_resolve_relative_input_gets_dot_slash() {
        let files = resolve(["src/Button.showcase.tsx"], Utf8Path::new("."));
        assert_eq!(files[0].import_path, "./src/Button.showcase.tsx");
        assert_eq!(files[0].absolute_path, "src/Button.showcase.tsx");
    }

    #[test]
    fn test_resolve_dot_prefixed_input_is_not_doubled() {
        let files = resolve(
            ["./src/Button.showcase.tsx", "src/./Card.showcase.tsx"],
            Utf8Path::new("."),
        );
        assert_eq!(files[0].import_path, "./src/Button.showcase.tsx");
        assert_eq!(files[1].import_path, "./src/Card.showcase.tsx");
    }

    #[test]
    fn test_resolve_parent_relative_input() {
        let files = resolve(["../shared/Badge.showcase.tsx"], Utf8Path::new("."));
        assert_eq!(files[0].import_path, "./../shared/Badge.showcase.tsx");
    }

    #[test]
    fn test_resolve_empty() {
        let files = resolve(Vec::<&str>::new(), Utf8Path::new("/proj"));
        assert!(files.is_empty());
    }
}
