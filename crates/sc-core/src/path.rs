//! Lexical path helpers.
//!
//! Every discovery call receives its root explicitly, so nothing here consults
//! the process working directory or the filesystem. All operations are purely
//! lexical: `..` is folded against the preceding component and `.` is dropped.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Lexically normalizes a path.
///
/// `.` components are removed and `..` cancels the preceding normal
/// component. A `..` directly below the root is dropped, while a leading
/// `..` in a relative path is kept. An empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use sc_core::path::normalize;
///
/// assert_eq!(normalize(Utf8Path::new("/a/./b/../c")), "/a/c");
/// assert_eq!(normalize(Utf8Path::new("../x/./y")), "../x/y");
/// assert_eq!(normalize(Utf8Path::new("a/..")), ".");
/// ```
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                Some(Utf8Component::ParentDir | Utf8Component::CurDir) | None => {
                    out.push("..");
                }
            },
            other => out.push(other.as_str()),
        }
    }

    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolves `path` against `base` unless it is already absolute.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use sc_core::path::absolutize;
///
/// let base = Utf8Path::new("/proj");
/// assert_eq!(absolutize(base, Utf8Path::new("./styles/global.css")), "/proj/styles/global.css");
/// assert_eq!(absolutize(base, Utf8Path::new("/etc/theme.css")), "/etc/theme.css");
/// ```
#[must_use]
pub fn absolutize(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Computes `path` relative to `base`.
///
/// The result may climb out of `base` with `..` segments; no sandboxing is
/// applied. When the two paths cannot be related (one absolute and one
/// relative, or different roots/prefixes) the normalized `path` is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use sc_core::path::relative_to;
///
/// let cwd = Utf8Path::new("/proj");
/// assert_eq!(relative_to(Utf8Path::new("/proj/src/Button.showcase.tsx"), cwd), "src/Button.showcase.tsx");
/// assert_eq!(relative_to(Utf8Path::new("/shared/Card.showcase.tsx"), cwd), "../shared/Card.showcase.tsx");
/// assert_eq!(relative_to(cwd, cwd), ".");
/// ```
#[must_use]
pub fn relative_to(path: &Utf8Path, base: &Utf8Path) -> Utf8PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    if path.is_absolute() != base.is_absolute() {
        return path;
    }

    let mut remaining = path.components().peekable();
    let mut base_components = base.components().peekable();

    loop {
        let same = matches!(
            (remaining.peek(), base_components.peek()),
            (Some(a), Some(b)) if a == b
        );
        if !same {
            break;
        }
        remaining.next();
        base_components.next();
    }

    // Differing roots or drive prefixes have no relative form.
    if matches!(
        remaining.peek(),
        Some(Utf8Component::Prefix(_) | Utf8Component::RootDir)
    ) {
        return path;
    }

    let mut out = Utf8PathBuf::new();
    for component in base_components {
        if component != Utf8Component::CurDir {
            out.push("..");
        }
    }
    for component in remaining {
        if component != Utf8Component::CurDir {
            out.push(component.as_str());
        }
    }

    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(normalize(Utf8Path::new("./src/./Button.tsx")), "src/Button.tsx");
    }

    #[test]
    fn test_normalize_parent_below_root_is_dropped() {
        assert_eq!(normalize(Utf8Path::new("/../a")), "/a");
    }

    #[test]
    fn test_normalize_keeps_leading_parents() {
        assert_eq!(normalize(Utf8Path::new("../../a/b/..")), "../../a");
    }

    #[test]
    fn test_relative_to_nested() {
        let rel = relative_to(
            Utf8Path::new("/proj/src/nested/Card.showcase.tsx"),
            Utf8Path::new("/proj"),
        );
        assert_eq!(rel, "src/nested/Card.showcase.tsx");
    }

    #[test]
    fn test_relative_to_sibling_tree() {
        let rel = relative_to(
            Utf8Path::new("/work/lib/ui/Card.showcase.tsx"),
            Utf8Path::new("/work/app/site"),
        );
        assert_eq!(rel, "../../lib/ui/Card.showcase.tsx");
    }

    #[test]
    fn test_relative_to_mixed_kinds_returns_path() {
        let rel = relative_to(Utf8Path::new("src/a.tsx"), Utf8Path::new("/proj"));
        assert_eq!(rel, "src/a.tsx");
    }

    #[test]
    fn test_relative_to_relative_paths() {
        let rel = relative_to(Utf8Path::new("a/b/c.tsx"), Utf8Path::new("a/d"));
        assert_eq!(rel, "../b/c.tsx");
    }
}
