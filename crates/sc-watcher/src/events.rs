//! Debounced file change events.

use camino::Utf8PathBuf;

/// A single changed path, reported after debouncing.
///
/// The debouncer does not distinguish create, modify and delete; every kind
/// of change is a reason to re-run discovery.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use sc_watcher::FileEvent;
///
/// let event = FileEvent::new(Utf8PathBuf::from("/proj/src/Button.showcase.tsx"));
/// assert_eq!(event.path.file_name(), Some("Button.showcase.tsx"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// Absolute path of the changed file.
    pub path: Utf8PathBuf,
}

impl FileEvent {
    /// Creates an event for `path`.
    #[inline]
    #[must_use]
    pub const fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_event_keeps_path() {
        let event = FileEvent::new(Utf8PathBuf::from("src/Card.showcase.jsx"));
        assert_eq!(event.path, "src/Card.showcase.jsx");
    }
}
