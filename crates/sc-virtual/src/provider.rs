//! In-memory serving of the generated module and signals toward the host.
//!
//! The host bundler integration implements [`HostSignals`] and routes its
//! resolve/load hooks through a [`SourceProvider`]. Nothing in discovery or
//! generation depends on either trait.

use std::sync::Arc;

use parking_lot::RwLock;

/// Well-known id under which the generated module is served.
pub const VIRTUAL_MODULE_ID: &str = "virtual:showcase-files";

/// The conventional resolved form of [`VIRTUAL_MODULE_ID`]; the NUL prefix
/// keeps other plugins from treating it as a filesystem path.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:showcase-files";

/// Returns `true` for either form of the virtual module id.
#[must_use]
pub fn is_virtual_module_id(id: &str) -> bool {
    id == VIRTUAL_MODULE_ID || id == RESOLVED_VIRTUAL_MODULE_ID
}

/// Serves synthesized module source to a bundler.
pub trait SourceProvider: Send + Sync {
    /// Returns `true` if this provider owns `id`.
    fn resolve_id(&self, id: &str) -> bool;

    /// Returns the current source for `id`, or `None` if it is not owned.
    fn load(&self, id: &str) -> Option<Arc<str>>;
}

/// Notifications sent to the host after a completed regeneration.
pub trait HostSignals: Send + Sync {
    /// Drops the host's cached copy of module `id`.
    fn invalidate(&self, id: &str);

    /// Asks connected clients to reload.
    fn full_reload(&self);
}

/// The single owner of the generated module source.
///
/// Writers replace the content wholesale; the last completed write wins.
/// Readers get a cheap [`Arc`] snapshot that stays valid across swaps.
///
/// # Examples
///
/// ```
/// use sc_virtual::{SourceProvider, VIRTUAL_MODULE_ID, VirtualModule};
///
/// let module = VirtualModule::new("export const showcaseModules = [];\n");
/// assert!(module.resolve_id(VIRTUAL_MODULE_ID));
/// assert!(!module.resolve_id("./Button.tsx"));
///
/// let version = module.publish("// next\n".to_owned());
/// assert_eq!(version, 1);
/// assert_eq!(module.load(VIRTUAL_MODULE_ID).as_deref(), Some("// next\n"));
/// ```
#[derive(Debug)]
pub struct VirtualModule {
    state: RwLock<Published>,
}

#[derive(Debug)]
struct Published {
    content: Arc<str>,
    version: u64,
}

impl VirtualModule {
    /// Creates the module with its initial content (version 0).
    #[must_use]
    pub fn new(content: impl Into<Arc<str>>) -> Self {
        Self {
            state: RwLock::new(Published {
                content: content.into(),
                version: 0,
            }),
        }
    }

    /// Replaces the content and returns the new version number.
    pub fn publish(&self, content: String) -> u64 {
        let mut state = self.state.write();
        state.content = content.into();
        state.version += 1;
        state.version
    }

    /// Returns a snapshot of the current content.
    #[must_use]
    pub fn content(&self) -> Arc<str> {
        Arc::clone(&self.state.read().content)
    }

    /// Returns how many times the content has been replaced.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.read().version
    }
}

impl SourceProvider for VirtualModule {
    fn resolve_id(&self, id: &str) -> bool {
        is_virtual_module_id(id)
    }

    fn load(&self, id: &str) -> Option<Arc<str>> {
        is_virtual_module_id(id).then(|| self.content())
    }
}
