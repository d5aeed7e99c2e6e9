//! Session Storage
//!
//! Key/value store the tracker keeps its per-tab session entries in.
//! The session container only ever removes its token entry through it.

pub mod memory;

pub use memory::MemoryStorage;

/// Key/value store scoped to the current browsing session
///
/// Operations do not report failures; an implementation that can fail is
/// expected to handle or log the failure itself.
pub trait SessionStorage: Send + Sync {
    /// Read a stored value
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str);

    /// Remove a stored value; removing a missing key does nothing
    fn remove_item(&self, key: &str);
}
