//! Persistence backends.
//!
//! A [`KeyValueStore`] is an opaque string-keyed get/set service. The
//! session store only ever writes its own key and treats every backend
//! error as non-fatal.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::Result;

/// String-keyed durable storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous content.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// The session store never deletes its key (logging out writes the
    /// logged-out state); this is for callers managing storage directly.
    fn remove(&self, key: &str) -> Result<()>;
}
