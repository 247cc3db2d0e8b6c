//! # Keepsake
//!
//! Reactive session state that survives reloads.
//!
//! A [`SessionStore`] holds the current [`SessionState`] (logged-in flag and
//! username), calls its listeners synchronously on every change, and mirrors
//! each new value into a [`KeyValueStore`] so the next store created over
//! the same storage starts where the last one left off.
//!
//! ## Building blocks
//!
//! - `Store<T>` - Thread-safe reactive container with a listener registry
//! - `SessionStore` - `Store<SessionState>` plus optional persistence
//! - `KeyValueStore` - Storage seam, with `MemoryStorage` and `FileStorage`
//! - `StoreConfig` - Key and backend selection, loadable from JSON
//!
//! Storage problems never reach the caller: a missing or corrupt stored
//! value yields the logged-out default, and failed writes are logged.

pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::{BackendConfig, StoreConfig, USER_STATE_KEY};
pub use error::{Error, Result};
pub use session::SessionStore;
pub use state::SessionState;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{Store, SubscriberId, Subscription, SubscriptionGuard};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let session = SessionStore::in_memory();
        assert_eq!(session.get(), SessionState::default());
        session.set(SessionState::logged_in("alice"));
        assert_eq!(session.get().username, "alice");
    }
}
