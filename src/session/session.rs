use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::config::{StoreConfig, USER_STATE_KEY};
use crate::state::SessionState;
use crate::storage::KeyValueStore;
use crate::store::{Store, Subscription};

/// Reactive session state mirrored into key-value storage.
///
/// Construction restores the state persisted under the storage key, falling
/// back to the logged-out default when nothing usable is stored. Every
/// change notifies listeners first and is then written back to storage.
///
/// Without a storage backend the store is purely in-memory. That choice is
/// made at construction and never changes.
///
/// # Examples
///
/// ```
/// use keepsake::{KeyValueStore, MemoryStorage, SessionState, SessionStore};
///
/// let storage = MemoryStorage::new();
/// let session = SessionStore::with_storage(storage.clone());
/// assert_eq!(session.get(), SessionState::default());
///
/// session.set(SessionState::logged_in("alice"));
/// assert_eq!(
///     storage.get("userState").unwrap().as_deref(),
///     Some(r#"{"isLoggedIn":true,"username":"alice"}"#)
/// );
///
/// // A new store over the same storage picks the session back up.
/// let reloaded = SessionStore::with_storage(storage);
/// assert_eq!(reloaded.get().username, "alice");
/// ```
#[derive(Clone)]
pub struct SessionStore {
    store: Store<SessionState>,
    storage: Option<Arc<dyn KeyValueStore>>,
    key: Arc<str>,
    // Held while writing to storage, so the last write carries the latest value.
    write_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    /// Create a store over an optional backend, using the `"userState"` key.
    pub fn new(storage: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self::with_key(storage, USER_STATE_KEY)
    }

    /// Create a store that persists under `key`.
    pub fn with_key(storage: Option<Arc<dyn KeyValueStore>>, key: impl Into<Arc<str>>) -> Self {
        let key = key.into();
        let initial = match &storage {
            Some(storage) => restore(storage.as_ref(), &key),
            None => SessionState::default(),
        };
        Self {
            store: Store::new(initial),
            storage,
            key,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a store persisted to `storage`.
    pub fn with_storage<S>(storage: S) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self::new(Some(Arc::new(storage)))
    }

    /// Create a store with no persistence.
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Create a store from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_key(config.build_backend(), config.key.as_str())
    }

    /// Whether changes are written to a storage backend.
    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    /// The storage key the state is written under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current state.
    pub fn get(&self) -> SessionState {
        self.store.get()
    }

    /// Read the current state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        self.store.read(f)
    }

    /// Replace the state, notify listeners, then persist.
    ///
    /// What gets persisted is the state after notification, so a listener
    /// that calls `set` itself leaves storage holding its value.
    pub fn set(&self, new_state: SessionState) {
        self.store.set(new_state);
        self.persist();
    }

    /// Replace the state with `f(current)`.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(SessionState) -> SessionState,
    {
        self.set(f(self.get()));
    }

    /// Reset to the logged-out state.
    pub fn clear(&self) {
        self.set(SessionState::default());
    }

    /// Register a listener; it is called right away with the current state
    /// and again after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Number of listeners currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = self
            .get()
            .to_json()
            .and_then(|text| storage.set(&self.key, &text));
        match result {
            Ok(()) => debug!(key = %self.key, "session state persisted"),
            Err(e) => warn!(key = %self.key, error = %e, "failed to persist session state"),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.get())
            .field("key", &self.key)
            .field("persistent", &self.is_persistent())
            .finish()
    }
}

/// Load the persisted state, or the default if none is usable.
fn restore(storage: &dyn KeyValueStore, key: &str) -> SessionState {
    let text = match storage.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(key, "no persisted session state, starting logged out");
            return SessionState::default();
        }
        Err(e) => {
            warn!(key, error = %e, "could not read persisted session state");
            return SessionState::default();
        }
    };
    match SessionState::from_json(&text) {
        Ok(state) => {
            debug!(key, logged_in = state.is_logged_in, "session state restored");
            state
        }
        Err(e) => {
            warn!(key, error = %e, "discarding malformed persisted session state");
            SessionState::default()
        }
    }
}
