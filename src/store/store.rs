use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tracing::trace;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifies one registered listener within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

/// Listener registry. Entries stay in registration order.
struct Listeners<T> {
    next_id: u64,
    entries: Vec<(SubscriberId, Listener<T>)>,
}

impl<T> Listeners<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, listener: Listener<T>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn snapshot(&self) -> Vec<Listener<T>> {
        self.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// A thread-safe reactive value container.
///
/// Every `set` or `update` notifies the listeners registered at that moment,
/// in registration order, before returning. Listeners run outside the
/// store's locks, so they may read the store or unsubscribe.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    listeners: Arc<RwLock<Listeners<T>>>,
}

impl<T: Clone + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            listeners: Arc::new(RwLock::new(Listeners::new())),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        read(&self.state).clone()
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&read(&self.state))
    }

    /// Set a new state value and notify listeners.
    pub fn set(&self, new_state: T) {
        *write(&self.state) = new_state;
        self.notify();
    }

    /// Mutate the state in place and notify listeners.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut write(&self.state));
        self.notify();
    }

    /// Register a listener.
    ///
    /// The listener is called once right away with the current state, then
    /// after every change until the returned [`Subscription`] is
    /// unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let listener: Listener<T> = Arc::new(listener);
        let id = write(&self.listeners).insert(Arc::clone(&listener));
        trace!(?id, "listener registered");

        let current = self.get();
        listener(&current);

        let registry: Weak<RwLock<Listeners<T>>> = Arc::downgrade(&self.listeners);
        Subscription::new(id, move || match registry.upgrade() {
            Some(registry) => write(&registry).remove(id),
            None => false,
        })
    }

    /// Number of listeners currently registered.
    pub fn subscriber_count(&self) -> usize {
        read(&self.listeners).entries.len()
    }

    fn notify(&self) {
        let listeners = read(&self.listeners).snapshot();
        if listeners.is_empty() {
            return;
        }
        trace!(count = listeners.len(), "notifying listeners");
        // Re-read per listener: an earlier listener may have set a newer value.
        for listener in listeners {
            listener(&self.get());
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

/// Handle to a registered listener.
///
/// Dropping it leaves the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) or hold a
/// [`SubscriptionGuard`] to remove it.
pub struct Subscription {
    id: SubscriberId,
    remove: Box<dyn Fn() -> bool + Send + Sync>,
}

impl Subscription {
    fn new<F>(id: SubscriberId, remove: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            id,
            remove: Box::new(remove),
        }
    }

    /// The listener's id.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Remove the listener. Calling this again does nothing.
    ///
    /// Returns `true` if this call removed the listener.
    pub fn unsubscribe(&self) -> bool {
        let removed = (self.remove)();
        if removed {
            trace!(id = ?self.id, "listener removed");
        }
        removed
    }

    /// Convert into a guard that unsubscribes when dropped.
    pub fn guard(self) -> SubscriptionGuard {
        SubscriptionGuard(self)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// RAII guard for a listener.
#[derive(Debug)]
pub struct SubscriptionGuard(Subscription);

impl SubscriptionGuard {
    /// The listener's id.
    pub fn id(&self) -> SubscriberId {
        self.0.id()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.0.unsubscribe();
    }
}
