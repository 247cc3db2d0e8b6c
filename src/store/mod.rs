//! Reactive value container with a listener registry.
//!
//! A [`Store`] holds one value and calls its listeners synchronously after
//! every change. [`SessionStore`](crate::SessionStore) is built on it.

mod store;

pub use store::{Store, SubscriberId, Subscription, SubscriptionGuard};
