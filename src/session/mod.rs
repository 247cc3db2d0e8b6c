//! The persisted session store.

mod session;

pub use session::SessionStore;
