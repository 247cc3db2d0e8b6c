//! Login/logout round trip against file-backed storage.
//!
//! Run twice to see the session restored from the previous run:
//!
//! ```text
//! RUST_LOG=keepsake=debug cargo run --example session
//! ```

use keepsake::{SessionState, SessionStore, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keepsake=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    println!("=== Session Example ===\n");

    let path = std::env::temp_dir().join("keepsake-demo.json");
    let session = SessionStore::from_config(&StoreConfig::default().with_file(&path));

    // Subscribe to state changes
    let _sub = session.subscribe(|state| {
        if state.is_logged_in {
            println!("Logged in as {}", state.username);
        } else {
            println!("Logged out");
        }
    });

    if session.get().is_logged_in {
        println!("\nRestored from {}; logging out...", path.display());
        session.clear();
    } else {
        println!("\nLogging in...");
        session.set(SessionState::logged_in("alice"));
        println!("Run again to pick the session back up.");
    }

    println!("\nFinal state: {:#?}", session.get());
}
