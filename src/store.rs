//! Application state and startup fixtures
//!
//! All data lives in process memory and dies with the process. Each
//! collection sits behind its own `RwLock`; handlers take a lock, do
//! their synchronous work, and release it before ever awaiting, so the
//! single-writer discipline the registries expect holds under the
//! multi-threaded runtime.

use std::sync::{Arc, RwLock};

use crate::registry::UrlRegistry;
use crate::users::UserDirectory;

/// Shared state injected into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Registered user accounts.
    pub users: Arc<RwLock<UserDirectory>>,

    /// Short-link records.
    pub urls: Arc<RwLock<UrlRegistry>>,

    /// Secret key for signing session cookies.
    pub session_key: Arc<String>,
}

impl AppState {
    /// Creates empty registries with the given session-signing secret.
    pub fn new(session_key: impl Into<String>) -> Self {
        Self {
            users: Arc::new(RwLock::new(UserDirectory::new())),
            urls: Arc::new(RwLock::new(UrlRegistry::new())),
            session_key: Arc::new(session_key.into()),
        }
    }

    /// Seeds the demo fixtures: two accounts and one sample link each.
    ///
    /// Returns the two user ids (alice first). Used at startup when
    /// `SEED_DEMO=1` and by the tests.
    pub fn seed_demo(&self) -> (String, String) {
        let mut users = self.users.write().unwrap();
        let alice = users
            .insert("alice@example.com", "pw1")
            .expect("seed user alice");
        let bob = users
            .insert("bob@example.com", "pw2")
            .expect("seed user bob");
        drop(users);

        let mut urls = self.urls.write().unwrap();
        let a = urls
            .create(&alice, "http://www.lighthouselabs.ca")
            .expect("seed url");
        let b = urls.create(&bob, "http://www.google.com").expect("seed url");

        tracing::info!(alice_link = %a.id, bob_link = %b.id, "seeded demo data");

        (alice, bob)
    }
}
