use std::sync::Arc;

use crate::ai::TextGenerator;
use crate::config::DEFAULT_SESSION_TTL_SECS;
use crate::store::{SessionStore, TaskStore, UserStore};

/// Shared handles every handler needs, registered once as `web::Data<AppState>`.
///
/// Holds no mutable request state of its own; all of it lives behind the stores.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub ai: TextGenerator,
    pub session_ttl_secs: u64,
}

impl AppState {
    /// Builds state where one store value serves users, sessions and tasks.
    pub fn new<S>(store: Arc<S>, ai: TextGenerator) -> Self
    where
        S: UserStore + SessionStore + TaskStore + 'static,
    {
        Self {
            users: store.clone(),
            sessions: store.clone(),
            tasks: store,
            ai,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    pub fn with_session_ttl(mut self, ttl_secs: u64) -> Self {
        self.session_ttl_secs = ttl_secs;
        self
    }
}
