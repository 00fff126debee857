//! In-memory session store keyed by launch

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{LaunchSession, SessionId};

/// Default upper bound on remembered launches
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Bounded map of launch sessions
///
/// When full, inserting a new session evicts the oldest launch.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, LaunchSession>>,
    capacity: usize,
}

impl SessionStore {
    /// Create a store holding at most `capacity` sessions
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Store a session under a fresh id
    pub async fn insert(&self, session: LaunchSession) -> SessionId {
        let id = SessionId::new();
        let mut sessions = self.sessions.write().await;

        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, s)| s.launched_at)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!(session = %oldest, "Evicted oldest launch session");
        }

        sessions.insert(id, session);
        id
    }

    /// Store a session, dropping the one it supersedes
    pub async fn replace(&self, previous: Option<SessionId>, session: LaunchSession) -> SessionId {
        if let Some(previous) = previous {
            self.remove(&previous).await;
        }
        self.insert(session).await
    }

    /// Look up a session
    pub async fn get(&self, id: &SessionId) -> Option<LaunchSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Forget a session
    pub async fn remove(&self, id: &SessionId) -> Option<LaunchSession> {
        self.sessions.write().await.remove(id)
    }

    /// Number of sessions held
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}
