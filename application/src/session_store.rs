//! In-memory store for interactive debate sessions.
//!
//! Sessions live for at most [`SESSION_TTL`] and the store holds at most
//! [`MAX_SESSIONS`] of them. Expiry is detected lazily: `get` treats an
//! expired session as absent and evicts it, and `create` sweeps every
//! expired entry before inserting. If the store is still full after the
//! sweep, the oldest session (by creation time) is evicted.
//!
//! Callers are expected to serialize requests for one session id. The
//! store only guards its map; two concurrent `update`s for the same id
//! simply overwrite each other.

use chrono::{DateTime, Duration, Utc};
use debate_domain::{Session, SessionParams};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};
use uuid::Uuid;

/// Lifetime of a session, measured from creation.
pub const SESSION_TTL: Duration = Duration::minutes(10);

/// Maximum number of live sessions.
pub const MAX_SESSIONS: usize = 50;

/// Holds in-flight interactive debates keyed by session id.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(SESSION_TTL, MAX_SESSIONS)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate a new session with a fresh id.
    pub fn create(&self, params: SessionParams) -> Session {
        self.create_at(params, Utc::now())
    }

    /// [`create`](Self::create) with an explicit clock reading.
    pub fn create_at(&self, params: SessionParams, now: DateTime<Utc>) -> Session {
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "Swept expired sessions");
        }

        if sessions.len() >= self.capacity {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id.clone());
            if let Some(id) = oldest {
                info!(session = %id, "Session store full, evicting oldest session");
                sessions.remove(&id);
            }
        }

        let session = Session::new(Uuid::new_v4().to_string(), params, now);
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// Look up a live session. Expired sessions are evicted and reported absent.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.get_at(id, Utc::now())
    }

    /// [`get`](Self::get) with an explicit clock reading.
    pub fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<Session> {
        let mut sessions = self.lock();
        let expired = sessions.get(id)?.is_expired(now, self.ttl);
        if expired {
            debug!(session = %id, "Session expired");
            sessions.remove(id);
            return None;
        }
        sessions.get(id).cloned()
    }

    /// Replace a stored session with `session`.
    ///
    /// Returns `false` (and stores nothing) if the id is no longer present.
    pub fn update(&self, session: Session) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(&session.id) {
            Some(slot) => {
                *slot = session;
                true
            }
            None => false,
        }
    }

    /// Remove a session unconditionally.
    pub fn delete(&self, id: &str) -> Option<Session> {
        self.lock().remove(id)
    }

    /// Number of stored sessions, expired ones not yet swept included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
