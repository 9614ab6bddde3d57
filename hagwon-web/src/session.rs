//! In-process admin session store
//!
//! Login issues a random token with a fixed lifetime; every mutating request
//! presents it and is validated against this store. Replaces an ambient
//! "logged in" flag with state that can be expired, revoked, and tested.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const TOKEN_LEN: usize = 32;

/// An issued admin session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token store shared across handlers
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    inner: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Issue a fresh token; expired entries are purged on the way
    pub fn issue(&self) -> Session {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let expires_at = Utc::now() + self.ttl;

        let mut sessions = self.inner.lock().expect("session store lock poisoned");
        let now = Utc::now();
        sessions.retain(|_, expiry| *expiry > now);
        sessions.insert(token.clone(), expires_at);

        Session { token, expires_at }
    }

    /// Whether a token exists and has not expired
    ///
    /// An expired token is removed on access, so a stale token fails the
    /// same way an unknown one does.
    pub fn validate(&self, token: &str) -> bool {
        let mut sessions = self.inner.lock().expect("session store lock poisoned");
        match sessions.get(token) {
            Some(expiry) if *expiry > Utc::now() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    /// Drop a token; unknown tokens are a no-op
    pub fn revoke(&self, token: &str) {
        let mut sessions = self.inner.lock().expect("session store lock poisoned");
        sessions.remove(token);
    }
}
