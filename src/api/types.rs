//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::models::UserRole;
use crate::state::AppState;

/// How long a bearer token stays valid after login.
const SESSION_TTL_SECS: u64 = 12 * 3600;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            sessions: Arc::new(Mutex::new(SessionStore::new())),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Session context — injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated caller, injected into request extensions by the auth
/// middleware after token validation.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    /// Roster id of the doctor this login acts for, when the role is
    /// `doctor` and the link resolves.
    pub doctor_id: Option<Uuid>,
}

// ═══════════════════════════════════════════════════════════
// Session store — opaque bearer tokens, hashed at rest
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    context: SessionContext,
    expires_at: Instant,
}

/// In-memory session store. Only SHA-256 hashes of the issued tokens are
/// kept; a restart logs everyone out.
pub struct SessionStore {
    sessions: HashMap<[u8; 32], SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: Duration::from_secs(SESSION_TTL_SECS),
        }
    }

    /// Issue a fresh bearer token for the given caller.
    pub fn issue(&mut self, context: SessionContext) -> String {
        if self.sessions.len() > 1000 {
            self.cleanup();
        }
        let token = generate_token();
        self.sessions.insert(
            hash_token(&token),
            SessionEntry {
                context,
                expires_at: Instant::now() + self.ttl,
            },
        );
        token
    }

    /// Resolve a presented token to its session, if still valid.
    pub fn resolve(&self, token: &str) -> Option<SessionContext> {
        let entry = self.sessions.get(&hash_token(token))?;
        if Instant::now() > entry.expires_at {
            return None;
        }
        Some(entry.context.clone())
    }

    pub fn revoke(&mut self, token: &str) {
        self.sessions.remove(&hash_token(token));
    }

    fn cleanup(&mut self) {
        let now = Instant::now();
        self.sessions.retain(|_, entry| now < entry.expires_at);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

// ═══════════════════════════════════════════════════════════
// Rate limiter — sliding window per caller
// ═══════════════════════════════════════════════════════════

/// Sliding-window rate limiter with per-minute and per-hour limits.
pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            per_minute: 100,
            per_hour: 1000,
        }
    }

    /// Check if a caller is within rate limits. Returns `Ok(())` or
    /// `Err(retry_after_secs)` if exceeded.
    pub fn check(&mut self, key: &str) -> Result<(), u64> {
        let now = Instant::now();
        let entries = self.windows.entry(key.to_string()).or_default();

        // Clean entries older than 1 hour
        entries.retain(|ts| now.duration_since(*ts) < Duration::from_secs(3600));

        // Check per-minute
        let last_minute = entries
            .iter()
            .filter(|ts| now.duration_since(**ts) < Duration::from_secs(60))
            .count() as u32;
        if last_minute >= self.per_minute {
            return Err(60);
        }

        // Check per-hour
        if entries.len() as u32 >= self.per_hour {
            return Err(3600);
        }

        entries.push(now);
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SessionContext {
        SessionContext {
            user_id: Uuid::new_v4(),
            email: "admin@clinic.test".into(),
            role: UserRole::Admin,
            doctor_id: None,
        }
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn issued_token_resolves() {
        let mut store = SessionStore::new();
        let ctx = context();
        let token = store.issue(ctx.clone());

        let resolved = store.resolve(&token).unwrap();
        assert_eq!(resolved.user_id, ctx.user_id);
        assert_eq!(resolved.role, UserRole::Admin);
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        assert!(store.resolve("made-up-token").is_none());
    }

    #[test]
    fn expired_token_does_not_resolve() {
        let mut store = SessionStore::new();
        let token = generate_token();
        store.sessions.insert(
            hash_token(&token),
            SessionEntry {
                context: context(),
                expires_at: Instant::now() - Duration::from_secs(1),
            },
        );
        assert!(store.resolve(&token).is_none());
    }

    #[test]
    fn revoked_token_does_not_resolve() {
        let mut store = SessionStore::new();
        let token = store.issue(context());
        store.revoke(&token);
        assert!(store.resolve(&token).is_none());
    }

    #[test]
    fn rate_limiter_allows_under_limit() {
        let mut limiter = RateLimiter::new();
        assert!(limiter.check("caller-1").is_ok());
        assert!(limiter.check("caller-1").is_ok());
    }

    #[test]
    fn rate_limiter_rejects_over_per_minute() {
        let mut limiter = RateLimiter {
            windows: HashMap::new(),
            per_minute: 2,
            per_hour: 1000,
        };
        assert!(limiter.check("caller-1").is_ok());
        assert!(limiter.check("caller-1").is_ok());
        assert_eq!(limiter.check("caller-1"), Err(60));
    }

    #[test]
    fn rate_limiter_isolates_callers() {
        let mut limiter = RateLimiter {
            windows: HashMap::new(),
            per_minute: 1,
            per_hour: 1000,
        };
        assert!(limiter.check("caller-1").is_ok());
        assert!(limiter.check("caller-2").is_ok());
        assert_eq!(limiter.check("caller-1"), Err(60));
    }
}
