//! Session registry: one [`CartSession`] per browser, keyed by the session cookie.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use fastchow_cart::CartSession;
use fastchow_core::SessionId;

use crate::app::realtime::{RealtimeMessage, SessionBus};

pub type StorefrontSession = CartSession<SessionBus>;

/// Upper bound on how often a session creation triggers an idle sweep.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct SessionEntry {
    session: Arc<StorefrontSession>,
    last_seen: Mutex<Instant>,
}

impl SessionEntry {
    fn touch(&self, now: Instant) {
        if let Ok(mut last_seen) = self.last_seen.lock() {
            *last_seen = now;
        }
    }

    fn idle_for(&self, now: Instant) -> Duration {
        self.last_seen
            .lock()
            .map(|last_seen| now.saturating_duration_since(*last_seen))
            .unwrap_or(Duration::MAX)
    }

    /// Held by an in-flight request or an open SSE stream.
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.session) > 1
    }
}

/// In-memory session map.
///
/// Nothing is persisted. A session untouched for `idle_ttl` and not held by a
/// request or stream is dropped; sweeps run lazily when new sessions are created.
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<HashMap<SessionId, SessionEntry>>,
    realtime_tx: broadcast::Sender<RealtimeMessage>,
    idle_ttl: Duration,
    last_sweep: Mutex<Instant>,
}

impl SessionStore {
    pub fn new(realtime_tx: broadcast::Sender<RealtimeMessage>, idle_ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            realtime_tx,
            idle_ttl,
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    pub fn get(&self, session_id: SessionId) -> Option<Arc<StorefrontSession>> {
        let map = self.inner.read().ok()?;
        let entry = map.get(&session_id)?;
        entry.touch(Instant::now());
        Some(Arc::clone(&entry.session))
    }

    /// Look up `requested`, or create a fresh session. The flag is `true` when a
    /// new session was created.
    ///
    /// A well-formed but unknown id still gets a freshly minted id, so clients
    /// can never pick their own.
    pub fn get_or_create(&self, requested: Option<SessionId>) -> (Arc<StorefrontSession>, bool) {
        if let Some(session) = requested.and_then(|id| self.get(id)) {
            return (session, false);
        }

        let now = Instant::now();
        self.sweep_if_due(now);

        let session_id = SessionId::new();
        let session = Arc::new(CartSession::new(
            session_id,
            SessionBus::new(self.realtime_tx.clone()),
        ));
        let entry = SessionEntry {
            session: Arc::clone(&session),
            last_seen: Mutex::new(now),
        };

        let live_sessions = {
            let mut map = self.write_map();
            map.insert(session_id, entry);
            map.len()
        };

        tracing::info!(session_id = %session_id, live_sessions, "cart session created");
        (session, true)
    }

    /// Drop every session idle for at least `idle_ttl` as of `now`. Returns how
    /// many were removed.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut map = self.write_map();
        let before = map.len();
        map.retain(|_, entry| entry.in_use() || entry.idle_for(now) < self.idle_ttl);
        let evicted = before - map.len();

        if evicted > 0 {
            tracing::info!(evicted, retained = map.len(), "idle cart sessions evicted");
        }
        evicted
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.inner.write().unwrap_or_else(|poisoned| {
            tracing::warn!("session store lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn sweep_if_due(&self, now: Instant) {
        let interval = self.idle_ttl.min(MAX_SWEEP_INTERVAL);
        {
            let Ok(mut last_sweep) = self.last_sweep.lock() else {
                return;
            };
            if now.saturating_duration_since(*last_sweep) < interval {
                return;
            }
            *last_sweep = now;
        }
        self.evict_idle(now);
    }
}
