//! Expiring in-memory maps used by the enrichment step.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use stremeta_core::MediaType;
use tokio::sync::Mutex;

/// Time source for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: StdMutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: StdMutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(|e| e.into_inner());
        self.origin + offset
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Map whose entries read as absent once `ttl` has elapsed.
///
/// Expired entries are not swept; they stay until overwritten. A `ttl` of
/// `None` keeps entries for the lifetime of the process.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
            clock,
        }
    }

    pub fn unbounded(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: None,
            clock,
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        match self.ttl {
            Some(ttl) if self.clock.now().duration_since(entry.inserted_at) >= ttl => None,
            _ => Some(entry.value.clone()),
        }
    }

    pub async fn insert(&self, key: K, value: V) {
        let inserted_at = self.clock.now();
        self.entries
            .lock()
            .await
            .insert(key, Entry { value, inserted_at });
    }

    /// Stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// Identity of one cached detail build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaCacheKey {
    pub media: MediaType,
    pub language: String,
    pub tmdb_id: u64,
    pub rpdb_key: Option<String>,
}
