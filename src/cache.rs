//! Query Cache
//!
//! Keyed read cache for fetched resource lists. Writes never touch cached
//! values directly: they `invalidate` the affected key, subscribers of that
//! key are notified, and the next `fetch` goes back to the server.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::error::ApiResult;

/// Logical name of a cached resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    Students,
    Observations,
    Schedules,
    Materials,
    DailyEntries,
    Settings,
}

impl CacheKey {
    pub const ALL: [CacheKey; 6] = [
        CacheKey::Students,
        CacheKey::Observations,
        CacheKey::Schedules,
        CacheKey::Materials,
        CacheKey::DailyEntries,
        CacheKey::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Students => "students",
            CacheKey::Observations => "observations",
            CacheKey::Schedules => "schedules",
            CacheKey::Materials => "materials",
            CacheKey::DailyEntries => "daily-entries",
            CacheKey::Settings => "settings",
        }
    }

    /// Position in [`CacheKey::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(CacheKey)>;

struct Entry {
    value: Rc<dyn Any>,
    fetched_at: DateTime<Utc>,
}

struct Inner {
    entries: HashMap<CacheKey, Entry>,
    listeners: Vec<(SubscriptionId, CacheKey, Listener)>,
    /// Bumped on every invalidate; loads started under an older value are stale
    generations: HashMap<CacheKey, u64>,
    next_id: u64,
    stale_after: Duration,
    retries: u32,
}

/// Shared handle; clones point at the same cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Rc<RefCell<Inner>>,
}

impl QueryCache {
    pub fn new(stale_after: Duration, retries: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                listeners: Vec::new(),
                generations: HashMap::new(),
                next_id: 0,
                stale_after,
                retries,
            })),
        }
    }

    /// Cached value for `key`, fresh or not.
    pub fn get<T: Clone + 'static>(&self, key: CacheKey) -> Option<T> {
        let inner = self.inner.borrow();
        let entry = inner.entries.get(&key)?;
        match entry.value.downcast_ref::<T>() {
            Some(value) => Some(value.clone()),
            None => {
                warn!("[CACHE] Type mismatch reading {}", key.as_str());
                None
            }
        }
    }

    pub fn set<T: 'static>(&self, key: CacheKey, value: T) {
        self.inner.borrow_mut().entries.insert(
            key,
            Entry { value: Rc::new(value), fetched_at: Utc::now() },
        );
    }

    pub fn contains(&self, key: CacheKey) -> bool {
        self.inner.borrow().entries.contains_key(&key)
    }

    /// Present and younger than the stale window.
    pub fn is_fresh(&self, key: CacheKey) -> bool {
        let inner = self.inner.borrow();
        let Some(entry) = inner.entries.get(&key) else {
            return false;
        };
        (Utc::now() - entry.fetched_at)
            .to_std()
            .map(|age| age < inner.stale_after)
            .unwrap_or(true)
    }

    /// Drop the entry for `key` and notify that key's subscribers.
    pub fn invalidate(&self, key: CacheKey) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.entries.remove(&key);
            *inner.generations.entry(key).or_default() += 1;
            inner
                .listeners
                .iter()
                .filter(|(_, k, _)| *k == key)
                .map(|(_, _, listener)| Rc::clone(listener))
                .collect()
        };
        debug!("[CACHE] Invalidated {} ({} listeners)", key.as_str(), listeners.len());
        for listener in listeners {
            listener(key);
        }
    }

    /// Number of times `key` has been invalidated.
    pub fn generation(&self, key: CacheKey) -> u64 {
        self.inner.borrow().generations.get(&key).copied().unwrap_or(0)
    }

    pub fn subscribe(&self, key: CacheKey, listener: impl Fn(CacheKey) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, key, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().listeners.retain(|(sub, _, _)| *sub != id);
    }

    /// Return the fresh cached value or load it, retrying transient failures.
    ///
    /// A load that was overtaken by an `invalidate` is not cached. The caller
    /// gets the newer cached value if one arrived meanwhile.
    pub async fn fetch<T, F, Fut>(&self, key: CacheKey, loader: F) -> ApiResult<T>
    where
        T: Clone + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if self.is_fresh(key) {
            if let Some(value) = self.get::<T>(key) {
                return Ok(value);
            }
        }

        let retries = self.inner.borrow().retries;
        let generation = self.generation(key);
        let mut attempt = 0;
        loop {
            match loader().await {
                Ok(value) if self.generation(key) == generation => {
                    self.set(key, value.clone());
                    return Ok(value);
                }
                Ok(value) => {
                    debug!("[CACHE] Dropping superseded load of {}", key.as_str());
                    return Ok(self.get::<T>(key).unwrap_or(value));
                }
                Err(err) if err.is_transient() && attempt < retries => {
                    attempt += 1;
                    warn!("[CACHE] Retrying {} after: {}", key.as_str(), err);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
