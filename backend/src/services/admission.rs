//! Per-client admission control.
//!
//! Each client identity gets a token bucket (default: capacity 3, refill one
//! token per second, continuous). A request is admitted when its bucket holds
//! at least one whole token. The registry of buckets sits behind a single
//! mutex, so refill-and-consume and bucket creation are serialized: two
//! concurrent requests from the same client can never spend the same token,
//! and a client never ends up with two buckets.
//!
//! Buckets are created lazily and reclaimed by [`AdmissionController::sweep`]
//! once they are idle and fully refilled; dropping such a bucket is
//! unobservable because a fresh bucket starts in the same state. When the
//! registry reaches `max_clients`, the least recently seen bucket is evicted;
//! a recency index keeps that lookup logarithmic in the number of clients.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic time for the limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock implementation backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }
}

/// Limiter parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionConfig {
    /// Maximum tokens a bucket can hold (burst size).
    pub capacity: u32,
    /// Tokens added per second of elapsed time.
    pub refill_per_second: f64,
    /// Upper bound on tracked identities.
    pub max_clients: usize,
    /// Minimum idle time before a full bucket may be swept.
    pub idle_timeout: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            capacity: 3,
            refill_per_second: 1.0,
            max_clients: 100_000,
            idle_timeout: Duration::from_secs(300),
        }
    }
}

/// Token state for a single client identity.
#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl TokenBucket {
    fn full(capacity: u32, now: Instant) -> Self {
        Self {
            tokens: f64::from(capacity),
            last_refill: now,
            last_seen: now,
        }
    }

    fn refill(&mut self, now: Instant, config: &AdmissionConfig) {
        self.tokens = self.projected_tokens(now, config);
        self.last_refill = now;
    }

    fn projected_tokens(&self, now: Instant, config: &AdmissionConfig) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        (self.tokens + elapsed * config.refill_per_second).min(f64::from(config.capacity))
    }

    fn try_acquire(&mut self, now: Instant, config: &AdmissionConfig) -> bool {
        self.refill(now, config);
        self.last_seen = now;
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn is_reclaimable(&self, now: Instant, config: &AdmissionConfig) -> bool {
        now.saturating_duration_since(self.last_seen) >= config.idle_timeout
            && self.projected_tokens(now, config) >= f64::from(config.capacity)
    }
}

struct Entry {
    bucket: TokenBucket,
    /// Key of this identity in `Registry::recency`.
    touched: u64,
}

/// Buckets keyed by identity, plus a recency index for O(log n) eviction.
#[derive(Default)]
struct Registry {
    entries: HashMap<String, Entry>,
    /// Touch sequence number to identity, oldest first.
    recency: BTreeMap<u64, String>,
    next_touch: u64,
}

impl Registry {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn next_touch(&mut self) -> u64 {
        let touch = self.next_touch;
        self.next_touch += 1;
        touch
    }

    /// Spend a token from an existing bucket. `None` if the identity is unknown.
    fn acquire_existing(
        &mut self,
        identity: &str,
        now: Instant,
        config: &AdmissionConfig,
    ) -> Option<bool> {
        let touch = self.next_touch;
        let entry = self.entries.get_mut(identity)?;
        let admitted = entry.bucket.try_acquire(now, config);
        if let Some(name) = self.recency.remove(&entry.touched) {
            self.recency.insert(touch, name);
        }
        entry.touched = touch;
        self.next_touch += 1;
        Some(admitted)
    }

    fn insert(&mut self, identity: &str, bucket: TokenBucket) {
        let touch = self.next_touch();
        self.recency.insert(touch, identity.to_owned());
        self.entries.insert(
            identity.to_owned(),
            Entry {
                bucket,
                touched: touch,
            },
        );
    }

    fn evict_least_recent(&mut self) -> Option<String> {
        let (_, identity) = self.recency.pop_first()?;
        self.entries.remove(&identity);
        Some(identity)
    }

    fn retain_active(&mut self, now: Instant, config: &AdmissionConfig) -> usize {
        let before = self.entries.len();
        let recency = &mut self.recency;
        self.entries.retain(|_, entry| {
            let keep = !entry.bucket.is_reclaimable(now, config);
            if !keep {
                recency.remove(&entry.touched);
            }
            keep
        });
        before - self.entries.len()
    }
}

/// Gatekeeper for all inbound traffic.
pub struct AdmissionController {
    config: AdmissionConfig,
    clock: Arc<dyn Clock>,
    buckets: Mutex<Registry>,
}

impl AdmissionController {
    /// Create a controller driven by the system clock.
    pub fn new(config: AdmissionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AdmissionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            buckets: Mutex::new(Registry::default()),
        }
    }

    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Decide whether a request from `client_identity` may proceed.
    ///
    /// Never fails; the first request from an unseen identity creates a full
    /// bucket and is admitted.
    pub fn admit(&self, client_identity: &str) -> bool {
        let now = self.clock.now();
        let mut buckets = self.buckets.lock();

        if let Some(admitted) = buckets.acquire_existing(client_identity, now, &self.config) {
            return admitted;
        }

        while buckets.len() >= self.config.max_clients.max(1) {
            match buckets.evict_least_recent() {
                Some(identity) => log::debug!(
                    "admission registry full ({} clients); evicting {}",
                    self.config.max_clients,
                    identity
                ),
                None => break,
            }
        }
        let mut bucket = TokenBucket::full(self.config.capacity, now);
        let admitted = bucket.try_acquire(now, &self.config);
        buckets.insert(client_identity, bucket);
        admitted
    }

    /// Drop buckets that are idle and fully refilled. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut buckets = self.buckets.lock();
        let removed = buckets.retain_active(now, &self.config);
        if removed > 0 {
            log::debug!(
                "admission sweep removed {} idle buckets ({} remaining)",
                removed,
                buckets.len()
            );
        }
        removed
    }

    /// Number of identities currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.buckets.lock().len()
    }
}

impl std::fmt::Debug for AdmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionController")
            .field("config", &self.config)
            .field("tracked_clients", &self.tracked_clients())
            .finish()
    }
}
