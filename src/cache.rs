use std::time::{Duration, Instant};

/// Holds one value for a bounded time. Expiry is checked on read; nothing
/// is evicted in the background.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn insert(&mut self, value: T) {
        self.entry = Some((Instant::now(), value));
    }

    /// The cached value, if it is still inside the validity window.
    pub fn get(&self) -> Option<&T> {
        match self.entry {
            Some((stored_at, ref value)) if stored_at.elapsed() < self.ttl => Some(value),
            _ => None,
        }
    }

    /// The last stored value regardless of age, for showing stale data
    /// while a reload is in flight.
    pub fn peek(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_value_is_returned() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());
        cache.insert(7);
        assert_eq!(cache.get(), Some(&7));
        assert_eq!(cache.peek(), Some(&7));
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache = TtlCache::new(Duration::ZERO);
        cache.insert("data");
        assert!(cache.get().is_none());
        assert_eq!(cache.peek(), Some(&"data"));
    }

    #[test]
    fn invalidate_drops_value() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(1);
        cache.invalidate();
        assert!(cache.get().is_none());
        assert!(cache.peek().is_none());
    }
}
