use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared per-worker byte counters
///
/// One slot per worker, incremented only by the owning worker and read
/// concurrently by the progress reporter and the final summary.
#[derive(Debug, Clone)]
pub struct Counters {
    slots: Arc<Vec<AtomicU64>>,
}

impl Counters {
    pub fn new(workers: u8) -> Self {
        Self {
            slots: Arc::new((0..workers).map(|_| AtomicU64::new(0)).collect()),
        }
    }

    /// Record bytes received by one worker
    pub fn add(&self, part: usize, bytes: u64) {
        self.slots[part].fetch_add(bytes, Ordering::SeqCst);
    }

    /// Bytes received so far by one worker
    pub fn get(&self, part: usize) -> u64 {
        self.slots[part].load(Ordering::SeqCst)
    }

    /// Total bytes received across all workers
    pub fn total(&self) -> u64 {
        self.slots.iter().map(|s| s.load(Ordering::SeqCst)).sum()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counters = Counters::new(3);
        assert_eq!(counters.len(), 3);
        assert_eq!(counters.total(), 0);
    }

    #[test]
    fn adds_per_slot() {
        let counters = Counters::new(2);
        counters.add(0, 500);
        counters.add(1, 300);
        counters.add(0, 24);
        assert_eq!(counters.get(0), 524);
        assert_eq!(counters.get(1), 300);
        assert_eq!(counters.total(), 824);
    }

    #[test]
    fn clones_share_slots() {
        let counters = Counters::new(1);
        let other = counters.clone();
        other.add(0, 42);
        assert_eq!(counters.get(0), 42);
    }
}
