//! Per-subscriber sequence numbers

use nwx_common::config::SequenceConfig;
use nwx_common::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Sequence collaborator
pub trait SequenceStore: Send + Sync {
    /// Next sequence number for `subscriber`
    fn next(&self, subscriber: &str) -> Result<u64>;
}

/// Counters held in memory, wrapping within `[min, max]`
#[derive(Debug)]
pub struct InMemorySequenceStore {
    range: SequenceConfig,
    counters: Mutex<HashMap<String, u64>>,
}

impl InMemorySequenceStore {
    pub fn new(range: SequenceConfig) -> Result<Self> {
        if range.min > range.max {
            return Err(Error::Config(format!(
                "sequence range {}..={} is empty",
                range.min, range.max
            )));
        }
        Ok(Self {
            range,
            counters: Mutex::new(HashMap::new()),
        })
    }

    /// Last number handed out to `subscriber`
    pub fn current(&self, subscriber: &str) -> Option<u64> {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(subscriber).copied()
    }
}

impl SequenceStore for InMemorySequenceStore {
    fn next(&self, subscriber: &str) -> Result<u64> {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let next = match counters.get(subscriber) {
            Some(&last) if last < self.range.max => last + 1,
            _ => self.range.min,
        };
        counters.insert(subscriber.to_string(), next);
        Ok(next)
    }
}
