// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-context logger map.

use crate::aggregator::Aggregator;
use std::collections::HashMap;

/// The loggers of one execution context, keyed by name.
///
/// A registry belongs to exactly one execution context.  Nothing in it is shared, so a
/// logger obtained here can only be seen by the code running in that context.
///
/// ```rust
/// use stacklog::context::ContextRegistry;
///
/// let mut registry = ContextRegistry::new();
/// registry.get("audit").log("request.start", "GET /").unwrap();
/// assert_eq!(registry.get("audit").generate().unwrap().children().len(), 1);
///
/// registry.reset();
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ContextRegistry {
    loggers: HashMap<String, Aggregator>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logger for `key`, creating an empty one on first use.
    pub fn get(&mut self, key: &str) -> &mut Aggregator {
        if !self.loggers.contains_key(key) {
            logwise::debuginternal_sync!("creating logger {key}", key = key.to_string());
        }
        self.loggers.entry(key.to_string()).or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.loggers.contains_key(key)
    }

    /// Clears every logger, then forgets them all.
    ///
    /// The next [`get`](Self::get) for any key creates a clean logger.
    pub fn reset(&mut self) {
        for logger in self.loggers.values_mut() {
            logger.clear();
        }
        self.loggers.clear();
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}
