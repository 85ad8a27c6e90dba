// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit registries keyed by execution context.

use super::registry::ContextRegistry;
use crate::aggregator::Aggregator;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

static CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identifier for one execution context.
///
/// IDs are unique for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextID(u64);

impl ContextID {
    fn next() -> Self {
        ContextID(CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ContextID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/**
Registries for many execution contexts, addressed by [`ContextID`].

This is the explicit alternative to the thread-local registry behind
[`with_logger`](super::with_logger).  The host hands each unit of work a `ContextID` and
passes it back with every call; whoever owns the store is its only writer.

```rust
use stacklog::context::ContextStore;

let mut store = ContextStore::new();
let first = store.begin();
let second = store.begin();

store.get(first, "audit").log("a.b", "1").unwrap();
assert!(store.get(second, "audit").is_empty());

store.reset(first);
assert!(!store.contains(first));
```
*/
#[derive(Debug, Default)]
pub struct ContextStore {
    registries: HashMap<ContextID, ContextRegistry>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new execution context with an empty registry.
    pub fn begin(&mut self) -> ContextID {
        let id = ContextID::next();
        self.registries.insert(id, ContextRegistry::new());
        logwise::debuginternal_sync!("begin context {id}", id = id.0);
        id
    }

    /// Returns the registry of `id`, creating it if the context was reset or never begun.
    pub fn registry(&mut self, id: ContextID) -> &mut ContextRegistry {
        self.registries.entry(id).or_default()
    }

    /// Returns the logger `key` of context `id`, creating either on first use.
    pub fn get(&mut self, id: ContextID, key: &str) -> &mut Aggregator {
        self.registry(id).get(key)
    }

    /// Clears every logger of `id` and discards its registry.
    pub fn reset(&mut self, id: ContextID) {
        if let Some(mut registry) = self.registries.remove(&id) {
            registry.reset();
            logwise::debuginternal_sync!("reset context {id}", id = id.0);
        }
    }

    pub fn contains(&self, id: ContextID) -> bool {
        self.registries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}
