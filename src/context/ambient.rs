// SPDX-License-Identifier: MIT OR Apache-2.0

//! The thread-local registry and the request-boundary hooks built on it.

use super::registry::ContextRegistry;
use crate::aggregator::Aggregator;
use std::cell::RefCell;

thread_local! {
    static REGISTRY: RefCell<ContextRegistry> = RefCell::new(ContextRegistry::new());
}

/**
Runs `f` with the logger `key` of the current thread's registry, creating it if needed.

# Panics

Panics if called re-entrantly from inside `f`, or from inside [`reset`].

```rust
use stacklog::context;

context::with_logger("audit", |log| log.log("request.start", "GET /")).unwrap();
let root = context::with_logger("audit", |log| log.generate()).unwrap();
assert_eq!(root.children()[0].stack(), ".request");
context::reset();
```
*/
pub fn with_logger<R>(key: &str, f: impl FnOnce(&mut Aggregator) -> R) -> R {
    REGISTRY.with(|registry| f(registry.borrow_mut().get(key)))
}

/// Clears every logger of the current thread and discards the registry.
///
/// Hosts that reuse worker threads call this at the boundary of every unit of work;
/// [`unit_of_work`] and [`UnitOfWork`] do it for you.
pub fn reset() {
    let _ = REGISTRY.try_with(|registry| {
        let mut previous = registry.take();
        let count = previous.len() as u64;
        previous.reset();
        logwise::debuginternal_sync!("reset {count} thread-local loggers", count = count);
    });
}

/// Installs `registry` as the current thread's registry and returns the previous one.
pub(crate) fn replace_current(registry: ContextRegistry) -> ContextRegistry {
    REGISTRY.with(|current| current.replace(registry))
}

/**
Scopes one unit of work on the current thread.

The thread's registry is reset when the guard is created and again when it is dropped,
including during unwinding.

```rust
use stacklog::context::{self, UnitOfWork};

{
    let _work = UnitOfWork::begin();
    context::with_logger("audit", |log| log.log("a", "1")).unwrap();
}
assert!(context::with_logger("audit", |log| log.is_empty()));
```
*/
#[derive(Debug)]
#[must_use = "the unit of work ends when the guard is dropped"]
pub struct UnitOfWork {
    _private: (),
}

impl UnitOfWork {
    pub fn begin() -> Self {
        reset();
        UnitOfWork { _private: () }
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        reset();
    }
}

/// Runs `f` as one unit of work: reset before, reset after, even if `f` panics.
pub fn unit_of_work<R>(f: impl FnOnce() -> R) -> R {
    let _work = UnitOfWork::begin();
    f()
}
