// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-execution-context isolation of loggers.
//!
//! Statements logged while handling one request must never appear in the tree of another.
//! This module provides the pieces that keep them apart.
//!
//! # Overview
//!
//! - [`ContextRegistry`]: the loggers of one execution context, keyed by name
//! - [`ContextStore`]: explicit registries addressed by [`ContextID`], for hosts that pass
//!   context identity around themselves
//! - [`with_logger`] / [`reset`]: a thread-local registry for hosts that bind one unit of
//!   work to one thread at a time
//! - [`UnitOfWork`] / [`unit_of_work`]: request-boundary hooks that reset the thread-local
//!   registry before and after the work
//! - [`ApplyRegistry`]: a [`Future`] wrapper giving an async task its own registry
//!
//! # Explicit contexts
//!
//! ```rust
//! use stacklog::context::ContextStore;
//!
//! let mut store = ContextStore::new();
//! let request = store.begin();
//! store.get(request, "audit").log("checkout.total", "42").unwrap();
//! let tree = store.get(request, "audit").generate().unwrap();
//! assert_eq!(tree.children().len(), 1);
//! store.reset(request);
//! ```
//!
//! # Thread-local contexts
//!
//! Worker threads are usually reused across requests.  Every unit of work must therefore
//! be bracketed by a reset, or statements and globals leak into the next request served by
//! the same thread:
//!
//! ```rust
//! use stacklog::context;
//!
//! let tree = context::unit_of_work(|| {
//!     context::with_logger("audit", |log| {
//!         log.register_global("user", "waabox");
//!         log.log("${user}.cart.add", "book")?;
//!         log.generate()
//!     })
//! })
//! .unwrap();
//! assert_eq!(tree.children()[0].stack(), ".waabox");
//!
//! // Nothing survives the unit of work.
//! assert!(context::with_logger("audit", |log| log.globals().is_empty()));
//! ```
//!
//! # Async tasks
//!
//! Executors poll many tasks on the same thread.  Wrap each task in [`ApplyRegistry`] so
//! the thread-local registry it sees is its own:
//!
//! ```rust
//! use stacklog::context::{self, ApplyRegistry};
//!
//! # async fn example() {
//! let tree = ApplyRegistry::new(async {
//!     context::with_logger("audit", |log| log.log("a.b", "1")).unwrap();
//!     context::with_logger("audit", |log| log.generate())
//! })
//! .await
//! .unwrap();
//! # }
//! ```

mod ambient;
mod apply_registry;
mod registry;
mod store;


pub use ambient::{UnitOfWork, reset, unit_of_work, with_logger};
pub use apply_registry::ApplyRegistry;
pub use registry::ContextRegistry;
pub use store::{ContextID, ContextStore};
