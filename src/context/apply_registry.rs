// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task-local registries for async code.

use std::future::Future;
use std::pin::Pin;
use std::task::Poll;

use super::ambient::replace_current;
use super::registry::ContextRegistry;

/// A [`Future`] wrapper that gives the wrapped task its own registry.
///
/// Executors interleave many tasks on few threads, so a thread-local registry alone would
/// mix the statements of unrelated requests.  `ApplyRegistry` owns a private
/// [`ContextRegistry`] and installs it as the thread-local registry for the duration of
/// each poll, putting the worker's own registry back afterwards.  Inside the future,
/// [`with_logger`](super::with_logger) therefore sees only the task's loggers, whichever
/// thread polls it.
///
/// When the wrapped future completes, the task's registry is reset.
///
/// # Examples
///
/// ```rust
/// use stacklog::context::{self, ApplyRegistry};
///
/// async fn handle_request() -> usize {
///     context::with_logger("audit", |log| log.log("request.start", "GET /")).unwrap();
///     context::with_logger("audit", |log| log.generate()).unwrap().children().len()
/// }
///
/// # async fn example() {
/// let top_level = ApplyRegistry::new(handle_request()).await;
/// assert_eq!(top_level, 1);
/// # }
/// ```
///
/// # Implementation Details
///
/// Each poll:
/// 1. Swaps the task's registry into the thread-local slot
/// 2. Polls the inner future
/// 3. Swaps the worker's registry back, also when the inner poll unwinds
pub struct ApplyRegistry<F> {
    registry: ContextRegistry,
    future: F,
}

impl<F> ApplyRegistry<F> {
    /// Wraps `future` with a fresh, empty registry.
    pub fn new(future: F) -> Self {
        Self::with_registry(ContextRegistry::new(), future)
    }

    /// Wraps `future` with an existing registry.
    pub fn with_registry(registry: ContextRegistry, future: F) -> Self {
        ApplyRegistry { registry, future }
    }
}

/// Puts the worker's registry back into the thread-local slot on drop.
struct Installed<'a> {
    task: &'a mut ContextRegistry,
    worker: Option<ContextRegistry>,
}

impl<'a> Installed<'a> {
    fn new(task: &'a mut ContextRegistry) -> Self {
        let worker = replace_current(std::mem::take(task));
        Installed {
            task,
            worker: Some(worker),
        }
    }
}

impl Drop for Installed<'_> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            *self.task = replace_current(worker);
        }
    }
}

impl<F> Future for ApplyRegistry<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<Self::Output> {
        //safety: `future` is never moved out of `self`; `registry` is not structurally pinned
        let (registry, fut) = unsafe {
            let d = self.get_unchecked_mut();
            (&mut d.registry, Pin::new_unchecked(&mut d.future))
        };
        let r = {
            let _installed = Installed::new(registry);
            fut.poll(cx)
        };
        if r.is_ready() {
            registry.reset();
        }
        r
    }
}
