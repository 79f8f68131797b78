//! Standalone bounded-concurrency helper, independent of [`super::WorkerPool`].
//!
//! Used where the degree of fan-out is caller-specified per call (the LSP
//! manager's `start_all`, with its configurable `max_concurrent_startups`)
//! rather than fixed for the process lifetime like the worker pool.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

/// Run `f` over every item in `items`, at most `limit` futures in flight at
/// once. Results are returned in the same order as `items`.
pub async fn run_with_limit<I, T, F, Fut>(items: Vec<I>, limit: usize, f: F) -> Vec<T>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let f = Arc::new(f);
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let f = Arc::clone(&f);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("semaphore is never closed within run_with_limit");
            f(item).await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        // A panicking task is a programming error in the caller's closure;
        // propagating that panic is preferable to silently dropping a slot.
        results.push(handle.await.expect("run_with_limit task panicked"));
    }
    results
}
