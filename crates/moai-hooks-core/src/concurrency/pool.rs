//! A fixed-size async worker pool with a bounded task queue.
//!
//! Workers pull boxed futures off an `mpsc` channel sized at
//! `max_workers * WORKER_QUEUE_MULTIPLIER`; once the queue is full,
//! `submit` blocks (the channel send itself provides the backpressure)
//! rather than growing unbounded.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex as SyncMutex;
use tokio::sync::{mpsc, oneshot, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

use crate::constants::WORKER_QUEUE_MULTIPLIER;
use crate::error::{MaosError, Result};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A fixed-size pool of tokio tasks draining a single bounded queue.
///
/// Cloning is cheap (internally `Arc`-backed); every clone shares the same
/// queue and worker set. `shutdown` is idempotent — calling it twice, or
/// from two clones, is safe.
#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<Inner>,
}

struct Inner {
    tx: SyncMutex<Option<mpsc::Sender<Job>>>,
    pending: AtomicUsize,
    handles: SyncMutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawns `max_workers` tokio tasks draining a queue of capacity
    /// `max_workers * WORKER_QUEUE_MULTIPLIER`.
    pub fn new(max_workers: usize) -> Self {
        let capacity = max_workers.max(1) * WORKER_QUEUE_MULTIPLIER;
        let (tx, rx) = mpsc::channel::<Job>(capacity);
        let rx = Arc::new(AsyncMutex::new(rx));
        let pending = AtomicUsize::new(0);
        let mut handles = Vec::with_capacity(max_workers);

        for _ in 0..max_workers.max(1) {
            let rx = Arc::clone(&rx);
            handles.push(tokio::spawn(async move {
                loop {
                    let job = {
                        let mut guard = rx.lock().await;
                        guard.recv().await
                    };
                    match job {
                        Some(job) => job.await,
                        None => break,
                    }
                }
            }));
        }

        Self {
            inner: Arc::new(Inner {
                tx: SyncMutex::new(Some(tx)),
                pending,
                handles: SyncMutex::new(handles),
            }),
        }
    }

    /// Submit a task and await its result, with no deadline.
    pub async fn submit<F, T>(&self, task: F) -> Result<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.submit_with_context(None, task).await
    }

    /// Submit a task and await its result, honoring an optional deadline.
    /// A deadline that elapses before the task is picked up and finished
    /// returns a typed [`MaosError::HookTimeout`]; the task itself keeps
    /// running to completion on its worker (it is not cancelled), but its
    /// result is discarded.
    pub async fn submit_with_context<F, T>(
        &self,
        deadline: Option<Duration>,
        task: F,
    ) -> Result<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = {
            let guard = self.inner.tx.lock();
            guard.clone()
        };
        let Some(sender) = sender else {
            return Err(MaosError::PoolShutdown);
        };

        let (result_tx, result_rx) = oneshot::channel();
        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        let inner = Arc::clone(&self.inner);
        let job: Job = Box::pin(async move {
            let output = task.await;
            inner.pending.fetch_sub(1, Ordering::SeqCst);
            let _ = result_tx.send(output);
        });

        if sender.send(job).await.is_err() {
            self.inner.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(MaosError::PoolShutdown);
        }

        match deadline {
            Some(d) => match tokio::time::timeout(d, result_rx).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(_)) => Err(MaosError::PoolShutdown),
                Err(_) => Err(MaosError::HookTimeout {
                    event: "worker_pool_submit".to_string(),
                    timeout_ms: d.as_millis() as u64,
                }),
            },
            None => result_rx.await.map_err(|_| MaosError::PoolShutdown),
        }
    }

    /// Run every task through the pool concurrently and return results in
    /// the same order as `tasks`, regardless of completion order.
    pub async fn execute_parallel<F, T>(&self, tasks: Vec<F>) -> Result<Vec<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let futures: Vec<_> = tasks.into_iter().map(|t| self.submit(t)).collect();
        let mut results = Vec::with_capacity(futures.len());
        for fut in futures {
            results.push(fut.await?);
        }
        Ok(results)
    }

    /// Number of tasks submitted but not yet finished.
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Close the queue and join every worker. Safe to call more than once —
    /// the second call observes the sender already gone and returns
    /// immediately.
    pub async fn shutdown(&self) {
        let sender = self.inner.tx.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let handles: Vec<_> = std::mem::take(&mut *self.inner.handles.lock());
        for handle in handles {
            let _ = handle.await;
        }
    }
}
