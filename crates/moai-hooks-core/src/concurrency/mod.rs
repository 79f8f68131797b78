//! Fixed-size worker pool and bounded-concurrency helpers.
//!
//! The dispatcher itself is single-threaded per invocation (one hook event
//! per process), but individual handlers — diagnostics collection, LSP
//! server start-up, external command execution — fan out internally and
//! need a shared place to bound that fan-out. This module is that place.

mod pool;
mod semaphore;

pub use pool::WorkerPool;
pub use semaphore::run_with_limit;
