//! System-wide constants for the hook dispatcher.
//!
//! Centralizes magic numbers that show up in more than one module so they
//! stay in sync: buffer sizes, default timeouts, and the on-disk layout
//! under the project's `.moai/` directory.

use std::time::Duration;

// =============================================================================
// Directory Structure Constants
// =============================================================================

/// Project-local configuration directory, resolved relative to the project
/// root (`CLAUDE_PROJECT_DIR` or the invocation's `cwd`).
pub const MOAI_CONFIG_DIR: &str = ".moai";

/// Directory under [`MOAI_CONFIG_DIR`] holding policy files (security
/// allow/deny lists, quality gate thresholds).
pub const CONFIG_SECTIONS_DIR: &str = "config/sections";

/// Security policy file name, relative to [`CONFIG_SECTIONS_DIR`].
pub const SECURITY_POLICY_FILE: &str = "security.yaml";

/// Quality gate policy file name, relative to [`CONFIG_SECTIONS_DIR`].
pub const QUALITY_POLICY_FILE: &str = "quality.yaml";

/// Directory under [`MOAI_CONFIG_DIR`] holding per-session state: regression
/// baselines, team coordination directories, session logs.
pub const SESSION_STATE_DIR: &str = "sessions";

/// Regression baseline file name, relative to a session's state directory.
pub const BASELINE_FILE_NAME: &str = "baseline.json";

/// Directory under [`MOAI_CONFIG_DIR`] holding the project-wide diagnostics
/// baseline and the read-only coverage snapshot.
pub const MEMORY_DIR: &str = "memory";

/// Project-wide diagnostics baseline file name, relative to [`MEMORY_DIR`].
pub const DIAGNOSTICS_BASELINE_FILE: &str = "diagnostics-baseline.json";

/// Test coverage snapshot file name, relative to [`MEMORY_DIR`]. Read-only
/// from this process's perspective; written by an external coverage tool.
pub const COVERAGE_FILE: &str = "coverage.json";

/// Directory under [`MOAI_CONFIG_DIR`] holding the append-only task-metrics
/// log.
pub const LOGS_DIR: &str = "logs";

/// Append-only task-metrics log file name, relative to [`LOGS_DIR`].
pub const TASK_METRICS_FILE: &str = "task-metrics.jsonl";

/// Directory under [`MOAI_CONFIG_DIR`] holding per-spec directories, each
/// with its own `spec.md`.
pub const SPECS_DIR: &str = "specs";

/// Spec document file name inside a `<SPECS_DIR>/<SPEC-ID>/` directory.
pub const SPEC_FILE_NAME: &str = "spec.md";

/// Default test-coverage percentage floor `TeammateIdle` enforces when the
/// quality policy doesn't set `constitution.test_coverage_target`.
pub const DEFAULT_COVERAGE_TARGET: f64 = 85.0;

// =============================================================================
// Byte Size Constants
// =============================================================================

pub const BYTES_PER_KB: usize = 1024;
pub const BYTES_PER_MB: usize = 1024 * BYTES_PER_KB;
pub const BYTES_PER_GB: usize = 1024 * BYTES_PER_MB;

/// Upper bound on a single hook invocation's JSON payload before the wire
/// reader rejects it outright, guarding against a misbehaving host feeding
/// unbounded stdin.
pub const MAX_INPUT_SIZE_BYTES: usize = 10 * BYTES_PER_MB;

/// Default buffer size for stdin/stdout framing.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * BYTES_PER_KB;

// =============================================================================
// Timeout Constants
// =============================================================================

/// Dispatcher-wide default deadline for a full handler chain. The actual
/// deadline used for a given invocation is the minimum of this and any
/// caller-supplied deadline, never the maximum.
pub const DISPATCHER_DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default per-call deadline for an external diagnostics/lint tool
/// invocation (e.g. `cargo clippy`, `eslint`).
pub const EXTERNAL_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default per-request deadline for an LSP JSON-RPC round trip.
pub const LSP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of language servers the LSP manager will start at once.
pub const DEFAULT_LSP_STARTUP_CONCURRENCY: usize = 4;

// =============================================================================
// Logging Constants
// =============================================================================

/// Log file name pattern for session logs, with `{session_id}` as a
/// placeholder.
pub const LOG_FILE_PATTERN: &str = "session-{session_id}.log";

/// Maximum size per log file before rotation (10MB).
pub const MAX_LOG_FILE_SIZE: usize = 10 * BYTES_PER_MB;

/// Maximum number of rolled log files to keep per session.
pub const MAX_LOG_FILES_PER_SESSION: usize = 10;

// =============================================================================
// Worker Pool & Cache Constants
// =============================================================================

/// Default fixed worker-pool size when the host doesn't override it.
pub const DEFAULT_WORKER_THREADS: usize = 4;

/// The pool's bounded task queue holds this multiple of `max_workers`
/// before `submit` starts rejecting new work.
pub const WORKER_QUEUE_MULTIPLIER: usize = 10;

/// Default maximum number of entries the result cache retains.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Default time-to-live for a cache entry before it's treated as expired.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of retry attempts for a transient external command failure.
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Delay between retry attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(100);
