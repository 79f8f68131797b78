//! Core types and logic shared by the `moai-hooks` dispatch binary.
//!
//! This crate provides the wire protocol, security engine, diagnostics
//! pipeline, LSP client plumbing, and concurrency infrastructure that the
//! hook-event handlers and dispatcher build on. It ensures consistency,
//! type safety, and performance across the whole toolkit.
//!
//! # Core Components
//!
//! - **Types**: Domain models for sessions, agents, and tool interactions
//! - **Error Handling**: Comprehensive error types with clear exit codes
//! - **Configuration**: Layered configuration with env-var overrides
//! - **Path Utilities**: Secure path validation and manipulation
//!
//! # Example
//!
//! ```no_run
//! use moai_hooks_core::{SessionId, Session, SessionStatus, AgentId};
//! use chrono::Utc;
//! use std::path::PathBuf;
//!
//! // Create a new session
//! let session = Session {
//!     id: SessionId::generate(),
//!     created_at: Utc::now(),
//!     last_activity: Utc::now(),
//!     status: SessionStatus::Active,
//!     workspace_root: PathBuf::from("/tmp/moai"),
//!     active_agents: vec![],
//! };
//!
//! // Create a new agent
//! let agent_id = AgentId::generate();
//! assert!(agent_id.is_valid());
//! ```

#[macro_use]
pub mod types;
pub mod cache;
pub mod concurrency;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod external;
pub mod hook_events;
pub mod io;
pub mod logging;
pub mod lsp;
pub mod messages;
pub mod metrics;
pub mod path;
pub mod quality;
pub mod security;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use types::{
    agent::{AgentCapabilities, AgentId, AgentInfo, AgentStatus, AgentType},
    session::{Session, SessionId, SessionStatus},
    tool::{ToolCall, ToolCallId, ToolResult},
};

// Re-export error types
pub use error::{
    ConfigError, ErrorContext, ExitCode, FileSystemError, GitError, IntoMaosError, MaosError,
    Result, SecurityError, SessionError, ValidationError,
};

// Re-export metrics types
pub use metrics::{ExecutionStats, MemoryStats, MetricsReport, PerformanceMetrics, TaskMetricsLog, TaskMetricsRecord};

// Re-export the hook wire model and event identity — the surface every
// handler and the dispatcher build against.
pub use hook_events::HookEvent;
pub use messages::{HookInput, HookResponse, HookSpecificOutput, PermissionDecision};
