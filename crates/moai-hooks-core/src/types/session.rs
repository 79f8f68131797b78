//! Session management types for the hook toolkit
//!
//! This module provides types for managing hook-toolkit sessions, including unique
//! identifiers, session state, and metadata tracking.

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unique identifier for a session
///
/// Session IDs follow the format: `sess_{timestamp}_{random}`
/// where timestamp is YYYYMMDDHHMMss and random is a 6-character nanoid.
///
/// # Example
///
/// ```
/// use moai_hooks_core::SessionId;
///
/// let id = SessionId::generate();
/// assert!(id.is_valid());
/// assert!(id.as_str().starts_with("sess_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new unique session ID
    pub fn generate() -> Self {
        let timestamp = Utc::now().format("%Y%m%d%H%M%S");
        let random = nanoid!(6); // 6 character random suffix
        Self(format!("sess_{timestamp}_{random}"))
    }

    /// Check if the session ID format is valid
    pub fn is_valid(&self) -> bool {
        let parts: Vec<&str> = self.0.split('_').collect();
        parts.len() == 3 && parts[0] == "sess" && !parts[1].is_empty() && !parts[2].is_empty()
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session metadata and state
///
/// Represents a complete session with all its metadata, including
/// the workspace location, active agents, and current status.
///
/// # Example
///
/// ```
/// use moai_hooks_core::{Session, SessionId, SessionStatus};
/// use chrono::Utc;
/// use std::path::PathBuf;
///
/// let session = Session {
///     id: SessionId::generate(),
///     created_at: Utc::now(),
///     last_activity: Utc::now(),
///     status: SessionStatus::Active,
///     workspace_root: PathBuf::from("/tmp/maos-workspace"),
///     active_agents: vec![],
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session
    pub id: SessionId,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last time any activity occurred in this session
    pub last_activity: DateTime<Utc>,
    /// Current status of the session
    pub status: SessionStatus,
    /// Root directory for all session workspaces
    pub workspace_root: PathBuf,
    /// List of active agent IDs (TODO: Will be Vec<AgentInfo> later)
    pub active_agents: Vec<String>,
}

/// Status of a session
///
/// Sessions progress through different states during their lifecycle:
/// - `Active`: Currently running with agents working
/// - `Paused`: Temporarily suspended but can be resumed
/// - `Completed`: Successfully finished all tasks
/// - `Failed`: Terminated due to an error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is actively running
    Active,
    /// Session is paused and can be resumed
    Paused,
    /// Session completed successfully
    Completed,
    /// Session failed with an error
    Failed {
        /// Human-readable failure reason
        reason: String,
    },
}
