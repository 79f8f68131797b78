//! Task Metrics Record: an append-only log of completed sub-agent tasks.
//!
//! `PostToolUse` writes one JSON line to
//! `<project>/.moai/logs/task-metrics.jsonl` whenever the tool response
//! carries a `metrics` block — which only sub-agent task tools (e.g. a
//! `Task` tool invocation) populate. Writes are plain append, not the
//! temp-then-rename swap [`crate::quality::regression::RegressionTracker`]
//! uses for its single-document baseline: this is a log, not a document, so
//! each line is independent and a torn write at worst loses the last line
//! rather than corrupting the file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{LOGS_DIR, MOAI_CONFIG_DIR, TASK_METRICS_FILE};
use crate::error::Result;

/// One completed sub-agent task's accounting, as persisted on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetricsRecord {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub tool_name: String,
    pub tokens_used: u64,
    pub tool_use_count: u64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct MetricsBlock {
    #[serde(alias = "tokensUsed", alias = "tokens")]
    tokens_used: u64,
    #[serde(alias = "toolUseCount")]
    tool_use_count: u64,
    #[serde(alias = "durationSeconds")]
    duration_seconds: f64,
}

impl TaskMetricsRecord {
    pub fn new(
        session_id: impl Into<String>,
        tool_name: impl Into<String>,
        tokens_used: u64,
        tool_use_count: u64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: session_id.into(),
            tool_name: tool_name.into(),
            tokens_used,
            tool_use_count,
            duration_seconds,
        }
    }

    /// Reads a record out of a `PostToolUse` tool response, if it carries a
    /// `metrics` block. Returns `None` for any tool response that isn't a
    /// sub-agent task result — the common case, since most tools never set
    /// this field.
    pub fn from_tool_response(session_id: &str, tool_name: &str, tool_response: &Value) -> Option<Self> {
        let metrics_value = tool_response.get("metrics")?;
        let block: MetricsBlock = serde_json::from_value(metrics_value.clone()).ok()?;
        Some(Self {
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            tool_name: tool_name.to_string(),
            tokens_used: block.tokens_used,
            tool_use_count: block.tool_use_count,
            duration_seconds: block.duration_seconds,
        })
    }
}

/// Appends [`TaskMetricsRecord`]s for one project's `.moai/logs/` directory.
pub struct TaskMetricsLog {
    moai_dir: PathBuf,
    log_path: PathBuf,
}

impl TaskMetricsLog {
    pub fn new(project_root: &Path) -> Self {
        let moai_dir = project_root.join(MOAI_CONFIG_DIR);
        let log_path = moai_dir.join(LOGS_DIR).join(TASK_METRICS_FILE);
        Self { moai_dir, log_path }
    }

    /// Appends `record` as one JSON line. A no-op when `<project>/.moai/`
    /// doesn't exist yet — this process never creates that directory itself,
    /// only writes underneath an already-initialized project.
    pub fn append(&self, record: &TaskMetricsRecord) -> Result<()> {
        if !self.moai_dir.is_dir() {
            return Ok(());
        }
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new().create(true).append(true).open(&self.log_path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
