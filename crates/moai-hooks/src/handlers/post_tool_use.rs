//! `PostToolUse`: observation-only. Never blocks.
//!
//! Folds tool name, session id, and payload sizes into a structured log
//! line; appends a task-metrics record when the tool response carries a
//! sub-agent `metrics` block; and, for `Write`/`Edit`, collects diagnostics
//! for the affected file and persists them as that file's new baseline —
//! the only point in the chain that writes
//! [`RegressionTracker`](moai_hooks_core::quality::RegressionTracker)'s
//! baseline, which is what [`crate::handlers::TeammateIdleHandler`] later
//! reads.

use std::path::PathBuf;

use moai_hooks_core::diagnostics::severity_counts;
use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::metrics::TaskMetricsRecord;
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct PostToolUseHandler;

#[async_trait::async_trait]
impl EventHandler for PostToolUseHandler {
    async fn handle(&self, ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        let tool_name = input.tool_name();
        let input_size = input.tool_input.as_ref().map(json_size).unwrap_or(0);
        let output_size = input.tool_response.as_ref().map(json_size).unwrap_or(0);

        if let Some(tool_response) = input.tool_response() {
            if let Some(record) = TaskMetricsRecord::from_tool_response(&input.session_id, tool_name, tool_response) {
                if let Err(err) = ctx.task_metrics.append(&record) {
                    tracing::warn!(%err, "failed to append task metrics record");
                }
            }
        }

        let mut counts = None;
        if tool_name.eq_ignore_ascii_case("write") || tool_name.eq_ignore_ascii_case("edit") {
            if let Some(file_path) = input
                .tool_input
                .as_ref()
                .and_then(|v| v.get("file_path"))
                .and_then(|v| v.as_str())
            {
                let file = PathBuf::from(file_path);
                let diagnostics = ctx.diagnostics.collect(&file, ctx.project_root(), None, None).await;
                let severity = severity_counts(&diagnostics);
                if let Err(err) = ctx.regression.save_baseline(file_path, diagnostics) {
                    tracing::warn!(%err, file = file_path, "failed to persist diagnostics baseline");
                }
                counts = Some(severity);
            }
        }

        tracing::info!(
            tool_name,
            session_id = %input.session_id,
            input_size,
            output_size,
            errors = counts.map(|c| c.errors),
            warnings = counts.map(|c| c.warnings),
            "post_tool_use observation"
        );

        Ok(HookResponse::empty())
    }
}

fn json_size(value: &serde_json::Value) -> usize {
    serde_json::to_vec(value).map(|bytes| bytes.len()).unwrap_or(0)
}
