//! `TeammateIdle`: in team mode, gates idling on the project's quality
//! bar — the diagnostics baseline must clear the configured error/warning
//! thresholds and coverage must meet its target, or the teammate is told
//! to keep working via exit code 2.

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::quality::CoverageSnapshot;
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct TeammateIdleHandler;

#[async_trait::async_trait]
impl EventHandler for TeammateIdleHandler {
    async fn handle(&self, ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        if !input.is_team_mode() {
            return Ok(HookResponse::empty());
        }

        let Ok(gate) = ctx.load_quality_gate() else {
            tracing::debug!("quality gate config unreadable, allowing teammate idle");
            return Ok(HookResponse::empty());
        };

        if !gate.thresholds().enabled {
            return Ok(HookResponse::empty());
        }

        let Some(total) = ctx.regression.total_counts()? else {
            return Ok(HookResponse::empty());
        };

        if gate.should_block(total) {
            eprintln!(
                "Quality gate failed: {} error(s), {} warning(s) exceed the configured thresholds (max_errors={}, max_warnings={})",
                total.errors, total.warnings, gate.thresholds().max_errors, gate.thresholds().max_warnings
            );
            return Ok(HookResponse::keep_teammate_working());
        }

        let target = gate.thresholds().test_coverage_target;
        match CoverageSnapshot::load(ctx.project_root())? {
            Some(snapshot) if snapshot.meets_target(target) => Ok(HookResponse::empty()),
            Some(snapshot) => {
                eprintln!(
                    "Test coverage {:.1}% is below the target of {:.1}%",
                    snapshot.coverage_percent, target
                );
                Ok(HookResponse::keep_teammate_working())
            }
            None => {
                eprintln!("No test coverage snapshot found; treating as below the {target:.1}% target");
                Ok(HookResponse::keep_teammate_working())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moai_hooks_core::config::MaosConfig;
    use moai_hooks_core::diagnostics::{Diagnostic, Severity};
    use moai_hooks_core::hook_events::HookEvent;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn error_diagnostic(line: u32, message: &str) -> Diagnostic {
        Diagnostic {
            file: PathBuf::from("src/lib.rs"),
            line,
            column: 1,
            severity: Severity::Error,
            message: message.to_string(),
            source: "clippy".to_string(),
        }
    }

    fn input(team_name: Option<&str>, cwd: PathBuf) -> HookInput {
        HookInput {
            session_id: "s1".into(),
            cwd,
            hook_event_name: HookEvent::TeammateIdle,
            transcript_path: None,
            tool_name: None,
            tool_input: None,
            tool_response: None,
            tool_use_id: None,
            error: None,
            interrupted: None,
            source: None,
            model: None,
            reason: None,
            stop_hook_active: None,
            agent_id: None,
            trigger: None,
            custom_instructions: None,
            prompt: None,
            title: None,
            message: None,
            notification_type: None,
            team_name: team_name.map(String::from),
            teammate_name: None,
            task_id: None,
            task_subject: None,
            task_description: None,
            worktree_path: None,
            worktree_branch: None,
            worktree_agent_name: None,
        }
    }

    #[tokio::test]
    async fn non_team_mode_always_allows() {
        let dir = tempdir().unwrap();
        let mut config = MaosConfig::default();
        config.project_root = Some(dir.path().to_path_buf());
        let ctx = HandlerContext::new(Arc::new(config));
        let handler = TeammateIdleHandler;
        let response = handler.handle(&ctx, &input(None, dir.path().to_path_buf())).await.unwrap();
        assert_eq!(response.to_exit_code(), 0);
    }

    #[tokio::test]
    async fn team_mode_with_no_baseline_allows() {
        let dir = tempdir().unwrap();
        let mut config = MaosConfig::default();
        config.project_root = Some(dir.path().to_path_buf());
        let ctx = HandlerContext::new(Arc::new(config));
        let handler = TeammateIdleHandler;
        let response = handler
            .handle(&ctx, &input(Some("alpha"), dir.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(response.to_exit_code(), 0);
    }

    #[tokio::test]
    async fn team_mode_with_errors_over_threshold_keeps_working() {
        let dir = tempdir().unwrap();
        let mut config = MaosConfig::default();
        config.project_root = Some(dir.path().to_path_buf());
        let ctx = HandlerContext::new(Arc::new(config));
        ctx.regression
            .save_baseline(
                "src/lib.rs",
                vec![
                    error_diagnostic(1, "unused variable `x`"),
                    error_diagnostic(2, "missing semicolon"),
                ],
            )
            .unwrap();

        let handler = TeammateIdleHandler;
        let response = handler
            .handle(&ctx, &input(Some("alpha"), dir.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(response.to_exit_code(), 2);
    }

    #[tokio::test]
    async fn clean_baseline_but_missing_coverage_keeps_working() {
        let dir = tempdir().unwrap();
        let mut config = MaosConfig::default();
        config.project_root = Some(dir.path().to_path_buf());
        let ctx = HandlerContext::new(Arc::new(config));
        ctx.regression.save_baseline("src/lib.rs", Vec::new()).unwrap();

        let handler = TeammateIdleHandler;
        let response = handler
            .handle(&ctx, &input(Some("alpha"), dir.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(response.to_exit_code(), 2);
    }
}
