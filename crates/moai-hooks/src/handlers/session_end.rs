//! `SessionEnd`: always answers empty; triggers best-effort lifecycle
//! cleanup as a side effect (see [`crate::cleanup`]).

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::cleanup;
use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct SessionEndHandler;

#[async_trait::async_trait]
impl EventHandler for SessionEndHandler {
    async fn handle(&self, _ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        tracing::info!(session_id = %input.session_id, reason = input.reason.as_deref(), "session ending");
        cleanup::run_session_end_cleanup(&input.session_id).await;
        Ok(HookResponse::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moai_hooks_core::config::MaosConfig;
    use moai_hooks_core::hook_events::HookEvent;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[tokio::test]
    async fn always_returns_empty() {
        let ctx = HandlerContext::new(Arc::new(MaosConfig::default()));
        let handler = SessionEndHandler;
        let input = HookInput {
            session_id: "s1".into(),
            cwd: PathBuf::from("/tmp"),
            hook_event_name: HookEvent::SessionEnd,
            transcript_path: None,
            tool_name: None,
            tool_input: None,
            tool_response: None,
            tool_use_id: None,
            error: None,
            interrupted: None,
            source: None,
            model: None,
            reason: Some("logout".into()),
            stop_hook_active: None,
            agent_id: None,
            trigger: None,
            custom_instructions: None,
            prompt: None,
            title: None,
            message: None,
            notification_type: None,
            team_name: None,
            teammate_name: None,
            task_id: None,
            task_subject: None,
            task_description: None,
            worktree_path: None,
            worktree_branch: None,
            worktree_agent_name: None,
        };
        let response = handler.handle(&ctx, &input).await.unwrap();
        assert_eq!(serde_json::to_string(&response).unwrap(), "{}");
    }
}
