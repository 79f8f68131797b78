//! Shared handler for the observation-only events that only log context
//! and return an empty response: `PostToolUseFailure`, `Notification`,
//! `SubagentStart`, `SubagentStop`, `PreCompact`, `WorktreeCreate`,
//! `WorktreeRemove`, `UserPromptSubmit`.
//!
//! `UserPromptSubmit` can rewrite the user's prompt via `updated_input`;
//! `HookResponse::empty()` leaves it unset, which the host reads as "no
//! rewrite" — exactly this handler's behavior, so one implementation
//! covers all eight events without a special case.

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct LogAndAllowHandler;

#[async_trait::async_trait]
impl EventHandler for LogAndAllowHandler {
    async fn handle(&self, _ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        tracing::info!(
            event = input.hook_event_name.as_str(),
            session_id = %input.session_id,
            tool_name = input.tool_name.as_deref(),
            error = input.error.as_deref(),
            reason = input.reason.as_deref(),
            title = input.title.as_deref(),
            message = input.message.as_deref(),
            prompt = input.prompt.as_deref(),
            trigger = input.trigger.as_deref(),
            agent_id = input.agent_id.as_deref(),
            worktree_path = ?input.worktree_path,
            "hook event observed"
        );
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
    async fn returns_empty_and_unsets_updated_input() {
        let ctx = HandlerContext::new(Arc::new(MaosConfig::default()));
        let handler = LogAndAllowHandler;
        let input = HookInput {
            session_id: "s1".into(),
            cwd: PathBuf::from("/tmp"),
            hook_event_name: HookEvent::UserPromptSubmit,
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
            prompt: Some("hello".into()),
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
        assert!(response.updated_input.is_none());
        assert_eq!(serde_json::to_string(&response).unwrap(), "{}");
    }
}
