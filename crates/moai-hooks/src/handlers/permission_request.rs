//! `PermissionRequest`: logs the request and always answers `ask`, echoing
//! `PreToolUse` as the host-facing event name since it shares that event's
//! output schema.

use moai_hooks_core::messages::{HookInput, HookResponse, PermissionDecision};
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct PermissionRequestHandler;

#[async_trait::async_trait]
impl EventHandler for PermissionRequestHandler {
    async fn handle(&self, _ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        tracing::info!(
            session_id = %input.session_id,
            tool_name = input.tool_name.as_deref(),
            "permission requested"
        );
        Ok(HookResponse::permission_request_decision(
            PermissionDecision::Ask,
            format!("Confirm permission for: {}", input.tool_name()),
        ))
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
    async fn echoes_pre_tool_use_event_name() {
        let ctx = HandlerContext::new(Arc::new(MaosConfig::default()));
        let handler = PermissionRequestHandler;
        let input = HookInput {
            session_id: "s1".into(),
            cwd: PathBuf::from("/tmp"),
            hook_event_name: HookEvent::PermissionRequest,
            transcript_path: None,
            tool_name: Some("Bash".into()),
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
        let output = response.hook_specific_output.unwrap();
        assert_eq!(output.hook_event_name, Some(HookEvent::PreToolUse));
        assert_eq!(output.permission_decision, Some(PermissionDecision::Ask));
    }
}
