//! `SessionStart`: logs the new session and allows, optionally carrying a
//! configured welcome message.

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct SessionStartHandler;

#[async_trait::async_trait]
impl EventHandler for SessionStartHandler {
    async fn handle(&self, ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        tracing::info!(
            session_id = %input.session_id,
            source = input.source.as_deref(),
            model = input.model.as_deref(),
            "session started"
        );
        Ok(HookResponse::session_allow(ctx.config.session.welcome_message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moai_hooks_core::config::MaosConfig;
    use moai_hooks_core::hook_events::HookEvent;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn input() -> HookInput {
        HookInput {
            session_id: "s1".into(),
            cwd: PathBuf::from("/tmp"),
            hook_event_name: HookEvent::SessionStart,
            transcript_path: None,
            tool_name: None,
            tool_input: None,
            tool_response: None,
            tool_use_id: None,
            error: None,
            interrupted: None,
            source: Some("startup".into()),
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
        }
    }

    #[tokio::test]
    async fn carries_configured_welcome_message() {
        let mut config = MaosConfig::default();
        config.session.welcome_message = Some("hi there".into());
        let ctx = HandlerContext::new(Arc::new(config));
        let handler = SessionStartHandler;
        let response = handler.handle(&ctx, &input()).await.unwrap();
        assert_eq!(response.system_message.as_deref(), Some("hi there"));
    }

    #[tokio::test]
    async fn absent_configuration_is_not_an_error() {
        let ctx = HandlerContext::new(Arc::new(MaosConfig::default()));
        let handler = SessionStartHandler;
        let response = handler.handle(&ctx, &input()).await.unwrap();
        assert!(response.system_message.is_none());
        assert!(!response.is_block());
    }
}
