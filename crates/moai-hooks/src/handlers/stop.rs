//! `Stop`: always answers empty. When `stop_hook_active` is already set,
//! the host is already in its own stop-hook loop — answering empty (no
//! `decision: block`) is what lets that loop terminate rather than
//! re-triggering itself.

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct StopHandler;

#[async_trait::async_trait]
impl EventHandler for StopHandler {
    async fn handle(&self, _ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        if input.stop_hook_active.unwrap_or(false) {
            tracing::debug!(session_id = %input.session_id, "stop hook already active, breaking loop");
        }
        Ok(HookResponse::empty())
    }
}
