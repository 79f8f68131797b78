//! `PreToolUse`: delegates entirely to the security engine.

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

pub struct PreToolUseHandler;

#[async_trait::async_trait]
impl EventHandler for PreToolUseHandler {
    async fn handle(&self, ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        Ok(ctx.security.handle(input).await)
    }
}
