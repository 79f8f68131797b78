//! One handler per hook event kind.
//!
//! Every handler implements [`EventHandler`]; the dispatcher owns the
//! registration order and short-circuit rules (see
//! [`crate::dispatch::dispatcher`]). Handlers never talk to stdin/stdout
//! directly — they receive an already-parsed [`HookInput`] and a shared
//! [`HandlerContext`], and return a [`HookResponse`] or a [`MaosError`].

mod log_and_allow;
mod permission_request;
mod post_tool_use;
mod pre_tool_use;
mod session_end;
mod session_start;
mod stop;
mod task_completed;
mod teammate_idle;

pub use log_and_allow::LogAndAllowHandler;
pub use permission_request::PermissionRequestHandler;
pub use post_tool_use::PostToolUseHandler;
pub use pre_tool_use::PreToolUseHandler;
pub use session_end::SessionEndHandler;
pub use session_start::SessionStartHandler;
pub use stop::StopHandler;
pub use task_completed::TaskCompletedHandler;
pub use teammate_idle::TeammateIdleHandler;

use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::context::HandlerContext;

/// A single step in an event's handler chain.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse>;
}
