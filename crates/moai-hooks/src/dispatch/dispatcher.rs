//! Resolves an event's handler chain and runs it under a deadline.

use std::time::Duration;

use moai_hooks_core::hook_events::HookEvent;
use moai_hooks_core::messages::{HookInput, HookResponse, HookSpecificOutput, PermissionDecision};
use moai_hooks_core::{MaosError, Result};

use crate::context::HandlerContext;
use crate::dispatch::Registry;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Dispatcher {
    registry: Registry,
    default_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(registry: Registry, default_timeout: Duration) -> Self {
        Self {
            registry,
            default_timeout,
        }
    }

    /// Runs `event`'s handler chain against `input`, honoring whichever is
    /// shorter: the dispatcher's own default timeout or `caller_deadline`.
    pub async fn dispatch(
        &self,
        ctx: &HandlerContext,
        input: HookInput,
        caller_deadline: Option<Duration>,
    ) -> Result<HookResponse> {
        let event = input.hook_event_name;
        let handlers = self.registry.handlers_for(event);
        if handlers.is_empty() {
            return Ok(default_response(event));
        }

        let timeout = match caller_deadline {
            Some(deadline) if deadline < self.default_timeout => deadline,
            _ => self.default_timeout,
        };

        let run = async {
            let mut last = None;
            for handler in handlers {
                let response = handler.handle(ctx, &input).await?;
                if response.is_block() || response.is_exit_signal() {
                    return Ok(response);
                }
                last = Some(response);
            }
            Ok(last.unwrap_or_else(|| default_response(event)))
        };

        match tokio::time::timeout(timeout, run).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(event = %event, timeout_ms = timeout.as_millis(), "hook dispatch timed out");
                Err(MaosError::HookTimeout {
                    event: event.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        }
    }
}

/// The response returned for an event with no registered handlers, or whose
/// chain ran to completion without any handler producing output.
fn default_response(event: HookEvent) -> HookResponse {
    match event {
        HookEvent::PreToolUse => HookResponse::allow_for_pre_tool(),
        HookEvent::PostToolUse => HookResponse {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(HookEvent::PostToolUse),
                additional_context: Some(String::new()),
                ..Default::default()
            }),
            ..HookResponse::empty()
        },
        HookEvent::PermissionRequest => {
            HookResponse::permission_request_decision(PermissionDecision::Ask, "")
        }
        _ => HookResponse::empty(),
    }
}
