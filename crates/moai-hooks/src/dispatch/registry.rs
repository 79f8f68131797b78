//! Per-event handler chains, in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use moai_hooks_core::hook_events::HookEvent;

use crate::handlers::{
    EventHandler, LogAndAllowHandler, PermissionRequestHandler, PostToolUseHandler,
    PreToolUseHandler, SessionEndHandler, SessionStartHandler, StopHandler, TaskCompletedHandler,
    TeammateIdleHandler,
};

/// Maps each [`HookEvent`] to the ordered chain of handlers that run for it.
pub struct Registry {
    chains: HashMap<HookEvent, Vec<Arc<dyn EventHandler>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    /// Appends a handler to `event`'s chain, preserving call order.
    pub fn register(&mut self, event: HookEvent, handler: Arc<dyn EventHandler>) -> &mut Self {
        self.chains.entry(event).or_default().push(handler);
        self
    }

    pub fn handlers_for(&self, event: HookEvent) -> &[Arc<dyn EventHandler>] {
        self.chains.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The standard chain: one dedicated handler per tool/lifecycle/team
    /// event, [`LogAndAllowHandler`] shared across the purely observational
    /// ones.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        let log_and_allow: Arc<dyn EventHandler> = Arc::new(LogAndAllowHandler);

        registry
            .register(HookEvent::PreToolUse, Arc::new(PreToolUseHandler))
            .register(HookEvent::PostToolUse, Arc::new(PostToolUseHandler))
            .register(HookEvent::PostToolUseFailure, Arc::clone(&log_and_allow))
            .register(HookEvent::Notification, Arc::clone(&log_and_allow))
            .register(HookEvent::SubagentStart, Arc::clone(&log_and_allow))
            .register(HookEvent::SubagentStop, Arc::clone(&log_and_allow))
            .register(HookEvent::PreCompact, Arc::clone(&log_and_allow))
            .register(HookEvent::WorktreeCreate, Arc::clone(&log_and_allow))
            .register(HookEvent::WorktreeRemove, Arc::clone(&log_and_allow))
            .register(HookEvent::UserPromptSubmit, Arc::clone(&log_and_allow))
            .register(HookEvent::PermissionRequest, Arc::new(PermissionRequestHandler))
            .register(HookEvent::SessionStart, Arc::new(SessionStartHandler))
            .register(HookEvent::SessionEnd, Arc::new(SessionEndHandler))
            .register(HookEvent::Stop, Arc::new(StopHandler))
            .register(HookEvent::TeammateIdle, Arc::new(TeammateIdleHandler))
            .register(HookEvent::TaskCompleted, Arc::new(TaskCompletedHandler));

        registry
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}
