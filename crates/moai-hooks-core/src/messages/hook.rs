//! Hook invocation and response wire types.
//!
//! A single process invocation receives exactly one [`HookInput`] on stdin and
//! must emit exactly one [`HookResponse`] on stdout, followed by a process exit
//! code. The host reads two distinct blocking conventions depending on event
//! kind (see [`HookResponse`]); [`crate::hook_events::HookEvent`] tells each
//! handler and the dispatcher which one applies.
//!
//! # Example
//!
//! ```no_run
//! use moai_hooks_core::messages::{HookInput, HookResponse};
//! use moai_hooks_core::hook_events::HookEvent;
//! use std::io;
//!
//! let input: HookInput = serde_json::from_reader(io::stdin())?;
//! let response = match input.hook_event_name {
//!     HookEvent::PreToolUse => HookResponse::allow_for_pre_tool(),
//!     _ => HookResponse::empty(),
//! };
//! std::process::exit(response.to_exit_code());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::hook_events::HookEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// A single inbound hook invocation as sent by the host on stdin.
///
/// Only `session_id`, `cwd`, and `hook_event_name` are required; every other
/// field is event-specific and optional. Unknown fields are accepted and
/// ignored (the default for a struct without `deny_unknown_fields`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookInput {
    pub session_id: String,
    pub cwd: PathBuf,
    pub hook_event_name: HookEvent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<PathBuf>,

    // Tool-use events (PreToolUse, PostToolUse, PostToolUseFailure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<bool>,

    // SessionStart / SessionEnd
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    // Stop / SubagentStop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_hook_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    // PreCompact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,

    // UserPromptSubmit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    // Notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,

    // Team mode (TeammateIdle, TaskCompleted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teammate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,

    // WorktreeCreate / WorktreeRemove
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktree_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktree_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktree_agent_name: Option<String>,
}

impl HookInput {
    pub fn is_tool_event(&self) -> bool {
        self.hook_event_name.is_tool_hook()
    }

    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or("")
    }

    pub fn tool_input(&self) -> &Value {
        self.tool_input.as_ref().unwrap_or(&Value::Null)
    }

    pub fn tool_response(&self) -> Option<&Value> {
        self.tool_response.as_ref()
    }

    pub fn user_prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// True when this invocation carries team-mode context (a team name is present).
    pub fn is_team_mode(&self) -> bool {
        self.team_name.is_some()
    }
}

/// The three-way outcome of a permission check on `PreToolUse` / `PermissionRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    Allow,
    Deny,
    Ask,
}

/// The nested block the host reads for `PreToolUse`/`PermissionRequest` decisions
/// and for `PostToolUse` additional context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_event_name: Option<HookEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<PermissionDecision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// A single outbound hook response.
///
/// Two blocking conventions coexist, chosen by event kind (see
/// [`HookEvent::uses_permission_decision`]): `PreToolUse`/`PermissionRequest`
/// block via `hookSpecificOutput.permissionDecision`; `Stop`/`PostToolUse`/
/// `UserPromptSubmit` block via the top-level `decision` field.
/// `TeammateIdle`/`TaskCompleted` never set either field — they signal purely
/// through the process exit code, carried here in a field that is never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    #[serde(rename = "continue", default = "default_continue", skip_serializing_if = "is_true")]
    pub continue_: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub suppress_output: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_input: Option<String>,

    /// Internal-only. Never serialized; read by the binary to choose the
    /// process exit code.
    #[serde(skip)]
    pub exit_code: i32,
}

fn default_continue() -> bool {
    true
}

impl Default for HookResponse {
    fn default() -> Self {
        Self {
            continue_: true,
            stop_reason: None,
            system_message: None,
            suppress_output: false,
            decision: None,
            reason: None,
            hook_specific_output: None,
            updated_input: None,
            exit_code: 0,
        }
    }
}

impl HookResponse {
    /// The empty `{}` response used as a default for observation-only events.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn allow_for_pre_tool() -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(HookEvent::PreToolUse),
                permission_decision: Some(PermissionDecision::Allow),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn deny_for_pre_tool(reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(HookEvent::PreToolUse),
                permission_decision: Some(PermissionDecision::Deny),
                permission_decision_reason: Some(reason.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn ask_for_pre_tool(reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(HookEvent::PreToolUse),
                permission_decision: Some(PermissionDecision::Ask),
                permission_decision_reason: Some(reason.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn block_for_stop(reason: impl Into<String>) -> Self {
        Self {
            decision: Some("block".to_string()),
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn block_for_post_tool(
        reason: impl Into<String>,
        additional_context: impl Into<String>,
    ) -> Self {
        Self {
            decision: Some("block".to_string()),
            reason: Some(reason.into()),
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(HookEvent::PostToolUse),
                additional_context: Some(additional_context.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// `PermissionRequest` shares `PreToolUse`'s output schema; the echoed
    /// event name is always `PreToolUse`.
    pub fn permission_request_decision(
        decision: PermissionDecision,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(HookEvent::PreToolUse),
                permission_decision: Some(decision),
                permission_decision_reason: Some(reason.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Exit 2, no JSON decision — `TeammateIdle`'s "keep working" signal.
    pub fn keep_teammate_working() -> Self {
        Self {
            exit_code: 2,
            ..Default::default()
        }
    }

    /// Exit 2, no JSON decision — `TaskCompleted`'s rejection signal.
    pub fn reject_task_completion() -> Self {
        Self {
            exit_code: 2,
            ..Default::default()
        }
    }

    pub fn suppress_output() -> Self {
        Self {
            suppress_output: true,
            ..Default::default()
        }
    }

    pub fn session_allow(system_message: Option<String>) -> Self {
        Self {
            system_message,
            ..Default::default()
        }
    }

    /// True when this response blocks via either of the host's two JSON
    /// conventions (the exit-code-only convention is checked separately).
    pub fn is_block(&self) -> bool {
        self.decision.as_deref() == Some("block")
            || matches!(
                self.hook_specific_output
                    .as_ref()
                    .and_then(|h| h.permission_decision),
                Some(PermissionDecision::Deny)
            )
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.reason.as_deref().or_else(|| {
            self.hook_specific_output
                .as_ref()
                .and_then(|h| h.permission_decision_reason.as_deref())
        })
    }

    pub fn is_exit_signal(&self) -> bool {
        self.exit_code == 2
    }

    pub fn to_exit_code(&self) -> i32 {
        self.exit_code
    }
}
