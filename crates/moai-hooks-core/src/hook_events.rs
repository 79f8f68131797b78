//! Hook event identity: the closed set of event kinds the host can dispatch.
//!
//! Wire strings are the host's own PascalCase spellings (`"PreToolUse"`, not
//! `"pre_tool_use"`) since the event name is echoed back verbatim inside
//! `hookSpecificOutput.hookEventName` and must round-trip byte-for-byte.

use std::fmt::{self, Display};

/// Claude Code hook event name constants, exactly as they appear in
/// `hook_event_name` on the wire.
pub mod event_constants {
    pub const SESSION_START: &str = "SessionStart";
    pub const PRE_TOOL_USE: &str = "PreToolUse";
    pub const POST_TOOL_USE: &str = "PostToolUse";
    pub const SESSION_END: &str = "SessionEnd";
    pub const STOP: &str = "Stop";
    pub const SUBAGENT_STOP: &str = "SubagentStop";
    pub const PRE_COMPACT: &str = "PreCompact";
    pub const POST_TOOL_USE_FAILURE: &str = "PostToolUseFailure";
    pub const NOTIFICATION: &str = "Notification";
    pub const SUBAGENT_START: &str = "SubagentStart";
    pub const USER_PROMPT_SUBMIT: &str = "UserPromptSubmit";
    pub const PERMISSION_REQUEST: &str = "PermissionRequest";
    pub const TEAMMATE_IDLE: &str = "TeammateIdle";
    pub const TASK_COMPLETED: &str = "TaskCompleted";
    pub const WORKTREE_CREATE: &str = "WorktreeCreate";
    pub const WORKTREE_REMOVE: &str = "WorktreeRemove";

    pub const ALL_EVENTS: &[&str] = &[
        SESSION_START,
        PRE_TOOL_USE,
        POST_TOOL_USE,
        SESSION_END,
        STOP,
        SUBAGENT_STOP,
        PRE_COMPACT,
        POST_TOOL_USE_FAILURE,
        NOTIFICATION,
        SUBAGENT_START,
        USER_PROMPT_SUBMIT,
        PERMISSION_REQUEST,
        TEAMMATE_IDLE,
        TASK_COMPLETED,
        WORKTREE_CREATE,
        WORKTREE_REMOVE,
    ];
}

/// Logical groupings used for metrics and logging.
pub mod category_constants {
    pub const TOOL_HOOKS: &str = "tool-hooks";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const LIFECYCLE: &str = "lifecycle";
    pub const USER_INPUT: &str = "user-input";
    pub const MAINTENANCE: &str = "maintenance";
    pub const TEAM: &str = "team";
    pub const WORKTREE: &str = "worktree";
    pub const UNKNOWN: &str = "unknown";

    pub const ALL_CATEGORIES: &[&str] = &[
        TOOL_HOOKS,
        NOTIFICATIONS,
        LIFECYCLE,
        USER_INPUT,
        MAINTENANCE,
        TEAM,
        WORKTREE,
    ];
}

/// The closed set of hook events the dispatcher can route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HookEvent {
    SessionStart,
    PreToolUse,
    PostToolUse,
    SessionEnd,
    Stop,
    SubagentStop,
    PreCompact,
    PostToolUseFailure,
    Notification,
    SubagentStart,
    UserPromptSubmit,
    PermissionRequest,
    TeammateIdle,
    TaskCompleted,
    WorktreeCreate,
    WorktreeRemove,
    /// A `hook_event_name` the dispatcher doesn't recognize. The host's own
    /// event set can grow ahead of this binary's release cadence, so an
    /// unrecognized name is not a parse error — it routes to the empty
    /// default response instead of failing the whole invocation.
    #[serde(other)]
    Unknown,
}

impl HookEvent {
    /// All events, in no particular wire-order significance.
    pub const fn all() -> &'static [HookEvent] {
        &[
            HookEvent::SessionStart,
            HookEvent::PreToolUse,
            HookEvent::PostToolUse,
            HookEvent::SessionEnd,
            HookEvent::Stop,
            HookEvent::SubagentStop,
            HookEvent::PreCompact,
            HookEvent::PostToolUseFailure,
            HookEvent::Notification,
            HookEvent::SubagentStart,
            HookEvent::UserPromptSubmit,
            HookEvent::PermissionRequest,
            HookEvent::TeammateIdle,
            HookEvent::TaskCompleted,
            HookEvent::WorktreeCreate,
            HookEvent::WorktreeRemove,
        ]
    }

    /// Parse an event from its exact wire spelling, rejecting anything outside
    /// the closed set. Deserializing a [`HookInput`](crate::messages::HookInput)
    /// off the wire is more forgiving than this — see [`HookEvent::Unknown`].
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            event_constants::SESSION_START => Some(HookEvent::SessionStart),
            event_constants::PRE_TOOL_USE => Some(HookEvent::PreToolUse),
            event_constants::POST_TOOL_USE => Some(HookEvent::PostToolUse),
            event_constants::SESSION_END => Some(HookEvent::SessionEnd),
            event_constants::STOP => Some(HookEvent::Stop),
            event_constants::SUBAGENT_STOP => Some(HookEvent::SubagentStop),
            event_constants::PRE_COMPACT => Some(HookEvent::PreCompact),
            event_constants::POST_TOOL_USE_FAILURE => Some(HookEvent::PostToolUseFailure),
            event_constants::NOTIFICATION => Some(HookEvent::Notification),
            event_constants::SUBAGENT_START => Some(HookEvent::SubagentStart),
            event_constants::USER_PROMPT_SUBMIT => Some(HookEvent::UserPromptSubmit),
            event_constants::PERMISSION_REQUEST => Some(HookEvent::PermissionRequest),
            event_constants::TEAMMATE_IDLE => Some(HookEvent::TeammateIdle),
            event_constants::TASK_COMPLETED => Some(HookEvent::TaskCompleted),
            event_constants::WORKTREE_CREATE => Some(HookEvent::WorktreeCreate),
            event_constants::WORKTREE_REMOVE => Some(HookEvent::WorktreeRemove),
            _ => None,
        }
    }

    /// The exact wire spelling for this event.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HookEvent::SessionStart => event_constants::SESSION_START,
            HookEvent::PreToolUse => event_constants::PRE_TOOL_USE,
            HookEvent::PostToolUse => event_constants::POST_TOOL_USE,
            HookEvent::SessionEnd => event_constants::SESSION_END,
            HookEvent::Stop => event_constants::STOP,
            HookEvent::SubagentStop => event_constants::SUBAGENT_STOP,
            HookEvent::PreCompact => event_constants::PRE_COMPACT,
            HookEvent::PostToolUseFailure => event_constants::POST_TOOL_USE_FAILURE,
            HookEvent::Notification => event_constants::NOTIFICATION,
            HookEvent::SubagentStart => event_constants::SUBAGENT_START,
            HookEvent::UserPromptSubmit => event_constants::USER_PROMPT_SUBMIT,
            HookEvent::PermissionRequest => event_constants::PERMISSION_REQUEST,
            HookEvent::TeammateIdle => event_constants::TEAMMATE_IDLE,
            HookEvent::TaskCompleted => event_constants::TASK_COMPLETED,
            HookEvent::WorktreeCreate => event_constants::WORKTREE_CREATE,
            HookEvent::WorktreeRemove => event_constants::WORKTREE_REMOVE,
            HookEvent::Unknown => "Unknown",
        }
    }

    pub const fn is_tool_hook(&self) -> bool {
        matches!(
            self,
            HookEvent::PreToolUse | HookEvent::PostToolUse | HookEvent::PostToolUseFailure
        )
    }

    pub const fn is_lifecycle_hook(&self) -> bool {
        matches!(
            self,
            HookEvent::Stop
                | HookEvent::SubagentStop
                | HookEvent::SessionStart
                | HookEvent::SessionEnd
        )
    }

    /// Whether the host reads this event's blocking verdict from the nested
    /// `hookSpecificOutput.permissionDecision` field rather than the top-level
    /// `decision` field.
    pub const fn uses_permission_decision(&self) -> bool {
        matches!(self, HookEvent::PreToolUse | HookEvent::PermissionRequest)
    }

    /// Whether the host reads this event's blocking verdict purely from the
    /// process exit code (2 = keep working / reject), ignoring any JSON body.
    pub const fn uses_exit_code_only(&self) -> bool {
        matches!(self, HookEvent::TeammateIdle | HookEvent::TaskCompleted)
    }

    pub const fn category(&self) -> &'static str {
        match self {
            HookEvent::PreToolUse | HookEvent::PostToolUse | HookEvent::PostToolUseFailure => {
                category_constants::TOOL_HOOKS
            }
            HookEvent::Notification => category_constants::NOTIFICATIONS,
            HookEvent::Stop
            | HookEvent::SubagentStop
            | HookEvent::SessionStart
            | HookEvent::SessionEnd => category_constants::LIFECYCLE,
            HookEvent::UserPromptSubmit => category_constants::USER_INPUT,
            HookEvent::PreCompact => category_constants::MAINTENANCE,
            HookEvent::SubagentStart => category_constants::TOOL_HOOKS,
            HookEvent::PermissionRequest => category_constants::TOOL_HOOKS,
            HookEvent::TeammateIdle | HookEvent::TaskCompleted => category_constants::TEAM,
            HookEvent::WorktreeCreate | HookEvent::WorktreeRemove => category_constants::WORKTREE,
            HookEvent::Unknown => category_constants::UNKNOWN,
        }
    }
}

impl Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HookEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEvent::try_from_str(s).ok_or_else(|| format!("Invalid hook event: {s}"))
    }
}

impl TryFrom<&str> for HookEvent {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for HookEvent {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
