//! Wire message formats for hook dispatch.
//!
//! # Example
//!
//! ```no_run
//! use moai_hooks_core::messages::{HookInput, HookResponse};
//! use serde_json::json;
//!
//! let input = json!({
//!     "session_id": "s1",
//!     "cwd": "/tmp",
//!     "hook_event_name": "PreToolUse",
//!     "tool_name": "Edit",
//!     "tool_input": { "file_path": "test.rs" }
//! });
//! let hook_input: HookInput = serde_json::from_value(input)?;
//!
//! let response = HookResponse::allow_for_pre_tool();
//! println!("Exit code: {}", response.to_exit_code());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod hook;

pub use hook::{HookInput, HookResponse, HookSpecificOutput, PermissionDecision};
