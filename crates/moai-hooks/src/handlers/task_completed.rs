//! `TaskCompleted`: in team mode, a task whose subject names a spec id
//! (`SPEC-<UPPER>-<digits>`) must have every acceptance criterion checked
//! off before the task is allowed to close.

use once_cell::sync::Lazy;
use regex::Regex;

use moai_hooks_core::constants::{MOAI_CONFIG_DIR, SPECS_DIR, SPEC_FILE_NAME};
use moai_hooks_core::messages::{HookInput, HookResponse};
use moai_hooks_core::Result;

use crate::context::HandlerContext;
use crate::handlers::EventHandler;

static SPEC_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"SPEC-[A-Z]+-\d+").unwrap());

pub struct TaskCompletedHandler;

#[async_trait::async_trait]
impl EventHandler for TaskCompletedHandler {
    async fn handle(&self, ctx: &HandlerContext, input: &HookInput) -> Result<HookResponse> {
        if !input.is_team_mode() {
            return Ok(HookResponse::empty());
        }

        let Some(spec_id) = input
            .task_subject
            .as_deref()
            .and_then(|subject| SPEC_ID_PATTERN.find(subject))
            .map(|m| m.as_str().to_string())
        else {
            return Ok(HookResponse::empty());
        };

        let spec_path = ctx
            .project_root()
            .join(MOAI_CONFIG_DIR)
            .join(SPECS_DIR)
            .join(&spec_id)
            .join(SPEC_FILE_NAME);

        let Ok(contents) = std::fs::read_to_string(&spec_path) else {
            eprintln!("Spec not found for {spec_id}: {}", spec_path.display());
            return Ok(HookResponse::reject_task_completion());
        };

        let unchecked = unchecked_acceptance_criteria(&contents);
        if !unchecked.is_empty() {
            eprintln!("Task references {spec_id} but its acceptance criteria are incomplete:");
            for item in &unchecked {
                eprintln!("  - [ ] {item}");
            }
            return Ok(HookResponse::reject_task_completion());
        }

        Ok(HookResponse::empty())
    }
}

/// Collects unchecked (`- [ ]`) items from spec's "## Acceptance Criteria"
/// section (case-insensitive), stopping at the next `##` heading.
fn unchecked_acceptance_criteria(spec_contents: &str) -> Vec<String> {
    let mut in_section = false;
    let mut items = Vec::new();

    for line in spec_contents.lines() {
        let trimmed = line.trim();
        if let Some(heading) = trimmed.strip_prefix("## ") {
            if in_section {
                break;
            }
            in_section = heading.trim().eq_ignore_ascii_case("acceptance criteria");
            continue;
        }
        if in_section {
            if let Some(item) = trimmed.strip_prefix("- [ ]") {
                items.push(item.trim().to_string());
            }
        }
    }
    items
}
