//! Session-lifecycle cleanup, run best-effort from `SessionEnd`.
//!
//! Every step here is advisory: a failure is logged and swallowed, never
//! surfaced to the host, since none of it is on the critical path of
//! answering the hook invocation.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

/// Team directories older than this are GC'd regardless of ownership.
const STALE_TEAM_DIR_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Overall time budget for the tmux orphan sweep.
const TMUX_SWEEP_BUDGET: Duration = Duration::from_secs(4);

/// Only tmux sessions with this prefix are considered ours to kill.
const OWNED_SESSION_PREFIX: &str = "moai-";

/// Environment variables team-mode sets on the lead session's tmux
/// environment, cleared on session end so the session reverts to its
/// default model.
const TEAM_ENV_VARS: &[&str] = &["MOAI_TEAM_NAME", "MOAI_TEAMMATE_NAME", "MOAI_TEAM_LEAD_SESSION"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamConfig {
    #[serde(default)]
    lead_session_id: Option<String>,
}

/// Runs every cleanup step for an ending session. Each step's own errors
/// are logged internally; this function itself never returns an error.
pub async fn run_session_end_cleanup(session_id: &str) {
    if let Some(home) = dirs::home_dir() {
        let teams_root = home.join(".claude").join("teams");
        remove_lead_team_directories(&teams_root, session_id);
        remove_stale_team_directories(&teams_root);
    } else {
        tracing::debug!("no home directory available, skipping team directory cleanup");
    }

    if std::env::var_os("TMUX").is_some() {
        sweep_orphaned_tmux_sessions().await;
        clear_team_environment().await;
    }
}

fn remove_lead_team_directories(teams_root: &Path, session_id: &str) {
    let Ok(entries) = std::fs::read_dir(teams_root) else {
        return;
    };
    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let config_path = dir.join("config.json");
        let Ok(contents) = std::fs::read_to_string(&config_path) else {
            continue;
        };
        let Ok(config) = serde_json::from_str::<TeamConfig>(&contents) else {
            continue;
        };
        if config.lead_session_id.as_deref() == Some(session_id) {
            if let Err(err) = std::fs::remove_dir_all(&dir) {
                tracing::warn!(%err, dir = %dir.display(), "failed to remove ended lead session's team directory");
            }
        }
    }
}

fn remove_stale_team_directories(teams_root: &Path) {
    let Ok(entries) = std::fs::read_dir(teams_root) else {
        return;
    };
    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let Ok(age) = modified.elapsed() else {
            continue;
        };
        if age > STALE_TEAM_DIR_AGE {
            if let Err(err) = std::fs::remove_dir_all(&dir) {
                tracing::warn!(%err, dir = %dir.display(), "failed to remove stale team directory");
            }
        }
    }
}

async fn sweep_orphaned_tmux_sessions() {
    let deadline = tokio::time::Instant::now() + TMUX_SWEEP_BUDGET;

    let list = tokio::time::timeout_at(
        deadline,
        Command::new("tmux")
            .args(["list-sessions", "-F", "#{session_name}:#{session_attached}"])
            .output(),
    )
    .await;

    let Ok(Ok(output)) = list else {
        return;
    };
    if !output.status.success() {
        return;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if tokio::time::Instant::now() >= deadline {
            break;
        }
        let Some((name, attached)) = line.rsplit_once(':') else {
            continue;
        };
        if attached.trim() == "1" || !name.starts_with(OWNED_SESSION_PREFIX) {
            continue;
        }

        let kill = tokio::time::timeout_at(
            deadline,
            Command::new("tmux").args(["kill-session", "-t", name]).output(),
        )
        .await;
        if let Ok(Err(err)) = kill {
            tracing::warn!(%err, session = name, "failed to kill orphaned tmux session");
        }
    }
}

async fn clear_team_environment() {
    for var in TEAM_ENV_VARS {
        if let Err(err) = Command::new("tmux").args(["set-environment", "-u", var]).output().await {
            tracing::warn!(%err, var, "failed to clear tmux team environment variable");
        }
    }
}
