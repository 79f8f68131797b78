//! External command runner: cache-first subprocess execution with a single
//! retry on failure.
//!
//! Backs the result-cache-backed `git` runner and the diagnostics
//! collector's CLI fallback path. A cache hit skips the subprocess
//! entirely; a miss spawns the process, retries once on failure, and caches
//! only a successful result (a failing command is never worth remembering —
//! the failure might be transient or fixed by the caller's next attempt).

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::cache::{generate_cache_key, ResultCache};
use crate::constants::{DEFAULT_CACHE_CAPACITY, EXTERNAL_TOOL_TIMEOUT, RETRY_DELAY};
use crate::error::{MaosError, Result};

/// The outcome of one external command invocation, cached keyed on its
/// fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration_ms: u64,
    pub from_cache: bool,
    pub argv: Vec<String>,
}

/// Runs external commands through a shared [`ResultCache`], fingerprinted on
/// `(operation type, argv, cwd, branch)`.
pub struct CommandRunner {
    cache: ResultCache<CommandOutput>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            cache: ResultCache::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Run `program args...` in `cwd`. `op_type` and `branch` participate in
    /// the cache fingerprint only — they are not passed to the subprocess.
    pub async fn run(
        &self,
        op_type: &str,
        program: &str,
        args: &[String],
        cwd: &Path,
        branch: &str,
    ) -> Result<CommandOutput> {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().cloned());
        let key = generate_cache_key(op_type, &argv, cwd, branch);

        if let Some(mut cached) = self.cache.get(&key) {
            cached.from_cache = true;
            return Ok(cached);
        }

        let mut last_err = None;
        for attempt in 0..2 {
            match Self::execute_once(program, args, cwd).await {
                Ok(mut output) => {
                    output.argv = argv.clone();
                    output.from_cache = false;
                    self.cache.set(key, op_type, output.clone(), None);
                    return Ok(output);
                }
                Err(err) => {
                    last_err = Some(err);
                    if attempt == 0 {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }
        Err(last_err.unwrap_or(MaosError::InvalidInput {
            message: format!("command '{program}' failed with no captured error"),
        }))
    }

    async fn execute_once(program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        let start = Instant::now();
        let spawn = Command::new(program).args(args).current_dir(cwd).output();

        let output = tokio::time::timeout(EXTERNAL_TOOL_TIMEOUT, spawn)
            .await
            .map_err(|_| MaosError::Timeout {
                operation: format!("external command '{program}'"),
                timeout_ms: EXTERNAL_TOOL_TIMEOUT.as_millis() as u64,
            })?
            .map_err(MaosError::Io)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);
        if !output.status.success() {
            return Err(MaosError::InvalidInput {
                message: format!(
                    "command '{program}' exited with status {exit_code}: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code,
            duration_ms,
            from_cache: false,
            argv: Vec::new(),
        })
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
