//! Per-language language-server lifecycle management.
//!
//! A thin registry keyed by language id, guarded by a reader/writer lock so
//! fan-out operations (`start_all`, `collect_all_diagnostics`) can snapshot
//! the registry, release the lock, and only then call into each client —
//! a slow or wedged server never blocks a registry read.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tokio::process::{Child, Command};
use tokio::sync::{Mutex as AsyncMutex, RwLock};

use super::connection::JsonRpcConnection;
use crate::concurrency::run_with_limit;
use crate::error::{MaosError, Result};

/// Abstracts the command + arguments used to launch a language server for a
/// given language id, so the manager itself stays launcher-agnostic.
pub trait LanguageServerLauncher: Send + Sync {
    fn command_for(&self, language: &str) -> Option<(String, Vec<String>)>;
}

/// A launcher backed by a fixed, caller-supplied table — the common case
/// for a hook-core process that only ever talks to a handful of servers
/// per session.
#[derive(Default)]
pub struct TableLauncher {
    table: HashMap<String, (String, Vec<String>)>,
}

impl TableLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, language: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        self.table.insert(language.into(), (command.into(), args));
        self
    }
}

impl LanguageServerLauncher for TableLauncher {
    fn command_for(&self, language: &str) -> Option<(String, Vec<String>)> {
        self.table.get(language).cloned()
    }
}

/// One running language server: its connection, its owned subprocess
/// handle, and when it was started.
pub struct ManagedServer {
    pub language: String,
    pub connection: JsonRpcConnection,
    child: AsyncMutex<Child>,
    pub started_at: Instant,
}

impl ManagedServer {
    async fn kill(&self) {
        self.connection.close().await;
        let mut child = self.child.lock().await;
        let _ = child.start_kill();
    }
}

/// Registry of running language servers, one per language.
#[derive(Clone)]
pub struct LspServerManager {
    servers: Arc<RwLock<HashMap<String, Arc<ManagedServer>>>>,
    launcher: Arc<dyn LanguageServerLauncher>,
    max_concurrent_startups: usize,
}

impl LspServerManager {
    pub fn new(launcher: Arc<dyn LanguageServerLauncher>, max_concurrent_startups: usize) -> Self {
        Self {
            servers: Arc::new(RwLock::new(HashMap::new())),
            launcher,
            max_concurrent_startups: max_concurrent_startups.max(1),
        }
    }

    /// Start the server for `language` if none is running. Idempotent: a
    /// second concurrent caller that loses the registration race shuts
    /// down its own subprocess rather than leaking it.
    pub async fn start(&self, language: &str, cwd: &Path) -> Result<()> {
        if self.servers.read().await.contains_key(language) {
            return Ok(());
        }

        let (command, args) =
            self.launcher
                .command_for(language)
                .ok_or_else(|| MaosError::ServerStartFailed {
                    language: language.to_string(),
                    reason: "no launcher configured for this language".to_string(),
                })?;

        let mut child = Command::new(&command)
            .args(&args)
            .current_dir(cwd)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MaosError::ServerStartFailed {
                language: language.to_string(),
                reason: e.to_string(),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| MaosError::ServerStartFailed {
            language: language.to_string(),
            reason: "failed to capture subprocess stdin".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| MaosError::ServerStartFailed {
            language: language.to_string(),
            reason: "failed to capture subprocess stdout".to_string(),
        })?;

        let connection = JsonRpcConnection::spawn(stdout, stdin);
        let root_uri = lsp_types::Url::from_file_path(cwd)
            .map(|u| u.to_string())
            .unwrap_or_default();
        connection
            .call(
                "initialize",
                json!({
                    "processId": std::process::id(),
                    "rootUri": root_uri,
                    "capabilities": {},
                }),
            )
            .await
            .map_err(|e| MaosError::ServerStartFailed {
                language: language.to_string(),
                reason: e.to_string(),
            })?;
        connection.notify("initialized", json!({})).await.ok();

        let handle = Arc::new(ManagedServer {
            language: language.to_string(),
            connection,
            child: AsyncMutex::new(child),
            started_at: Instant::now(),
        });

        let mut servers = self.servers.write().await;
        if servers.contains_key(language) {
            drop(servers);
            handle.kill().await;
            return Ok(());
        }
        servers.insert(language.to_string(), Arc::clone(&handle));
        drop(servers);

        self.spawn_crash_watcher(language.to_string(), handle);
        Ok(())
    }

    fn spawn_crash_watcher(&self, language: String, handle: Arc<ManagedServer>) {
        let servers = Arc::clone(&self.servers);
        tokio::spawn(async move {
            let _status = {
                let mut child = handle.child.lock().await;
                child.wait().await
            };
            let mut guard = servers.write().await;
            if let Some(current) = guard.get(&language) {
                if Arc::ptr_eq(current, &handle) {
                    guard.remove(&language);
                }
            }
        });
    }

    /// Stop the server for `language`, if running. Idempotent.
    pub async fn stop(&self, language: &str) -> Result<()> {
        let handle = self.servers.write().await.remove(language);
        if let Some(handle) = handle {
            handle.kill().await;
        }
        Ok(())
    }

    pub async fn stop_all(&self) {
        let languages: Vec<String> = self.servers.read().await.keys().cloned().collect();
        for language in languages {
            let _ = self.stop(&language).await;
        }
    }

    pub async fn get_client(&self, language: &str) -> Option<Arc<ManagedServer>> {
        self.servers.read().await.get(language).cloned()
    }

    /// Running languages, sorted for deterministic output.
    pub async fn active_servers(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.servers.read().await.keys().cloned().collect();
        languages.sort();
        languages
    }

    /// A request/error-code based liveness probe: any response, including a
    /// method/param error, indicates the process is still answering.
    pub async fn health_check(&self, language: &str) -> bool {
        let Some(handle) = self.get_client(language).await else {
            return false;
        };
        match handle
            .connection
            .call("workspace/symbol", json!({"query": ""}))
            .await
        {
            Ok(_) => true,
            Err(MaosError::JsonRpcError { code, .. }) => code == -32601 || code == -32602,
            Err(_) => false,
        }
    }

    /// Start every language in `languages`, at most
    /// `max_concurrent_startups` at a time. Per-language failures are
    /// returned alongside successes rather than aborting the batch.
    pub async fn start_all(&self, languages: Vec<String>, cwd: PathBuf) -> Vec<(String, Result<()>)> {
        let manager = self.clone();
        let items: Vec<(String, PathBuf)> = languages.into_iter().map(|l| (l, cwd.clone())).collect();
        run_with_limit(items, self.max_concurrent_startups, move |(language, cwd)| {
            let manager = manager.clone();
            async move {
                let result = manager.start(&language, &cwd).await;
                (language, result)
            }
        })
        .await
    }

    /// Fan out `textDocument/diagnostic` to every active server for `uri`.
    /// Per-server errors are silently skipped; an empty registry yields an
    /// empty list. The registry snapshot is taken and released before any
    /// client call, so a slow server cannot starve concurrent registry
    /// access.
    pub async fn collect_all_diagnostics(&self, uri: &str) -> Vec<lsp_types::Diagnostic> {
        let snapshot: Vec<Arc<ManagedServer>> = self.servers.read().await.values().cloned().collect();

        let mut all = Vec::new();
        for server in snapshot {
            let result = server
                .connection
                .call(
                    "textDocument/diagnostic",
                    json!({"textDocument": {"uri": uri}}),
                )
                .await;
            let Ok(value) = result else { continue };
            if let Some(items) = value.get("items") {
                if let Ok(diagnostics) =
                    serde_json::from_value::<Vec<lsp_types::Diagnostic>>(items.clone())
                {
                    all.extend(diagnostics);
                }
            }
        }
        all
    }
}
