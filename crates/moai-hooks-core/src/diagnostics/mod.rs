//! Diagnostics collection: LSP-first, CLI-fallback-by-extension.
//!
//! A language server already running for a file's language is asked first
//! (`textDocument/diagnostic`, already wired up by
//! [`crate::lsp::LspServerManager::collect_all_diagnostics`]); if none is
//! running, or it returns nothing, a per-extension CLI linter is tried
//! instead. Both paths are lossy in the same direction: no server, no
//! available tool, or unparsable output all collapse to an empty list
//! rather than an error, since "nothing to report" and "couldn't check"
//! are indistinguishable to a caller that only wants a gate to pass or
//! fail.

mod parsers;
mod tools;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::constants::EXTERNAL_TOOL_TIMEOUT;
use crate::lsp::LspServerManager;

/// The four-valued severity the wire format and quality gate reason about,
/// collapsed from whichever scale the originating tool used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hint,
    Information,
    Warning,
    Error,
}

/// One diagnostic, normalized from either an LSP server or a CLI tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: std::path::PathBuf,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
    pub source: String,
}

impl Diagnostic {
    fn from_lsp(file: &Path, diagnostic: lsp_types::Diagnostic) -> Self {
        Self {
            file: file.to_path_buf(),
            line: diagnostic.range.start.line,
            column: diagnostic.range.start.character,
            severity: match diagnostic.severity {
                Some(lsp_types::DiagnosticSeverity::ERROR) => Severity::Error,
                Some(lsp_types::DiagnosticSeverity::WARNING) => Severity::Warning,
                Some(lsp_types::DiagnosticSeverity::HINT) => Severity::Hint,
                _ => Severity::Information,
            },
            message: diagnostic.message,
            source: diagnostic.source.unwrap_or_else(|| "lsp".to_string()),
        }
    }
}

/// Counts of diagnostics per severity, used by the quality gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub information: usize,
    pub hints: usize,
}

pub fn severity_counts(diagnostics: &[Diagnostic]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Error => counts.errors += 1,
            Severity::Warning => counts.warnings += 1,
            Severity::Information => counts.information += 1,
            Severity::Hint => counts.hints += 1,
        }
    }
    counts
}

/// Collects diagnostics for a single file.
#[derive(Default)]
pub struct DiagnosticsCollector;

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self
    }

    /// LSP-first, CLI-fallback. `language` selects which running server (if
    /// any) to ask; `lsp` may be omitted entirely (e.g. from a context with
    /// no server manager wired up), in which case the CLI path runs
    /// unconditionally.
    pub async fn collect(
        &self,
        file: &Path,
        cwd: &Path,
        language: Option<&str>,
        lsp: Option<&LspServerManager>,
    ) -> Vec<Diagnostic> {
        if let (Some(language), Some(lsp)) = (language, lsp) {
            if lsp.get_client(language).await.is_some() {
                if let Ok(uri) = lsp_types::Url::from_file_path(file) {
                    let lsp_diagnostics = lsp.collect_all_diagnostics(uri.as_str()).await;
                    if !lsp_diagnostics.is_empty() {
                        return lsp_diagnostics
                            .into_iter()
                            .map(|d| Diagnostic::from_lsp(file, d))
                            .collect();
                    }
                }
            }
        }

        self.collect_via_cli(file, cwd).await
    }

    async fn collect_via_cli(&self, file: &Path, cwd: &Path) -> Vec<Diagnostic> {
        let Some(extension) = tools::extension_of(file) else {
            return Vec::new();
        };
        let Some(tool) = tools::tool_for_extension(&extension) else {
            return Vec::new();
        };
        if !tools::is_tool_available(tool.binary) {
            return Vec::new();
        }

        let mut args: Vec<String> = tool.args.iter().map(|a| a.to_string()).collect();
        if tool.accepts_file_arg {
            args.push(file.to_string_lossy().to_string());
        }

        let Some(stdout) = run_tool(tool.binary, &args, cwd).await else {
            return Vec::new();
        };
        parsers::parse(tool.format, &stdout)
    }
}

/// Runs a CLI tool with a hard deadline, ignoring its exit status — a
/// linter's nonzero exit commonly just means "found issues", not "failed
/// to run".
async fn run_tool(binary: &str, args: &[String], cwd: &Path) -> Option<String> {
    let spawn = Command::new(binary).args(args).current_dir(cwd).output();
    let output = tokio::time::timeout(EXTERNAL_TOOL_TIMEOUT, spawn).await.ok()?.ok()?;
    Some(String::from_utf8_lossy(&output.stdout).to_string())
}
