//! CLI fallback tool table and PATH-availability caching.
//!
//! Each entry maps a file extension to the linter/compiler invoked when no
//! language server is available, plus the parser that turns its output into
//! [`super::Diagnostic`]s. Availability is resolved once per process via
//! `which` and cached — repeatedly probing `PATH` for the same tool across
//! a session's many diagnostics requests would be wasted syscalls.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;

use super::parsers::OutputFormat;

/// A CLI diagnostics tool: how to invoke it and how to read its output.
pub struct CliTool {
    pub binary: &'static str,
    pub args: &'static [&'static str],
    pub format: OutputFormat,
    /// Whether the target file path should be appended as a final argument.
    pub accepts_file_arg: bool,
}

/// CLI fallback table, keyed by file extension (without the leading dot).
pub fn tool_for_extension(extension: &str) -> Option<CliTool> {
    match extension {
        "py" => Some(CliTool {
            binary: "ruff",
            args: &["check", "--output-format", "json"],
            format: OutputFormat::RuffJson,
            accepts_file_arg: true,
        }),
        "ts" | "tsx" => Some(CliTool {
            binary: "tsc",
            args: &["--noEmit", "--pretty", "false"],
            format: OutputFormat::TscLines,
            accepts_file_arg: true,
        }),
        "js" | "jsx" => Some(CliTool {
            binary: "eslint",
            args: &["--format", "json"],
            format: OutputFormat::EslintJson,
            accepts_file_arg: true,
        }),
        "go" => Some(CliTool {
            binary: "go",
            args: &["vet"],
            format: OutputFormat::GoVetLines,
            accepts_file_arg: true,
        }),
        "rs" => Some(CliTool {
            binary: "cargo",
            args: &["clippy", "--message-format", "json", "--"],
            format: OutputFormat::CargoClippyJson,
            accepts_file_arg: true,
        }),
        _ => None,
    }
}

static AVAILABILITY_CACHE: Mutex<Option<HashMap<String, bool>>> = Mutex::new(None);

/// Is `binary` on `PATH`? Cached for the lifetime of the process.
pub fn is_tool_available(binary: &str) -> bool {
    let mut guard = AVAILABILITY_CACHE.lock();
    let cache = guard.get_or_insert_with(HashMap::new);
    if let Some(available) = cache.get(binary) {
        return *available;
    }
    let available = which::which(binary).is_ok();
    cache.insert(binary.to_string(), available);
    available
}

/// Extension of `path`, lowercased, without the leading dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
}
