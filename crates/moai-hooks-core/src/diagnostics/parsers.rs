//! Output parsers for the CLI fallback tools in [`super::tools`].
//!
//! Each parser is lossy by design: a line or object it can't make sense of
//! is skipped rather than failing the whole batch, since a partially-parsed
//! diagnostics run is still more useful than none.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{Diagnostic, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    RuffJson,
    TscLines,
    EslintJson,
    GoVetLines,
    CargoClippyJson,
}

pub fn parse(format: OutputFormat, stdout: &str) -> Vec<Diagnostic> {
    match format {
        OutputFormat::RuffJson => parse_ruff_json(stdout),
        OutputFormat::TscLines => parse_tsc_lines(stdout),
        OutputFormat::EslintJson => parse_eslint_json(stdout),
        OutputFormat::GoVetLines => parse_go_vet_lines(stdout),
        OutputFormat::CargoClippyJson => parse_cargo_clippy_json(stdout),
    }
}

#[derive(Deserialize)]
struct RuffLocation {
    row: u32,
    column: u32,
}

#[derive(Deserialize)]
struct RuffEntry {
    filename: String,
    location: RuffLocation,
    message: String,
    code: Option<String>,
}

fn parse_ruff_json(stdout: &str) -> Vec<Diagnostic> {
    let entries: Vec<RuffEntry> = match serde_json::from_str(stdout) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    entries
        .into_iter()
        .map(|entry| Diagnostic {
            file: PathBuf::from(entry.filename),
            line: entry.location.row,
            column: entry.location.column,
            severity: Severity::Warning,
            message: match entry.code {
                Some(code) => format!("{code}: {}", entry.message),
                None => entry.message,
            },
            source: "ruff".to_string(),
        })
        .collect()
}

static TSC_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<file>[^()]+)\((?P<line>\d+),(?P<column>\d+)\): (?P<level>error|warning) (?P<code>TS\d+): (?P<message>.+)$").unwrap()
});

fn parse_tsc_lines(stdout: &str) -> Vec<Diagnostic> {
    stdout
        .lines()
        .filter_map(|line| {
            let caps = TSC_LINE.captures(line)?;
            Some(Diagnostic {
                file: PathBuf::from(&caps["file"]),
                line: caps["line"].parse().ok()?,
                column: caps["column"].parse().ok()?,
                severity: if &caps["level"] == "error" {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                message: format!("{}: {}", &caps["code"], &caps["message"]),
                source: "tsc".to_string(),
            })
        })
        .collect()
}

#[derive(Deserialize)]
struct EslintMessage {
    line: u32,
    column: u32,
    severity: u8,
    message: String,
    #[serde(rename = "ruleId")]
    rule_id: Option<String>,
}

#[derive(Deserialize)]
struct EslintFileResult {
    #[serde(rename = "filePath")]
    file_path: String,
    messages: Vec<EslintMessage>,
}

fn parse_eslint_json(stdout: &str) -> Vec<Diagnostic> {
    let results: Vec<EslintFileResult> = match serde_json::from_str(stdout) {
        Ok(results) => results,
        Err(_) => return Vec::new(),
    };
    results
        .into_iter()
        .flat_map(|file| {
            let file_path = file.file_path;
            file.messages.into_iter().map(move |m| Diagnostic {
                file: PathBuf::from(&file_path),
                line: m.line,
                column: m.column,
                severity: if m.severity >= 2 { Severity::Error } else { Severity::Warning },
                message: match m.rule_id {
                    Some(rule) => format!("{rule}: {}", m.message),
                    None => m.message,
                },
                source: "eslint".to_string(),
            })
        })
        .collect()
}

static GO_VET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<file>[^:]+):(?P<line>\d+):(?P<column>\d+): (?P<message>.+)$").unwrap());

fn parse_go_vet_lines(stdout: &str) -> Vec<Diagnostic> {
    stdout
        .lines()
        .filter_map(|line| {
            let caps = GO_VET_LINE.captures(line)?;
            Some(Diagnostic {
                file: PathBuf::from(&caps["file"]),
                line: caps["line"].parse().ok()?,
                column: caps["column"].parse().ok()?,
                severity: Severity::Warning,
                message: caps["message"].to_string(),
                source: "go vet".to_string(),
            })
        })
        .collect()
}

#[derive(Deserialize)]
struct ClippySpan {
    file_name: String,
    line_start: u32,
    column_start: u32,
    is_primary: bool,
}

#[derive(Deserialize)]
struct ClippyMessage {
    level: String,
    message: String,
    spans: Vec<ClippySpan>,
}

#[derive(Deserialize)]
struct ClippyRecord {
    reason: String,
    message: Option<ClippyMessage>,
}

fn parse_cargo_clippy_json(stdout: &str) -> Vec<Diagnostic> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<ClippyRecord>(line).ok())
        .filter(|record| record.reason == "compiler-message")
        .filter_map(|record| record.message)
        .filter_map(|message| {
            let span = message.spans.iter().find(|s| s.is_primary)?;
            Some(Diagnostic {
                file: PathBuf::from(&span.file_name),
                line: span.line_start,
                column: span.column_start,
                severity: match message.level.as_str() {
                    "error" | "error: internal compiler error" => Severity::Error,
                    "note" | "help" => Severity::Information,
                    _ => Severity::Warning,
                },
                message: message.message,
                source: "clippy".to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ruff_json_array() {
        let stdout = r#"[{"filename":"a.py","location":{"row":3,"column":1},"message":"unused import","code":"F401"}]"#;
        let diagnostics = parse(OutputFormat::RuffJson, stdout);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(diagnostics[0].source, "ruff");
    }

    #[test]
    fn parses_tsc_error_line() {
        let stdout = "src/index.ts(10,5): error TS2345: Argument of type 'string' is not assignable.";
        let diagnostics = parse(OutputFormat::TscLines, stdout);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].line, 10);
    }

    #[test]
    fn parses_eslint_json_with_severities() {
        let stdout = r#"[{"filePath":"a.js","messages":[{"line":1,"column":2,"severity":2,"message":"no-unused-vars","ruleId":"no-unused-vars"}]}]"#;
        let diagnostics = parse(OutputFormat::EslintJson, stdout);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn parses_go_vet_line() {
        let stdout = "main.go:7:2: composite literal uses unkeyed fields";
        let diagnostics = parse(OutputFormat::GoVetLines, stdout);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].file, PathBuf::from("main.go"));
    }

    #[test]
    fn parses_clippy_compiler_messages_and_skips_other_reasons() {
        let stdout = [
            r#"{"reason":"compiler-artifact"}"#,
            r#"{"reason":"compiler-message","message":{"level":"warning","message":"unused variable","spans":[{"file_name":"src/lib.rs","line_start":4,"column_start":9,"is_primary":true}]}}"#,
        ]
        .join("\n");
        let diagnostics = parse(OutputFormat::CargoClippyJson, &stdout);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn malformed_json_yields_empty_list_rather_than_panicking() {
        assert!(parse(OutputFormat::RuffJson, "not json").is_empty());
        assert!(parse(OutputFormat::EslintJson, "{}").is_empty());
    }
}
