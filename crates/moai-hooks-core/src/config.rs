//! Configuration for the hook dispatcher and its subsystems.
//!
//! Configuration is read once at process start via [`MaosConfig::load`], which
//! applies defaults and then a small set of environment variable overrides.
//! There is no config file format in the hot path: the host invokes this
//! binary fresh for every hook event, so a layered file+env+CLI loader would
//! just be latency with no payoff. Project-level policy (quality gates,
//! security allow/deny lists) lives under `.moai/config/` and is read by the
//! subsystem that owns it, not aggregated here.
//!
//! # Example
//! ```
//! use moai_hooks_core::config::MaosConfig;
//!
//! let cfg = MaosConfig::default();
//! assert_eq!(cfg.dispatcher.default_timeout_ms, 30_000);
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::logging::{LogFormat, LogLevel, LogOutput, LoggingConfig};

/// Dispatcher-wide timing and routing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Upper bound on end-to-end handler-chain execution, in milliseconds.
    /// The dispatcher takes the minimum of this and any caller-supplied
    /// deadline, never the maximum.
    #[serde(default = "default_dispatcher_timeout_ms")]
    pub default_timeout_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_dispatcher_timeout_ms(),
        }
    }
}

/// Security engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Master switch for the security engine. When disabled every `PreToolUse`
    /// and `PermissionRequest` invocation is allowed unconditionally.
    #[serde(default = "default_true")]
    pub enable_validation: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_validation: default_true(),
        }
    }
}

/// LSP server manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LspConfig {
    /// Maximum number of language servers the manager will start concurrently.
    /// Bounds memory and process-table pressure on a cold session with many
    /// languages in one workspace.
    #[serde(default = "default_lsp_startup_concurrency")]
    pub max_concurrent_startups: usize,
}

impl Default for LspConfig {
    fn default() -> Self {
        Self {
            max_concurrent_startups: default_lsp_startup_concurrency(),
        }
    }
}

/// `SessionStart` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// System message echoed back on every `SessionStart`, if configured.
    /// Absent by default; a nil/unset configuration provider is not an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
}

/// Root configuration aggregate for the hook dispatch binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaosConfig {
    /// Dispatcher timing and routing settings.
    pub dispatcher: DispatcherConfig,

    /// Security engine settings.
    pub security: SecurityConfig,

    /// LSP server manager settings.
    pub lsp: LspConfig,

    /// Logging configuration, shared with the rest of the crate.
    pub logging: LoggingConfig,

    /// `SessionStart` settings.
    pub session: SessionConfig,

    /// Resolved project root: `CLAUDE_PROJECT_DIR` if set, else the
    /// invocation's `cwd`. Populated by [`MaosConfig::load`], not by
    /// `Default`, since resolution needs the incoming invocation's `cwd`.
    #[serde(skip)]
    pub project_root: Option<PathBuf>,
}

impl Default for MaosConfig {
    fn default() -> Self {
        Self {
            dispatcher: DispatcherConfig::default(),
            security: SecurityConfig::default(),
            lsp: LspConfig::default(),
            logging: LoggingConfig {
                level: LogLevel::Info,
                format: LogFormat::Plain,
                output: LogOutput::Stderr,
                enable_performance_logs: false,
                enable_security_logs: true,
                rolling: Default::default(),
            },
            session: SessionConfig::default(),
            project_root: None,
        }
    }
}

impl MaosConfig {
    /// Build the configuration for one invocation: defaults, overridden by
    /// environment variables, with the project root resolved against `cwd`.
    ///
    /// Recognized environment variables:
    /// - `MAOS_LOG_LEVEL` (`trace`|`debug`|`info`|`warn`|`error`)
    /// - `MAOS_LOG_FORMAT` (`json`|`plain`|`pretty`)
    /// - `MAOS_DISABLE_SECURITY` (any non-empty value disables validation)
    /// - `MAOS_DISPATCHER_TIMEOUT_MS`
    /// - `CLAUDE_PROJECT_DIR` (overrides the project root)
    pub fn load(cwd: &std::path::Path) -> Result<Self> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MAOS_LOG_LEVEL") {
            config.logging.level = parse_log_level(&val)?;
        }
        if let Ok(val) = std::env::var("MAOS_LOG_FORMAT") {
            config.logging.format = parse_log_format(&val)?;
        }
        if let Ok(val) = std::env::var("MAOS_DISABLE_SECURITY") {
            if !val.is_empty() {
                config.security.enable_validation = false;
            }
        }
        if let Ok(val) = std::env::var("MAOS_SESSION_WELCOME_MESSAGE") {
            if !val.is_empty() {
                config.session.welcome_message = Some(val);
            }
        }
        if let Ok(val) = std::env::var("MAOS_DISPATCHER_TIMEOUT_MS") {
            config.dispatcher.default_timeout_ms =
                val.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "MAOS_DISPATCHER_TIMEOUT_MS".into(),
                    value: val.clone(),
                    reason: "must be a positive integer".into(),
                })?;
        }

        config.project_root = Some(match std::env::var("CLAUDE_PROJECT_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => cwd.to_path_buf(),
        });

        config.validate()?;
        Ok(config)
    }

    /// Resolved project root, falling back to `.` if [`load`](Self::load) was
    /// never called (e.g. a `Default::default()` built outside a real
    /// invocation).
    pub fn project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn validate(&self) -> Result<()> {
        if self.dispatcher.default_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dispatcher.default_timeout_ms".into(),
                value: "0".into(),
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        if self.lsp.max_concurrent_startups == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lsp.max_concurrent_startups".into(),
                value: "0".into(),
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        Ok(())
    }
}

fn parse_log_level(s: &str) -> Result<LogLevel> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        _ => Err(ConfigError::InvalidValue {
            field: "MAOS_LOG_LEVEL".into(),
            value: s.into(),
            reason: "must be one of: trace, debug, info, warn, error".into(),
        }
        .into()),
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat> {
    match s.to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "plain" => Ok(LogFormat::Plain),
        "pretty" => Ok(LogFormat::Pretty),
        _ => Err(ConfigError::InvalidValue {
            field: "MAOS_LOG_FORMAT".into(),
            value: s.into(),
            reason: "must be one of: json, plain, pretty".into(),
        }
        .into()),
    }
}

fn default_dispatcher_timeout_ms() -> u64 {
    30_000
}

fn default_lsp_startup_concurrency() -> usize {
    4
}

fn default_true() -> bool {
    true
}
