//! Integration tests for the hook-dispatch configuration aggregate.

use moai_hooks_core::config::MaosConfig;
use moai_hooks_core::error::Result;
use moai_hooks_core::logging::{LogFormat, LogLevel, LogOutput};
use std::path::PathBuf;

fn clear_env() {
    unsafe {
        std::env::remove_var("MAOS_LOG_LEVEL");
        std::env::remove_var("MAOS_LOG_FORMAT");
        std::env::remove_var("MAOS_DISABLE_SECURITY");
        std::env::remove_var("MAOS_SESSION_WELCOME_MESSAGE");
        std::env::remove_var("MAOS_DISPATCHER_TIMEOUT_MS");
        std::env::remove_var("CLAUDE_PROJECT_DIR");
    }
}

#[test]
fn defaults_match_spec_values() -> Result<()> {
    clear_env();
    let cfg = MaosConfig::default();

    assert_eq!(cfg.dispatcher.default_timeout_ms, 30_000);
    assert!(cfg.security.enable_validation);
    assert_eq!(cfg.lsp.max_concurrent_startups, 4);
    assert_eq!(cfg.logging.level, LogLevel::Info);
    assert_eq!(cfg.logging.format, LogFormat::Plain);
    assert_eq!(cfg.logging.output, LogOutput::Stderr);
    assert!(cfg.session.welcome_message.is_none());
    assert!(cfg.project_root.is_none());
    cfg.validate()?;
    Ok(())
}

#[test]
fn load_resolves_project_root_from_claude_project_dir_env() {
    clear_env();
    unsafe {
        std::env::set_var("CLAUDE_PROJECT_DIR", "/override/project");
    }
    let cfg = MaosConfig::load(&PathBuf::from("/tmp/cwd")).unwrap();
    assert_eq!(cfg.project_root(), PathBuf::from("/override/project"));
    clear_env();
}

#[test]
fn load_falls_back_to_cwd_without_claude_project_dir() {
    clear_env();
    let cwd = PathBuf::from("/workspace/demo");
    let cfg = MaosConfig::load(&cwd).unwrap();
    assert_eq!(cfg.project_root(), cwd);
}

#[test]
fn load_applies_log_level_and_format_overrides() {
    clear_env();
    unsafe {
        std::env::set_var("MAOS_LOG_LEVEL", "debug");
        std::env::set_var("MAOS_LOG_FORMAT", "json");
    }
    let cfg = MaosConfig::load(&PathBuf::from("/tmp")).unwrap();
    assert_eq!(cfg.logging.level, LogLevel::Debug);
    assert_eq!(cfg.logging.format, LogFormat::Json);
    clear_env();
}

#[test]
fn load_disables_security_when_env_var_set() {
    clear_env();
    unsafe {
        std::env::set_var("MAOS_DISABLE_SECURITY", "1");
    }
    let cfg = MaosConfig::load(&PathBuf::from("/tmp")).unwrap();
    assert!(!cfg.security.enable_validation);
    clear_env();
}

#[test]
fn load_rejects_unparseable_timeout_override() {
    clear_env();
    unsafe {
        std::env::set_var("MAOS_DISPATCHER_TIMEOUT_MS", "not-a-number");
    }
    let result = MaosConfig::load(&PathBuf::from("/tmp"));
    clear_env();
    assert!(result.is_err());
}

#[test]
fn validate_rejects_zero_timeout() {
    let mut cfg = MaosConfig::default();
    cfg.dispatcher.default_timeout_ms = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_zero_lsp_concurrency() {
    let mut cfg = MaosConfig::default();
    cfg.lsp.max_concurrent_startups = 0;
    assert!(cfg.validate().is_err());
}
