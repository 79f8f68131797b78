//! Configurable pass/fail gate over a diagnostics run.
//!
//! Thresholds live in `.moai/config/sections/quality.yaml`, the same
//! project-policy location the security engine reads its own section from
//! (see [`crate::constants::CONFIG_SECTIONS_DIR`]). Missing or unreadable
//! config is not an error: the gate falls back to permissive defaults, the
//! same shape [`crate::config::MaosConfig`] uses for its own env-var
//! overrides.
//!
//! The on-disk shape mirrors the host's own policy document —
//! `constitution.lsp_quality_gates.{enabled,run.max_errors,sync.max_warnings}`
//! plus `constitution.test_coverage_target` — and is flattened into
//! [`QualityThresholds`] on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_SECTIONS_DIR, MOAI_CONFIG_DIR, QUALITY_POLICY_FILE};
use crate::diagnostics::SeverityCounts;
use crate::error::{ConfigError, Result};

/// Severity-count ceilings a diagnostics run must stay within, flattened
/// from the host's nested `quality.yaml` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Master switch for team-mode quality gates
    /// (`constitution.lsp_quality_gates.enabled`).
    pub enabled: bool,
    pub max_errors: usize,
    pub max_warnings: usize,
    /// Block when `errors > max_errors`. Not configurable via
    /// `quality.yaml` — the host's own default is "always block on error".
    pub block_on_error: bool,
    /// Block when `warnings > max_warnings`. Not configurable via
    /// `quality.yaml` — the host's own default is "never block on warning".
    pub block_on_warning: bool,
    /// Minimum acceptable coverage percentage
    /// (`constitution.test_coverage_target`).
    pub test_coverage_target: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            enabled: true,
            max_errors: 0,
            max_warnings: 10,
            block_on_error: true,
            block_on_warning: false,
            test_coverage_target: crate::constants::DEFAULT_COVERAGE_TARGET,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawQualityConfig {
    constitution: RawConstitution,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConstitution {
    lsp_quality_gates: RawGates,
    test_coverage_target: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGates {
    enabled: Option<bool>,
    run: RawRun,
    sync: RawSync,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRun {
    max_errors: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSync {
    max_warnings: Option<usize>,
}

impl From<RawQualityConfig> for QualityThresholds {
    fn from(raw: RawQualityConfig) -> Self {
        let defaults = QualityThresholds::default();
        Self {
            enabled: raw.constitution.lsp_quality_gates.enabled.unwrap_or(defaults.enabled),
            max_errors: raw.constitution.lsp_quality_gates.run.max_errors.unwrap_or(defaults.max_errors),
            max_warnings: raw.constitution.lsp_quality_gates.sync.max_warnings.unwrap_or(defaults.max_warnings),
            block_on_error: defaults.block_on_error,
            block_on_warning: defaults.block_on_warning,
            test_coverage_target: raw.constitution.test_coverage_target.unwrap_or(defaults.test_coverage_target),
        }
    }
}

/// Evaluates [`SeverityCounts`] against configured thresholds.
pub struct QualityGate {
    thresholds: QualityThresholds,
}

impl QualityGate {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    /// Loads `.moai/config/sections/quality.yaml` under `project_root`. A
    /// missing file yields the permissive default; a present-but-malformed
    /// file is the only case that actually errors out, since a typo'd
    /// threshold silently becoming "no gate at all" would be worse than
    /// failing loud.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root
            .join(MOAI_CONFIG_DIR)
            .join(CONFIG_SECTIONS_DIR)
            .join(QUALITY_POLICY_FILE);

        let thresholds = match fs::read_to_string(&path) {
            Ok(contents) => {
                let raw: RawQualityConfig = serde_yaml::from_str(&contents).map_err(|e| ConfigError::InvalidFormat {
                    reason: format!("{}: {e}", path.display()),
                })?;
                raw.into()
            }
            Err(_) => QualityThresholds::default(),
        };

        Ok(Self::new(thresholds))
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Does this diagnostics run exceed the configured thresholds?
    pub fn should_block(&self, counts: SeverityCounts) -> bool {
        (self.thresholds.block_on_error && counts.errors > self.thresholds.max_errors)
            || (self.thresholds.block_on_warning && counts.warnings > self.thresholds.max_warnings)
    }

    /// `2` (the hook host's generic blocking exit code) when blocking,
    /// `0` otherwise.
    pub fn exit_code(&self, counts: SeverityCounts) -> i32 {
        if self.should_block(counts) {
            2
        } else {
            0
        }
    }
}
