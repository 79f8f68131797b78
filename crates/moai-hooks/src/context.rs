//! Shared, read-mostly state handed to every event handler.
//!
//! Built once per process invocation in `main`, then passed by reference
//! through the dispatcher to each handler in the chain. Nothing here is
//! mutated after construction — the engines underneath (`SecurityEngine`,
//! `RegressionTracker`) own their own interior locking for the on-disk state
//! they touch.

use std::path::PathBuf;
use std::sync::Arc;

use moai_hooks_core::config::MaosConfig;
use moai_hooks_core::diagnostics::DiagnosticsCollector;
use moai_hooks_core::metrics::TaskMetricsLog;
use moai_hooks_core::quality::{QualityGate, RegressionTracker};
use moai_hooks_core::security::SecurityEngine;

/// Per-invocation dependencies, assembled once from [`MaosConfig`].
pub struct HandlerContext {
    pub config: Arc<MaosConfig>,
    pub security: Arc<SecurityEngine>,
    pub diagnostics: DiagnosticsCollector,
    pub regression: RegressionTracker,
    pub task_metrics: TaskMetricsLog,
    project_root: PathBuf,
}

impl HandlerContext {
    pub fn new(config: Arc<MaosConfig>) -> Self {
        let project_root = config.project_root();
        let security = if config.security.enable_validation {
            Arc::new(SecurityEngine::new(Some(
                moai_hooks_core::security::SecurityPolicy::defaults(Vec::new(), Vec::new()),
            )))
        } else {
            // A disabled engine still exists so handlers don't need a
            // separate code path; its policy simply has nothing to enforce.
            Arc::new(SecurityEngine::new(None))
        };

        Self {
            diagnostics: DiagnosticsCollector::new(),
            regression: RegressionTracker::new(&project_root),
            task_metrics: TaskMetricsLog::new(&project_root),
            project_root,
            security,
            config,
        }
    }

    pub fn project_root(&self) -> &std::path::Path {
        &self.project_root
    }

    /// Loads the quality gate fresh from `.moai/config/sections/quality.yaml`.
    /// Not cached on the context: `TeammateIdle` is the only caller, so
    /// there's nothing to amortize, and re-reading keeps it honest about
    /// edits made mid-session.
    pub fn load_quality_gate(&self) -> moai_hooks_core::Result<QualityGate> {
        QualityGate::load(&self.project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_security_still_builds_an_engine() {
        let mut config = MaosConfig::default();
        config.security.enable_validation = false;
        let ctx = HandlerContext::new(Arc::new(config));
        assert!(!ctx.config.security.enable_validation);
    }

    #[test]
    fn project_root_matches_config() {
        let mut config = MaosConfig::default();
        config.project_root = Some(PathBuf::from("/workspace/demo"));
        let ctx = HandlerContext::new(Arc::new(config));
        assert_eq!(ctx.project_root(), std::path::Path::new("/workspace/demo"));
    }
}
