//! Test coverage snapshot, read from `.moai/memory/coverage.json`.
//!
//! Coverage is produced out-of-band (the project's own test-coverage
//! tooling writes the file); this module only reads it. A missing file is
//! not an error — a project that has never run coverage tooling simply has
//! no snapshot, and [`TeammateIdleHandler`](crate) callers treat that the
//! same as "below target" without failing the hook.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{COVERAGE_FILE, MEMORY_DIR, MOAI_CONFIG_DIR};
use crate::error::{MaosError, Result};

/// A single coverage measurement, as last written by the project's test
/// tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    pub coverage_percent: f64,
    pub updated_at: DateTime<Utc>,
}

impl CoverageSnapshot {
    /// Reads `.moai/memory/coverage.json` under `project_root`. `Ok(None)`
    /// if the file doesn't exist; a malformed file is a real error, since
    /// its presence means something wrote it and got it wrong.
    pub fn load(project_root: &Path) -> Result<Option<Self>> {
        let path = project_root.join(MOAI_CONFIG_DIR).join(MEMORY_DIR).join(COVERAGE_FILE);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MaosError::Io(e)),
        }
    }

    /// Whether this snapshot meets or exceeds `target_percent`.
    pub fn meets_target(&self, target_percent: f64) -> bool {
        self.coverage_percent >= target_percent
    }
}
