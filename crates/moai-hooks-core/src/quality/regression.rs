//! Diagnostics baseline persistence and regression comparison.
//!
//! A single versioned document at
//! `<project>/.moai/memory/diagnostics-baseline.json` maps absolute file
//! path to the full list of diagnostics recorded for it at baseline time —
//! not just their severity tally, so a saved baseline can be recovered
//! exactly, message for message. Writes go through write-to-temp-then-rename
//! — the same pattern [`crate::logging::session`] uses for log rotation, so
//! a crash mid-write never leaves a half-written baseline behind, and
//! concurrent writers in the same process are serialized by an in-process
//! mutex rather than relying on rename atomicity alone.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DIAGNOSTICS_BASELINE_FILE, MEMORY_DIR, MOAI_CONFIG_DIR};
use crate::diagnostics::{severity_counts, Diagnostic, SeverityCounts};
use crate::error::{MaosError, Result};

const SCHEMA_VERSION: u32 = 1;

/// The on-disk document shape: schema version, last-updated timestamp, and
/// a path -> diagnostics-list mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BaselineDocument {
    schema_version: u32,
    last_updated: DateTime<Utc>,
    #[serde(default)]
    entries: HashMap<String, Vec<Diagnostic>>,
}

impl Default for BaselineDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            last_updated: Utc::now(),
            entries: HashMap::new(),
        }
    }
}

/// A saved diagnostics snapshot for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Baseline {
    pub fn counts(&self) -> SeverityCounts {
        severity_counts(&self.diagnostics)
    }
}

/// New/fixed counts between a current run and its saved baseline, by
/// message-count delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegressionReport {
    pub new_errors: usize,
    pub fixed_errors: usize,
    pub new_warnings: usize,
    pub fixed_warnings: usize,
}

impl RegressionReport {
    pub fn has_regression(&self) -> bool {
        self.new_errors > 0
    }

    pub fn has_improvement(&self) -> bool {
        self.fixed_errors > 0
    }

    /// Backwards-compatible alias covering both error and warning growth.
    pub fn has_regressed(&self) -> bool {
        self.new_errors > 0 || self.new_warnings > 0
    }
}

fn delta(previous: usize, current: usize) -> (usize, usize) {
    if current > previous {
        (current - previous, 0)
    } else {
        (0, previous - current)
    }
}

/// Reads and writes the project-wide diagnostics baseline at
/// `.moai/memory/diagnostics-baseline.json`.
pub struct RegressionTracker {
    baseline_path: PathBuf,
    write_lock: Mutex<()>,
}

impl RegressionTracker {
    pub fn new(project_root: &Path) -> Self {
        let baseline_path = project_root
            .join(MOAI_CONFIG_DIR)
            .join(MEMORY_DIR)
            .join(DIAGNOSTICS_BASELINE_FILE);
        Self {
            baseline_path,
            write_lock: Mutex::new(()),
        }
    }

    fn read_document(&self) -> Result<BaselineDocument> {
        match fs::read(&self.baseline_path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BaselineDocument::default()),
            Err(e) => Err(MaosError::Io(e)),
        }
    }

    fn write_document(&self, doc: &BaselineDocument) -> Result<()> {
        if let Some(parent) = self.baseline_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_vec_pretty(doc)?;
        let temp_path = self.baseline_path.with_extension("json.tmp");
        fs::write(&temp_path, serialized)?;
        fs::rename(&temp_path, &self.baseline_path)?;
        Ok(())
    }

    /// Overwrites the per-file entry, preserving every other path's baseline.
    pub fn save_baseline(&self, path: &str, diagnostics: Vec<Diagnostic>) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut doc = self.read_document()?;
        doc.entries.insert(path.to_string(), diagnostics);
        doc.last_updated = Utc::now();
        self.write_document(&doc)
    }

    pub fn get_baseline(&self, path: &str) -> Result<Option<Baseline>> {
        let doc = self.read_document()?;
        Ok(doc.entries.get(path).map(|diagnostics| Baseline {
            path: path.to_string(),
            diagnostics: diagnostics.clone(),
        }))
    }

    /// Total severity counts across every recorded path — what
    /// `TeammateIdle` reads before consulting the quality gate.
    pub fn total_counts(&self) -> Result<Option<SeverityCounts>> {
        let doc = self.read_document()?;
        if doc.entries.is_empty() {
            return Ok(None);
        }
        let mut total = SeverityCounts::default();
        for diagnostics in doc.entries.values() {
            let counts = severity_counts(diagnostics);
            total.errors += counts.errors;
            total.warnings += counts.warnings;
            total.information += counts.information;
            total.hints += counts.hints;
        }
        Ok(Some(total))
    }

    pub fn compare_with_baseline(&self, path: &str, current: SeverityCounts) -> Result<RegressionReport> {
        let baseline = self
            .get_baseline(path)?
            .ok_or_else(|| MaosError::BaselineNotFound { path: path.to_string() })?;
        let previous = baseline.counts();

        let (new_errors, fixed_errors) = delta(previous.errors, current.errors);
        let (new_warnings, fixed_warnings) = delta(previous.warnings, current.warnings);

        Ok(RegressionReport {
            new_errors,
            fixed_errors,
            new_warnings,
            fixed_warnings,
        })
    }

    pub fn clear_baseline(&self, path: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut doc = self.read_document()?;
        doc.entries.remove(path);
        doc.last_updated = Utc::now();
        self.write_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn diagnostic(line: u32, severity: Severity, message: &str) -> Diagnostic {
        Diagnostic {
            file: PathBuf::from("src/lib.rs"),
            line,
            column: 1,
            severity,
            message: message.to_string(),
            source: "clippy".to_string(),
        }
    }

    fn diagnostics(errors: usize, warnings: usize) -> Vec<Diagnostic> {
        let mut list = Vec::new();
        for i in 0..errors {
            list.push(diagnostic(i as u32, Severity::Error, "error"));
        }
        for i in 0..warnings {
            list.push(diagnostic((errors + i) as u32, Severity::Warning, "warning"));
        }
        list
    }

    #[test]
    fn round_trips_a_saved_baseline() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        let saved = diagnostics(1, 2);
        tracker.save_baseline("src/lib.rs", saved.clone()).unwrap();

        let baseline = tracker.get_baseline("src/lib.rs").unwrap().unwrap();
        assert_eq!(baseline.path, "src/lib.rs");
        assert_eq!(baseline.diagnostics, saved);
        assert_eq!(baseline.counts().errors, 1);
        assert_eq!(baseline.counts().warnings, 2);
    }

    #[test]
    fn identical_counts_with_different_messages_are_not_conflated() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        let saved = vec![diagnostic(7, Severity::Error, "unused variable `x`")];
        tracker.save_baseline("src/lib.rs", saved.clone()).unwrap();

        let baseline = tracker.get_baseline("src/lib.rs").unwrap().unwrap();
        assert_eq!(baseline.diagnostics, saved);
        assert_ne!(
            baseline.diagnostics,
            vec![diagnostic(7, Severity::Error, "unused variable `y`")]
        );
    }

    #[test]
    fn missing_baseline_is_none_not_an_error() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        assert!(tracker.get_baseline("src/lib.rs").unwrap().is_none());
        assert!(tracker.total_counts().unwrap().is_none());
    }

    #[test]
    fn compare_without_a_baseline_errors() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        let result = tracker.compare_with_baseline("src/lib.rs", SeverityCounts::default());
        assert!(matches!(result, Err(MaosError::BaselineNotFound { .. })));
    }

    #[test]
    fn compare_detects_new_and_fixed_errors() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        tracker.save_baseline("src/lib.rs", diagnostics(1, 2)).unwrap();

        let worse = tracker
            .compare_with_baseline("src/lib.rs", severity_counts(&diagnostics(2, 2)))
            .unwrap();
        assert!(worse.has_regression());
        assert_eq!(worse.new_errors, 1);
        assert_eq!(worse.fixed_errors, 0);

        let better = tracker
            .compare_with_baseline("src/lib.rs", severity_counts(&diagnostics(0, 0)))
            .unwrap();
        assert!(!better.has_regression());
        assert!(better.has_improvement());
        assert_eq!(better.fixed_errors, 1);
    }

    #[test]
    fn clear_baseline_is_idempotent() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        tracker.save_baseline("src/lib.rs", diagnostics(0, 0)).unwrap();
        tracker.clear_baseline("src/lib.rs").unwrap();
        tracker.clear_baseline("src/lib.rs").unwrap();
        assert!(tracker.get_baseline("src/lib.rs").unwrap().is_none());
    }

    #[test]
    fn multiple_paths_coexist_in_one_document() {
        let dir = tempdir().unwrap();
        let tracker = RegressionTracker::new(dir.path());
        tracker.save_baseline("a.rs", diagnostics(1, 0)).unwrap();
        tracker.save_baseline("b.rs", diagnostics(0, 3)).unwrap();

        let total = tracker.total_counts().unwrap().unwrap();
        assert_eq!(total.errors, 1);
        assert_eq!(total.warnings, 3);
        assert!(tracker.get_baseline("a.rs").unwrap().is_some());
        assert!(tracker.get_baseline("b.rs").unwrap().is_some());
    }
}
