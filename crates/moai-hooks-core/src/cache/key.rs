//! Deterministic cache fingerprint generation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Fingerprint an external operation's identity: its type, argument vector,
/// working directory, and current branch. Deterministic for a given input —
/// differs if any component differs. `DefaultHasher` (SipHash with a fixed
/// key) rather than `RandomState` is used deliberately, since the cache key
/// must be stable across calls within a process, not merely within a single
/// `HashMap`.
pub fn generate_cache_key(op_type: &str, args: &[String], cwd: &Path, branch: &str) -> String {
    let mut hasher = DefaultHasher::new();
    op_type.hash(&mut hasher);
    args.hash(&mut hasher);
    cwd.hash(&mut hasher);
    branch.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
