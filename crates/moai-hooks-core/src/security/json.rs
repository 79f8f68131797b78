//! JSON structure validation for DoS protection

use crate::error::{MaosError, Result, SecurityError};

/// Validate JSON structure for DoS protection
///
/// # Security
///
/// Prevents JSON bomb attacks by enforcing size and depth limits. Protects against:
/// - Large payloads causing memory exhaustion
/// - Deeply nested structures causing stack overflow
/// - Malformed JSON causing parser abuse
///
/// # Parameters
///
/// * `json_bytes` - Raw JSON bytes to validate
/// * `max_depth` - Maximum allowed nesting depth (typically 10-100)
/// * `max_size` - Maximum allowed size in bytes (typically 1-10MB)
///
/// # Examples
///
/// ```rust
/// use moai_hooks_core::security::json::validate_json_structure;
///
/// let safe_json = br#"{"level1": {"level2": "value"}}"#;
/// assert!(validate_json_structure(safe_json, 5, 1024).is_ok());
///
/// let deep_json = br#"{"a":{"b":{"c":{"d":{"e":"deep"}}}}}"#;
/// assert!(validate_json_structure(deep_json, 3, 1024).is_err()); // Too deep
/// ```
///
/// # Errors
///
/// Returns [`MaosError::Security`] if JSON structure violates safety policies.
pub fn validate_json_structure(json_bytes: &[u8], max_depth: u32, max_size: usize) -> Result<()> {
    // Size check
    if json_bytes.len() > max_size {
        return Err(MaosError::Security(SecurityError::PolicyViolation {
            policy: format!("JSON size {} exceeds limit {}", json_bytes.len(), max_size),
        }));
    }

    // Depth check
    let depth = calculate_json_depth(json_bytes)?;
    if depth > max_depth {
        return Err(MaosError::Security(SecurityError::PolicyViolation {
            policy: format!("JSON nesting depth {depth} exceeds maximum {max_depth}"),
        }));
    }

    Ok(())
}

/// Calculate JSON nesting depth efficiently
///
/// Fast single-pass parser that tracks brace/bracket nesting without full JSON parsing.
/// Properly handles string escaping to avoid false positives from quoted braces.
///
/// # Implementation Notes
///
/// - Tracks `{` and `[` for depth increases
/// - Tracks `}` and `]` for depth decreases  
/// - Ignores braces/brackets inside quoted strings
/// - Handles escape sequences properly (`\"`, `\\`, etc.)
///
/// # Returns
///
/// Maximum nesting depth found in the JSON structure.
fn calculate_json_depth(json_bytes: &[u8]) -> Result<u32> {
    let mut depth: u32 = 0;
    let mut max_depth: u32 = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for &byte in json_bytes {
        if escape_next {
            escape_next = false;
            continue;
        }

        match byte {
            b'"' if !escape_next => in_string = !in_string,
            b'\\' if in_string => escape_next = true,
            b'{' | b'[' if !in_string => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b'}' | b']' if !in_string => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    Ok(max_depth)
}
