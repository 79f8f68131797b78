//! Reads one [`HookInput`] from a byte source and writes one [`HookResponse`]
//! to a byte sink.
//!
//! The reader and writer are generic over `tokio::io::AsyncRead`/`AsyncWrite`
//! rather than tied to `Stdin`/`Stdout` directly, so tests can drive them
//! with an in-memory buffer instead of real process streams.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::constants::MAX_INPUT_SIZE_BYTES;
use crate::error::{MaosError, Result};
use crate::messages::{HookInput, HookResponse};
use crate::security::validate_json_structure;

/// Maximum nesting depth a hook invocation's JSON is allowed to reach.
/// Generous for real tool payloads, tight enough to reject adversarial
/// deeply-nested input before it reaches `serde_json`.
const MAX_JSON_DEPTH: u32 = 64;

/// Reads the entire byte source to EOF and parses it as a [`HookInput`].
///
/// Fails with [`MaosError::InvalidInput`] on empty input, malformed JSON, or
/// a JSON object missing a required field (`session_id`, `cwd`,
/// `hook_event_name`). Fails the same way if the payload exceeds
/// [`MAX_INPUT_SIZE_BYTES`] or [`MAX_JSON_DEPTH`], since those are host bugs
/// or adversarial input either way — there's no partial-success case worth
/// distinguishing for a single-shot CLI invocation.
pub async fn read_hook_input<R>(source: &mut R) -> Result<HookInput>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(4096);
    let mut limited = source.take(MAX_INPUT_SIZE_BYTES as u64 + 1);
    limited.read_to_end(&mut buf).await.map_err(|e| {
        MaosError::InvalidInput {
            message: format!("failed to read hook payload: {e}"),
        }
    })?;

    if buf.is_empty() {
        return Err(MaosError::InvalidInput {
            message: "empty hook payload".to_string(),
        });
    }
    if buf.len() > MAX_INPUT_SIZE_BYTES {
        return Err(MaosError::InvalidInput {
            message: format!(
                "hook payload of {} bytes exceeds the {} byte limit",
                buf.len(),
                MAX_INPUT_SIZE_BYTES
            ),
        });
    }

    validate_json_structure(&buf, MAX_JSON_DEPTH, MAX_INPUT_SIZE_BYTES).map_err(|e| {
        MaosError::InvalidInput {
            message: format!("hook payload failed structural validation: {e}"),
        }
    })?;

    serde_json::from_slice(&buf).map_err(|e| MaosError::InvalidInput {
        message: format!("malformed hook payload: {e}"),
    })
}

/// Serializes a [`HookResponse`] and writes it, newline-terminated, to the
/// byte sink. Fields holding their serde default are omitted by
/// `HookResponse`'s own `#[serde(skip_serializing_if = ...)]` attributes;
/// the internal exit-code field is never serialized at all.
pub async fn write_hook_response<W>(sink: &mut W, response: &HookResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut body = serde_json::to_vec(response)
        .map_err(|e| MaosError::InvalidInput {
            message: format!("failed to serialize hook response: {e}"),
        })?;
    body.push(b'\n');
    sink.write_all(&body).await.map_err(|e| MaosError::InvalidInput {
        message: format!("failed to write hook response: {e}"),
    })?;
    sink.flush().await.map_err(|e| MaosError::InvalidInput {
        message: format!("failed to flush hook response: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn reads_a_well_formed_invocation() {
        let payload = br#"{
            "session_id": "sess_abc",
            "cwd": "/workspace/demo",
            "hook_event_name": "PreToolUse",
            "tool_name": "Edit",
            "tool_input": {"file_path": "src/main.rs"}
        }"#;
        let mut cursor = Cursor::new(payload.to_vec());
        let input = read_hook_input(&mut cursor).await.unwrap();
        assert_eq!(input.session_id, "sess_abc");
        assert_eq!(input.cwd, "/workspace/demo");
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let mut cursor = Cursor::new(Vec::new());
        let err = read_hook_input(&mut cursor).await.unwrap_err();
        assert!(matches!(err, MaosError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let mut cursor = Cursor::new(b"not json at all".to_vec());
        let err = read_hook_input(&mut cursor).await.unwrap_err();
        assert!(matches!(err, MaosError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn rejects_missing_required_fields() {
        let mut cursor = Cursor::new(br#"{"tool_name": "Edit"}"#.to_vec());
        let err = read_hook_input(&mut cursor).await.unwrap_err();
        assert!(matches!(err, MaosError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn rejects_oversized_payload() {
        let huge = "x".repeat(MAX_INPUT_SIZE_BYTES + 1);
        let payload = format!(
            r#"{{"session_id":"s","cwd":"/tmp","hook_event_name":"Stop","padding":"{huge}"}}"#
        );
        let mut cursor = Cursor::new(payload.into_bytes());
        let err = read_hook_input(&mut cursor).await.unwrap_err();
        assert!(matches!(err, MaosError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn writes_newline_terminated_json() {
        let response = HookResponse::empty();
        let mut buf = Vec::new();
        write_hook_response(&mut buf, &response).await.unwrap();
        assert!(buf.ends_with(b"\n"));
        let text = String::from_utf8(buf).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(text.trim()).is_ok());
    }

    #[tokio::test]
    async fn omits_exit_code_from_wire_output() {
        let response = HookResponse::block_for_stop("because".to_string());
        let mut buf = Vec::new();
        write_hook_response(&mut buf, &response).await.unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("exit_code"));
        assert!(!text.contains("exitCode"));
    }
}
