//! LSP base protocol framing: `Header: value\r\n` lines, a blank-line
//! separator, then a `Content-Length`-delimited UTF-8 JSON body.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{MaosError, Result};

/// Reads one framed JSON-RPC message. Returns [`MaosError::ConnectionClosed`]
/// on a clean EOF before any header line is read (the peer closed the pipe).
pub async fn read_message<R>(reader: &mut R) -> Result<Value>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await.map_err(MaosError::Io)?;
        if bytes_read == 0 {
            return Err(MaosError::ConnectionClosed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some(value) = trimmed
            .split_once(':')
            .filter(|(name, _)| name.eq_ignore_ascii_case("Content-Length"))
            .map(|(_, value)| value.trim())
        {
            content_length = Some(value.parse().map_err(|_| MaosError::InvalidInput {
                message: format!("malformed Content-Length header: {value}"),
            })?);
        }
    }

    let length = content_length.ok_or_else(|| MaosError::InvalidInput {
        message: "LSP message missing Content-Length header".to_string(),
    })?;

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.map_err(MaosError::Io)?;
    serde_json::from_slice(&body).map_err(MaosError::Json)
}

/// Writes one framed JSON-RPC message.
pub async fn write_message<W>(writer: &mut W, value: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = serde_json::to_vec(value).map_err(MaosError::Json)?;
    let header = format!("Content-Length: {}\r\n\r\n", body.len());
    writer
        .write_all(header.as_bytes())
        .await
        .map_err(MaosError::Io)?;
    writer.write_all(&body).await.map_err(MaosError::Io)?;
    writer.flush().await.map_err(MaosError::Io)
}
