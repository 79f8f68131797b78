//! JSON-RPC 2.0 connection over a framed LSP transport.
//!
//! Writes are serialized via a mutex; a single background task owns the
//! read half and is the sole producer of both responses (routed to the
//! `pending` map by id) and notifications (forwarded to an unbounded
//! channel). A pending request's slot is removed exactly once — either by
//! the reader task on response arrival, or by the caller on timeout — since
//! `HashMap::remove` on an already-removed key is simply a no-op.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

use super::transport;
use crate::constants::LSP_REQUEST_TIMEOUT;
use crate::error::{MaosError, Result};

type PendingMap = Arc<Mutex<HashMap<i64, oneshot::Sender<Result<Value>>>>>;

/// A live JSON-RPC connection to a language server subprocess.
pub struct JsonRpcConnection {
    writer: AsyncMutex<Box<dyn AsyncWrite + Unpin + Send>>,
    pending: PendingMap,
    next_id: AtomicI64,
    closed: Arc<AtomicBool>,
    notifications: Mutex<Option<mpsc::UnboundedReceiver<Value>>>,
    reader_handle: Mutex<Option<JoinHandle<()>>>,
}

impl JsonRpcConnection {
    /// Takes ownership of a reader/writer pair (typically a child process's
    /// stdout/stdin) and spawns the background read loop.
    pub fn spawn<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let closed = Arc::new(AtomicBool::new(false));

        let pending_for_reader = Arc::clone(&pending);
        let closed_for_reader = Arc::clone(&closed);
        let reader_handle = tokio::spawn(async move {
            let mut buf_reader = BufReader::new(reader);
            loop {
                let message = match transport::read_message(&mut buf_reader).await {
                    Ok(message) => message,
                    Err(_) => break,
                };

                let is_response = message.get("id").is_some() && message.get("method").is_none();
                if is_response {
                    if let Some(id) = message.get("id").and_then(Value::as_i64) {
                        if let Some(sender) = pending_for_reader.lock().remove(&id) {
                            let outcome = match message.get("error") {
                                Some(error) => Err(parse_json_rpc_error(error)),
                                None => Ok(message.get("result").cloned().unwrap_or(Value::Null)),
                            };
                            let _ = sender.send(outcome);
                        }
                        continue;
                    }
                }

                let _ = notify_tx.send(message);
            }

            closed_for_reader.store(true, Ordering::SeqCst);
            for (_, sender) in pending_for_reader.lock().drain() {
                let _ = sender.send(Err(MaosError::ConnectionClosed));
            }
        });

        Self {
            writer: AsyncMutex::new(Box::new(writer)),
            pending,
            next_id: AtomicI64::new(1),
            closed,
            notifications: Mutex::new(Some(notify_rx)),
            reader_handle: Mutex::new(Some(reader_handle)),
        }
    }

    /// Issue a request and await its response, honoring
    /// [`LSP_REQUEST_TIMEOUT`]. On timeout, the pending slot is removed here
    /// so a late response is simply dropped by the reader loop.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(MaosError::ConnectionClosed);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let request = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
        if let Err(err) = self.write(&request).await {
            self.pending.lock().remove(&id);
            return Err(err);
        }

        match tokio::time::timeout(LSP_REQUEST_TIMEOUT, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(MaosError::ConnectionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(MaosError::HookTimeout {
                    event: format!("lsp:{method}"),
                    timeout_ms: LSP_REQUEST_TIMEOUT.as_millis() as u64,
                })
            }
        }
    }

    /// Fire a notification; no response is expected.
    pub async fn notify(&self, method: &str, params: Value) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(MaosError::ConnectionClosed);
        }
        let notification = json!({"jsonrpc": "2.0", "method": method, "params": params});
        self.write(&notification).await
    }

    async fn write(&self, value: &Value) -> Result<()> {
        let mut writer = self.writer.lock().await;
        transport::write_message(&mut **writer, value).await
    }

    /// Take the notification stream. Returns `None` if already taken —
    /// there is exactly one consumer per connection.
    pub fn take_notifications(&self) -> Option<mpsc::UnboundedReceiver<Value>> {
        self.notifications.lock().take()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Mark the connection closed, abort the reader task, and fail every
    /// still-pending request. Idempotent.
    pub async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        if let Some(handle) = self.reader_handle.lock().take() {
            handle.abort();
        }
        for (_, sender) in self.pending.lock().drain() {
            let _ = sender.send(Err(MaosError::ConnectionClosed));
        }
    }
}

fn parse_json_rpc_error(error: &Value) -> MaosError {
    MaosError::JsonRpcError {
        code: error.get("code").and_then(Value::as_i64).unwrap_or(-32603),
        message: error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown JSON-RPC error")
            .to_string(),
        data: error.get("data").cloned(),
    }
}
