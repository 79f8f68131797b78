//! Language Server Protocol transport, JSON-RPC connection, and per-language
//! server lifecycle management.

mod connection;
mod manager;
mod transport;

pub use connection::JsonRpcConnection;
pub use manager::{LanguageServerLauncher, LspServerManager, ManagedServer, TableLauncher};
pub use transport::{read_message, write_message};
