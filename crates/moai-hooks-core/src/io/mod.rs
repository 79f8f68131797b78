//! The hook process's wire protocol: a single JSON object in on stdin, a
//! single JSON object out on stdout.

mod wire;

pub use wire::{read_hook_input, write_hook_response};
