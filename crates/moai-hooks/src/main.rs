//! Binary entry point: one hook invocation in, one response out.
//!
//! The host spawns this process fresh per event, writes a `HookInput` to its
//! stdin, and reads one `HookResponse` line back from stdout before reading
//! the exit code. There is no long-lived state between invocations except
//! whatever the subsystems persist to disk under `.moai/`.

use std::sync::Arc;
use std::time::Duration;

use moai_hooks::context::HandlerContext;
use moai_hooks::dispatch::{Dispatcher, Registry};
use moai_hooks_core::config::MaosConfig;
use moai_hooks_core::io::{read_hook_input, write_hook_response};

#[tokio::main]
async fn main() {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));

    let config = match MaosConfig::load(&cwd) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            std::process::exit(moai_hooks_core::ExitCode::from(&err) as i32);
        }
    };

    if let Err(err) = moai_hooks_core::logging::init_logging(&config.logging) {
        eprintln!("failed to initialize logging: {err}");
    }

    let timeout_ms = config.dispatcher.default_timeout_ms;
    let ctx = HandlerContext::new(Arc::new(config));
    let dispatcher = Dispatcher::with_timeout(
        Registry::with_default_handlers(),
        Duration::from_millis(timeout_ms),
    );

    let mut stdin = tokio::io::stdin();
    let input = match read_hook_input(&mut stdin).await {
        Ok(input) => input,
        Err(err) => {
            eprintln!("failed to read hook invocation: {err}");
            std::process::exit(moai_hooks_core::ExitCode::from(&err) as i32);
        }
    };

    let session_id = input.session_id.clone();
    tracing::info!(event = %input.hook_event_name, session_id = %session_id, "dispatching hook event");

    let response = match dispatcher.dispatch(&ctx, input, None).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(%err, "handler chain failed");
            eprintln!("hook dispatch failed: {err}");
            let mut stdout = tokio::io::stdout();
            let _ = write_hook_response(&mut stdout, &moai_hooks_core::messages::HookResponse::empty()).await;
            std::process::exit(moai_hooks_core::ExitCode::from(&err) as i32);
        }
    };

    let exit_code = response.to_exit_code();
    let mut stdout = tokio::io::stdout();
    if let Err(err) = write_hook_response(&mut stdout, &response).await {
        eprintln!("failed to write hook response: {err}");
        std::process::exit(1);
    }

    std::process::exit(exit_code);
}
