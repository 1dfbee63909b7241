use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env early so RUST_LOG and LOG_FORMAT take effect
    dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
}

/// Worker threads from config.toml, else TOKIO_WORKER_THREADS, else the
/// runtime default.
fn worker_threads() -> Option<usize> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok()),
    }
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();

    // panics land in the log stream instead of a bare stderr trace
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "auth_api", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let threads = worker_threads();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "auth_api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "auth_api",
        event = "start",
        %service_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = threads.unwrap_or_default(),
        "auth server starting"
    );

    rt.block_on(async {
        tokio::select! {
            res = server::run() => match res {
                Ok(()) => {
                    info!(service = "auth_api", event = "stop", %service_id, pid, "server stopped normally");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "auth_api", event = "run_failed", error = %e, "server exited with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "auth_api", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
