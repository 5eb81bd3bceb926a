//! Server entry point.
//!
//! # Responsibility
//! - Read configuration from the environment.
//! - Start logging, prepare the database, and serve HTTP until stopped.

mod config;

use config::ServerConfig;
use log::{error, info};
use std::process::ExitCode;
use todo_api::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("todo_server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = todo_core::init_logging(
        config.log_level.as_str(),
        &config.log_dir.to_string_lossy(),
    ) {
        eprintln!("todo_server: logging init failed: {err}");
        return ExitCode::FAILURE;
    }
    if let Some((level, dir)) = todo_core::logging_status() {
        info!(
            "event=logging_ready module=server status=ok level={} dir={}",
            level,
            dir.display()
        );
    }

    let state = match AppState::open(&config.db_path) {
        Ok(state) => state,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("todo_server: cannot open database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("todo_server: cannot bind {}: {err}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=server_start module=server status=ok addr={} version={}",
        config.bind_addr,
        todo_core::core_version()
    );

    match todo_api::run(listener, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_stop module=server status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
