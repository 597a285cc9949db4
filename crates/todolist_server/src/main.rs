//! `todolist-server` entry point.

use log::{error, info};
use std::error::Error;
use std::process::ExitCode;
use todolist_core::db::open_db;
use todolist_core::init_logging;
use todolist_server::{build_router, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=server status=error error={err}");
            eprintln!("todolist-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, &config.log_dir.to_string_lossy())?;

    std::fs::create_dir_all(&config.db_dir)?;
    let conn = open_db(config.db_path())?;
    let app = build_router(AppState::new(conn)?);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(
        "event=app_start module=server status=ok bind={} version={}",
        config.socket_addr(),
        env!("CARGO_PKG_VERSION")
    );
    info!("Server running on http://{}:{}", config.hostname, config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=app_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
