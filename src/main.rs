//! PathPilot Backend - Main Entry Point
//!
//! Starts the web API server for the academic advising assistant.

use pathpilot_backend::api::{run_server, AppState};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let state = match AppState::from_env() {
        Ok(state) => Arc::new(state),
        Err(e) => {
            log::error!("Failed to initialize app state: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    run_server(&host, port, state).await
}
