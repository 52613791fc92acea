// src/main.rs
mod config;
mod database;
mod dtos;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::fmt::init as tracing_init;

use crate::config::{AppConfig, ServerConfig};
use crate::dtos::report::AnalyticsSnapshot;
use crate::error::AppError;
use crate::services::{console, pipeline};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Sales analytics run failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;

    // Pool lives only for the load step
    let db_pool = database::create_pool(&config.database_url).await?;
    let loaded = database::load_tables(&db_pool, &config.tables).await;
    db_pool.close().await;
    let source = loaded?;

    let snapshot = pipeline::run(&source, config.top_n)?;
    print_snapshot(&snapshot);

    if let Some(server) = &config.server {
        serve(server, snapshot).await?;
    }
    Ok(())
}

fn print_snapshot(snapshot: &AnalyticsSnapshot) {
    for report in &snapshot.reports {
        println!("\n{}", console::render_table(report));
    }
    println!("\n{}", console::render_sensitivity(&snapshot.price_sensitivity.by_category));
}

async fn serve(server: &ServerConfig, snapshot: AnalyticsSnapshot) -> Result<(), AppError> {
    let app = routes::create_router(state::AppState::new(snapshot));

    // Try port..port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = server.port.saturating_add(offset);
            let addr = SocketAddr::from((server.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Serving reports on {}", addr);
                l
            }
            None => {
                return Err(AppError::config(format!(
                    "failed to bind to any port starting at {} on {}",
                    server.port, server.host
                )));
            }
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}
