#![recursion_limit = "256"]

mod config;
mod routes;
mod services;
mod state;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // `dermai-server hash-password <password>` prints a DERMAI_LOCAL_ACCOUNTS hash.
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let Some(password) = args.next() else {
            eprintln!("usage: dermai-server hash-password <password>");
            std::process::exit(2);
        };
        match services::identity::hash_password(&password) {
            Ok(hash) => println!("{hash}"),
            Err(e) => {
                eprintln!("hash failed: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = config::Config::from_env().expect("invalid configuration");
    let port = config.port;

    if config.local_accounts.is_empty() && config.google_client_id.is_none() {
        tracing::warn!("no sign-in method configured; set DERMAI_LOCAL_ACCOUNTS or GOOGLE_CLIENT_ID");
    }
    tracing::info!(
        local_accounts = config.local_accounts.len(),
        google = config.google_client_id.is_some(),
        session_ttl_secs = config.session_ttl.as_secs(),
        "sign-in configured"
    );

    let state = state::AppState::new(&config);
    let _sweeper = services::session::spawn_sweeper(state.sessions.clone(), SWEEP_INTERVAL);

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "dermai listening");
    axum::serve(listener, app).await.expect("server failed");
}
