use balloon_server::config::ServerConfig;
use balloon_server::http::{router, AppState};
use balloon_server::roster::{demo_roster, Roster};
use chrono::Utc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    // Validate configuration before starting
    if let Err(e) = config.validate() {
        eprintln!("Invalid server configuration: {}", e);
        std::process::exit(1);
    }

    let roster = if config.seed_demo_users {
        Roster::with_users(demo_roster(Utc::now()))
    } else {
        Roster::new()
    };
    tracing::info!("Roster starts with {} users", roster.len());

    // Browsers poll from another origin during development.
    let app = router(AppState::new(roster)).layer(CorsLayer::permissive());

    tracing::info!("Starting balloon server on {}", config.listen_addr);
    println!("Balloon server listening on {}", config.listen_addr);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
