use std::sync::Arc;

use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use spotify_mcp_server::config::Config;
use spotify_mcp_server::{Server, http_router, spotify, tools};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .json()
        .init();

    let cfg = Config::from_env();

    // Token acquisition failure is fatal: nothing is served on bad credentials.
    let catalog = spotify::Client::new(&cfg.spotify)
        .await
        .expect("failed to create Spotify client");
    let catalog: Arc<dyn spotify::MusicCatalog> = Arc::new(catalog);

    let mut srv = Server::new();
    tools::register_all(&mut srv, catalog);

    let router = http_router(srv)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(cfg.server.request_timeout));

    let addr = format!("0.0.0.0:{}", cfg.server.port);
    tracing::info!(addr = %addr, "starting MCP server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server exited");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
