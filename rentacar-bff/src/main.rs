use std::net::SocketAddr;
use std::sync::Arc;

use rentacar_bff::{app, AppState};
use rentacar_store::QueueTransport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentacar_bff=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rentacar_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting RentACar BFF on port {}", config.server.port);

    let transport = Arc::new(QueueTransport::from_config(config.kafka.brokers.as_deref()));

    let state = AppState { transport };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app(state)).await.expect("Server error");
}
