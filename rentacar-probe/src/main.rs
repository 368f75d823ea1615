use rentacar_probe::{
    build_client, run, ProbeTargets, ATTEMPTS, EXIT_MISCONFIGURED, REQUEST_TIMEOUT, RETRY_DELAY,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentacar_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rentacar_store::Config::load().expect("Failed to load config");

    let Some(targets) = ProbeTargets::from_config(&config.probe) else {
        tracing::error!("Missing probe.frontend_host or probe.bff_host configuration");
        std::process::exit(EXIT_MISCONFIGURED);
    };

    let client = build_client(REQUEST_TIMEOUT).expect("Failed to build HTTP client");
    let code = run(&client, &targets, ATTEMPTS, RETRY_DELAY).await;
    std::process::exit(code);
}
