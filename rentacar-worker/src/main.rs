mod consumer;

use std::sync::Arc;

use rentacar_core::ports::{ConfirmationMailer, MessageSink, RecordStore};
use rentacar_pipeline::{PaymentStage, RentStage};
use rentacar_store::{DocumentStore, Mailer, QueueTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentacar_worker=debug,rentacar_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rentacar_store::Config::load().expect("Failed to load config");

    // Degrade, don't fail: with no broker there is nothing to consume.
    let Some(brokers) = config.kafka.brokers.clone() else {
        tracing::warn!("No Kafka brokers configured; nothing to consume, exiting");
        return;
    };

    let store: Arc<dyn RecordStore> =
        Arc::new(DocumentStore::from_config(config.database.url.as_deref()).await);
    let sink: Arc<dyn MessageSink> = Arc::new(QueueTransport::from_config(Some(brokers.as_str())));
    let mailer: Arc<dyn ConfirmationMailer> = Arc::new(Mailer::from_config(
        config.email.api_key.as_deref(),
        &config.email.sender,
    ));

    let rent_stage = RentStage::new(store.clone(), sink.clone());
    let payment_stage = PaymentStage::new(store, mailer, sink);

    let group_id = config.kafka.group_id.clone();
    let rent_task = tokio::spawn(consumer::run_rent_consumer(
        brokers.clone(),
        group_id.clone(),
        rent_stage,
    ));
    let payment_task = tokio::spawn(consumer::run_payment_consumer(
        brokers,
        group_id,
        payment_stage,
    ));

    // Both loops run until the process is killed; if one exits, report it
    // and stop the worker so the host restarts us.
    tokio::select! {
        result = rent_task => {
            if let Ok(Err(e)) = result {
                tracing::error!("Rent consumer stopped: {}", e);
            }
        }
        result = payment_task => {
            if let Ok(Err(e)) = result {
                tracing::error!("Payment consumer stopped: {}", e);
            }
        }
    }

    std::process::exit(1);
}
