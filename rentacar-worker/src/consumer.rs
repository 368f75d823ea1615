use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rentacar_core::records::{PAYMENT_QUEUE, RENT_QUEUE};
use rentacar_pipeline::{PaymentStage, RentStage};
use tracing::{error, info};

fn build_consumer(
    brokers: &str,
    group_id: &str,
) -> Result<StreamConsumer, rdkafka::error::KafkaError> {
    ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .set("group.id", group_id)
        .set("enable.auto.commit", "true")
        .set("auto.offset.reset", "earliest")
        .create()
}

/// Consume booking messages and drive the rental stage. Handler errors are
/// logged and the loop moves on; redelivery is broker policy, no local
/// retry.
pub async fn run_rent_consumer(
    brokers: String,
    group_id: String,
    stage: RentStage,
) -> Result<(), rdkafka::error::KafkaError> {
    let consumer = build_consumer(&brokers, &group_id)?;
    consumer.subscribe(&[RENT_QUEUE])?;

    info!("Rent worker started, listening on {}", RENT_QUEUE);

    loop {
        match consumer.recv().await {
            Err(e) => error!("Kafka error: {}", e),
            Ok(m) => {
                if let Some(payload) = m.payload_view::<str>() {
                    match payload {
                        Ok(payload) => match stage.process(payload).await {
                            Ok(outcome) => info!(
                                "Rent processing completed for booking: {}",
                                outcome.rental.id
                            ),
                            Err(e) => error!("Error processing rental: {}", e),
                        },
                        Err(e) => error!("Error reading payload: {}", e),
                    }
                }
            }
        }
    }
}

/// Consume payment messages and drive the payment stage.
pub async fn run_payment_consumer(
    brokers: String,
    group_id: String,
    stage: PaymentStage,
) -> Result<(), rdkafka::error::KafkaError> {
    let consumer = build_consumer(&brokers, &group_id)?;
    consumer.subscribe(&[PAYMENT_QUEUE])?;

    info!("Payment worker started, listening on {}", PAYMENT_QUEUE);

    loop {
        match consumer.recv().await {
            Err(e) => error!("Kafka error: {}", e),
            Ok(m) => {
                if let Some(payload) = m.payload_view::<str>() {
                    match payload {
                        Ok(payload) => match stage.process(payload).await {
                            Ok(outcome) => info!(
                                "Payment processing completed for booking: {}",
                                outcome.payment.booking_id
                            ),
                            Err(e) => error!("Error processing payment: {}", e),
                        },
                        Err(e) => error!("Error reading payload: {}", e),
                    }
                }
            }
        }
    }
}
