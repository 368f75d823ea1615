use std::sync::Arc;

use chrono::Utc;
use rentacar_core::codec;
use rentacar_core::ports::{MessageSink, RecordStore};
use rentacar_core::records::{BookingRecord, PaymentRequest, RentalRecord, PAYMENT_QUEUE};
use rentacar_core::StageError;
use tracing::{info, warn};

/// Outcome of one rental-stage invocation.
#[derive(Debug)]
pub struct RentOutcome {
    pub rental: RentalRecord,
    pub payment: PaymentRequest,
    /// False when the store write failed and was suppressed.
    pub persisted: bool,
}

/// Queue-triggered handler for booking messages: builds the rental record,
/// persists it best-effort, and hands a payment request to the next stage.
pub struct RentStage {
    store: Arc<dyn RecordStore>,
    sink: Arc<dyn MessageSink>,
}

impl RentStage {
    pub fn new(store: Arc<dyn RecordStore>, sink: Arc<dyn MessageSink>) -> Self {
        Self { store, sink }
    }

    /// Process one booking message.
    ///
    /// A store failure is logged and suppressed; the payment request is
    /// enqueued regardless. Parse and enqueue failures propagate so the
    /// transport's redelivery policy applies.
    pub async fn process(&self, payload: &str) -> Result<RentOutcome, StageError> {
        let booking: BookingRecord = codec::decode_message(payload)?;
        info!("Processing booking: {}", booking.booking_id);

        let rental = RentalRecord::from_booking(&booking, Utc::now());

        let persisted = match self.store.save_rental(&rental).await {
            Ok(()) => {
                info!("Rental record saved: {}", rental.id);
                true
            }
            Err(e) => {
                warn!("Store unavailable, continuing without persistence: {}", e);
                false
            }
        };

        let payment = PaymentRequest::from_rental(&rental, Utc::now());
        let encoded = codec::encode_message(&payment)?;
        self.sink
            .send(PAYMENT_QUEUE, &payment.booking_id, &encoded)
            .await
            .map_err(StageError::Transport)?;
        info!("Payment request queued for booking: {}", payment.booking_id);

        Ok(RentOutcome {
            rental,
            payment,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{booking_payload, MemoryStore, RecordingSink};
    use rentacar_core::records::{BookingStatus, PaymentStatus};

    fn stage(store: Arc<MemoryStore>, sink: Arc<RecordingSink>) -> RentStage {
        RentStage::new(store, sink)
    }

    #[tokio::test]
    async fn test_booking_becomes_confirmed_rental_and_payment_request() {
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(RecordingSink::default());
        let outcome = stage(store.clone(), sink.clone())
            .process(&booking_payload())
            .await
            .unwrap();

        assert_eq!(outcome.rental.status, BookingStatus::Confirmed);
        assert_eq!(outcome.rental.id, outcome.payment.booking_id);
        assert_eq!(outcome.payment.amount, 400.0);
        assert_eq!(outcome.payment.status, PaymentStatus::Pending);
        assert!(outcome.persisted);
        assert_eq!(store.rentals.lock().unwrap().len(), 1);

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, PAYMENT_QUEUE);
        let relayed: PaymentRequest = codec::decode_message(&sent[0].2).unwrap();
        assert_eq!(relayed.amount, 400.0);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_block_enqueue() {
        let store = Arc::new(MemoryStore::failing());
        let sink = Arc::new(RecordingSink::default());
        let outcome = stage(store, sink.clone())
            .process(&booking_payload())
            .await
            .unwrap();

        assert!(!outcome.persisted);
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_message_is_fatal() {
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(RecordingSink::default());
        let err = stage(store, sink.clone())
            .process("not a booking")
            .await
            .unwrap_err();

        assert!(matches!(err, StageError::Malformed(_)));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(RecordingSink::failing());
        let err = stage(store, sink)
            .process(&booking_payload())
            .await
            .unwrap_err();

        assert!(matches!(err, StageError::Transport(_)));
    }
}
