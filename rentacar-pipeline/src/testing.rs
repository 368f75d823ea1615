//! Mock collaborators for stage tests.

use std::error::Error;
use std::sync::Mutex;

use async_trait::async_trait;
use rentacar_core::codec;
use rentacar_core::ports::{ConfirmationEmail, ConfirmationMailer, MessageSink, RecordStore};
use rentacar_core::records::{BookingRecord, BookingRequest, PaymentRecord, RentalRecord};

fn effect_error(what: &str) -> Box<dyn Error + Send + Sync> {
    Box::new(std::io::Error::other(what.to_string()))
}

/// Encoded booking message for a representative four-day rental.
pub fn booking_payload() -> String {
    let booking = BookingRecord::from_request(BookingRequest {
        customer_name: "Jane Smith".to_string(),
        email: "jane@example.com".to_string(),
        car_type: "BMW X5".to_string(),
        pickup_date: "2026-02-01".to_string(),
        return_date: "2026-02-05".to_string(),
        rental_days: 4,
        total_amount: 400.0,
        ..Default::default()
    });
    codec::encode_message(&booking).unwrap()
}

/// In-memory store, optionally failing every write.
#[derive(Default)]
pub struct MemoryStore {
    pub rentals: Mutex<Vec<RentalRecord>>,
    pub payments: Mutex<Vec<PaymentRecord>>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save_rental(
        &self,
        rental: &RentalRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail {
            return Err(effect_error("store down"));
        }
        self.rentals.lock().unwrap().push(rental.clone());
        Ok(())
    }

    async fn save_payment(
        &self,
        payment: &PaymentRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail {
            return Err(effect_error("store down"));
        }
        self.payments.lock().unwrap().push(payment.clone());
        Ok(())
    }
}

/// Records (queue, key, payload) triples, optionally failing every send.
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<(String, String, String)>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(
        &self,
        queue: &str,
        key: &str,
        payload: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail {
            return Err(effect_error("broker unreachable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((queue.to_string(), key.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Captures outgoing emails, optionally failing every send.
#[derive(Default)]
pub struct StubMailer {
    pub sent: Mutex<Vec<ConfirmationEmail>>,
    pub fail: bool,
}

impl StubMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ConfirmationMailer for StubMailer {
    async fn send_confirmation(
        &self,
        email: &ConfirmationEmail,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail {
            return Err(effect_error("email provider rejected the request"));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
