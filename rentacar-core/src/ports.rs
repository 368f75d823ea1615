use async_trait::async_trait;
use std::error::Error;

use crate::records::{PaymentRecord, RentalRecord};

/// Best-effort persistence for pipeline records. Implementations may be
/// backed by a live store or degrade to logging when none is configured.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn save_rental(
        &self,
        rental: &RentalRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    async fn save_payment(
        &self,
        payment: &PaymentRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Producer side of the pipeline transport.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Enqueue an already-encoded payload, keyed for partitioning.
    async fn send(
        &self,
        queue: &str,
        key: &str,
        payload: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// A rendered confirmation email. The sender address belongs to the mailer's
/// own configuration.
#[derive(Debug, Clone)]
pub struct ConfirmationEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Transactional email provider seam.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    async fn send_confirmation(
        &self,
        email: &ConfirmationEmail,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
