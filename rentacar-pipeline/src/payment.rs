use std::sync::Arc;

use chrono::Utc;
use rentacar_core::codec;
use rentacar_core::ports::{ConfirmationEmail, ConfirmationMailer, MessageSink, RecordStore};
use rentacar_core::records::{NotificationRecord, PaymentRecord, PaymentRequest, NOTIFICATION_QUEUE};
use rentacar_core::StageError;
use tracing::{info, warn};

/// Outcome of one payment-stage invocation.
#[derive(Debug)]
pub struct PaymentOutcome {
    pub payment: PaymentRecord,
    pub notification: NotificationRecord,
    /// False when the store write failed and was suppressed.
    pub persisted: bool,
    /// False when the email send failed and was suppressed.
    pub email_sent: bool,
}

/// Queue-triggered handler for payment requests: "charges" the payment,
/// persists it best-effort, sends the confirmation email best-effort, and
/// always emits the notification record downstream.
pub struct PaymentStage {
    store: Arc<dyn RecordStore>,
    mailer: Arc<dyn ConfirmationMailer>,
    sink: Arc<dyn MessageSink>,
}

impl PaymentStage {
    pub fn new(
        store: Arc<dyn RecordStore>,
        mailer: Arc<dyn ConfirmationMailer>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            store,
            mailer,
            sink,
        }
    }

    /// Process one payment message.
    ///
    /// Store and email failures are logged and suppressed; the notification
    /// is emitted regardless. Parse and enqueue failures propagate.
    pub async fn process(&self, payload: &str) -> Result<PaymentOutcome, StageError> {
        let request: PaymentRequest = codec::decode_message(payload)?;
        info!("Processing payment for booking: {}", request.booking_id);

        let payment = PaymentRecord::from_request(&request, Utc::now());

        let persisted = match self.store.save_payment(&payment).await {
            Ok(()) => {
                info!("Payment record saved: {}", payment.id);
                true
            }
            Err(e) => {
                warn!("Store unavailable, continuing without persistence: {}", e);
                false
            }
        };

        let email = confirmation_email(&payment);
        let email_sent = match self.mailer.send_confirmation(&email).await {
            Ok(()) => {
                info!("Confirmation email sent to: {}", email.to);
                true
            }
            Err(e) => {
                warn!("Email not sent for booking {}: {}", payment.booking_id, e);
                false
            }
        };

        let notification = NotificationRecord::for_payment(&request, Utc::now());
        let encoded = codec::encode_message(&notification)?;
        self.sink
            .send(NOTIFICATION_QUEUE, &notification.booking_id, &encoded)
            .await
            .map_err(StageError::Transport)?;
        info!("Notification queued for booking: {}", notification.booking_id);

        Ok(PaymentOutcome {
            payment,
            notification,
            persisted,
            email_sent,
        })
    }
}

/// Render the booking confirmation email for a completed payment.
fn confirmation_email(payment: &PaymentRecord) -> ConfirmationEmail {
    let text = format!(
        "Dear {},\n\nYour booking has been confirmed!\n\nBooking ID: {}\nAmount Paid: ${}\nTransaction ID: {}\n\nThank you for choosing RentACar!\n\nBest regards,\nRentACar Team",
        payment.customer_name, payment.booking_id, payment.amount, payment.transaction_id
    );
    let html = format!(
        "<h2>Booking Confirmation</h2>\
         <p>Dear {},</p>\
         <p>Your booking has been confirmed!</p>\
         <ul>\
           <li><strong>Booking ID:</strong> {}</li>\
           <li><strong>Amount Paid:</strong> ${}</li>\
           <li><strong>Transaction ID:</strong> {}</li>\
         </ul>\
         <p>Thank you for choosing RentACar!</p>\
         <p>Best regards,<br>RentACar Team</p>",
        payment.customer_name, payment.booking_id, payment.amount, payment.transaction_id
    );

    ConfirmationEmail {
        to: payment.email.clone(),
        subject: "Booking Confirmation - RentACar".to_string(),
        text,
        html,
    }
}
