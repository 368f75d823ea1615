use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Queue fed by the booking intake, consumed by the rental stage.
pub const RENT_QUEUE: &str = "rent-queue";
/// Queue fed by the rental stage, consumed by the payment stage.
pub const PAYMENT_QUEUE: &str = "payment-queue";
/// Terminal queue fed by the payment stage; nothing in this repo consumes it.
pub const NOTIFICATION_QUEUE: &str = "notification-queue";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    BookingConfirmation,
}

/// Booking form fields as posted by the browser client.
///
/// Field presence is by convention only; anything missing defaults to
/// empty/zero rather than rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub car_type: String,
    pub pickup_date: String,
    pub return_date: String,
    pub pickup_location: String,
    pub rental_days: i64,
    pub total_amount: f64,
    pub booking_date: String,
}

/// The booking as enqueued by intake: the raw request plus identity and
/// creation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_id: String,
    #[serde(flatten)]
    pub request: BookingRequest,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Assign a fresh booking id and stamp intake metadata.
    pub fn from_request(request: BookingRequest) -> Self {
        Self {
            booking_id: Uuid::new_v4().to_string(),
            request,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Durable rental document written by the rental stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRecord {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub car_type: String,
    pub pickup_date: String,
    pub return_date: String,
    pub pickup_location: String,
    pub rental_days: i64,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub processed_at: DateTime<Utc>,
    pub booking_date: String,
}

impl RentalRecord {
    /// Identity-preserving derivation: the rental reuses the booking id as
    /// its primary key and is confirmed unconditionally. No availability or
    /// payment check gates this transition.
    pub fn from_booking(booking: &BookingRecord, processed_at: DateTime<Utc>) -> Self {
        Self {
            id: booking.booking_id.clone(),
            customer_name: booking.request.customer_name.clone(),
            email: booking.request.email.clone(),
            phone: booking.request.phone.clone(),
            car_type: booking.request.car_type.clone(),
            pickup_date: booking.request.pickup_date.clone(),
            return_date: booking.request.return_date.clone(),
            pickup_location: booking.request.pickup_location.clone(),
            rental_days: booking.request.rental_days,
            total_amount: booking.request.total_amount,
            status: BookingStatus::Confirmed,
            processed_at,
            booking_date: booking.request.booking_date.clone(),
        }
    }
}

/// Message emitted by the rental stage for the payment stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub booking_id: String,
    pub customer_name: String,
    pub email: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl PaymentRequest {
    /// Value-preserving derivation: amount is the rental total, untouched.
    pub fn from_rental(rental: &RentalRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            booking_id: rental.id.clone(),
            customer_name: rental.customer_name.clone(),
            email: rental.email.clone(),
            amount: rental.total_amount,
            status: PaymentStatus::Pending,
            created_at,
        }
    }
}

/// Durable payment document written by the payment stage.
///
/// The transaction id is fabricated from the processing timestamp; it is not
/// guaranteed unique under concurrent processing, and no real authorization
/// happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub booking_id: String,
    pub customer_name: String,
    pub email: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub payment_method: String,
    pub transaction_id: String,
    pub processed_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Mark the payment completed unconditionally, modeling a downstream
    /// gateway that always succeeds.
    pub fn from_request(request: &PaymentRequest, processed_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("payment-{}", request.booking_id),
            booking_id: request.booking_id.clone(),
            customer_name: request.customer_name.clone(),
            email: request.email.clone(),
            amount: request.amount,
            status: PaymentStatus::Completed,
            payment_method: "credit_card".to_string(),
            transaction_id: format!("TXN-{}", processed_at.timestamp_millis()),
            processed_at,
        }
    }
}

/// Terminal record emitted on the notification queue. Consuming it is an
/// external collaborator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub booking_id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub status: NotificationStatus,
    pub sent_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Emitted whether or not the confirmation email actually went out.
    pub fn for_payment(request: &PaymentRequest, sent_at: DateTime<Utc>) -> Self {
        Self {
            booking_id: request.booking_id.clone(),
            email: request.email.clone(),
            kind: NotificationType::BookingConfirmation,
            status: NotificationStatus::Sent,
            sent_at,
        }
    }
}
