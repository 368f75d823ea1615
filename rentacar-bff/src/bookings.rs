use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rentacar_core::codec;
use rentacar_core::ports::MessageSink;
use rentacar_core::records::{BookingRecord, BookingRequest, RENT_QUEUE};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{id}", get(get_booking))
}

/// Fire-and-forget intake: assign an id, stamp metadata, enqueue (or
/// simulate when the transport is disabled), acknowledge immediately.
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking = BookingRecord::from_request(request);
    info!("New booking received: {}", booking.booking_id);

    let payload = codec::encode_message(&booking)
        .map_err(|e| AppError::internal("Failed to create booking", e))?;
    state
        .transport
        .send(RENT_QUEUE, &booking.booking_id, &payload)
        .await
        .map_err(|e| AppError::internal("Failed to create booking", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "bookingId": booking.booking_id,
            "message": "Booking created successfully",
            "status": "processing",
        })),
    ))
}

/// No real status lookup exists; every booking reports "processing".
async fn get_booking(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "bookingId": id,
        "status": "processing",
        "message": "Booking is being processed",
    }))
}
