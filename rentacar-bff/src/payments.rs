use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use rentacar_core::codec;
use rentacar_core::ports::MessageSink;
use rentacar_core::records::PAYMENT_QUEUE;
use serde_json::{json, Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/payments", post(create_payment))
}

/// Direct payment intake. The body is passed through untouched apart from
/// the assigned id and intake metadata.
async fn create_payment(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payment_id = Uuid::new_v4().to_string();

    let mut payment = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    payment.insert("paymentId".to_string(), json!(payment_id));
    payment.insert("status".to_string(), json!("pending"));
    payment.insert("createdAt".to_string(), json!(Utc::now()));

    info!("Payment initiated: {}", payment_id);

    let payload = codec::encode_message(&Value::Object(payment))
        .map_err(|e| AppError::internal("Failed to process payment", e))?;
    state
        .transport
        .send(PAYMENT_QUEUE, &payment_id, &payload)
        .await
        .map_err(|e| AppError::internal("Failed to process payment", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "paymentId": payment_id,
            "message": "Payment processing initiated",
        })),
    ))
}
