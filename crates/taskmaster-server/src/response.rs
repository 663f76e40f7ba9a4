//! JSON response envelope.
//!
//! Every API response carries `{success, message, data}`; error responses
//! (built in [`crate::errors`]) add an `errors` map. The envelope shape is
//! part of the wire contract the browser client relies on.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

/// 200 with a payload.
pub fn success<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Value>) {
    envelope(StatusCode::OK, message, data)
}

/// 201 for freshly created resources.
pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Value>) {
    envelope(StatusCode::CREATED, message, data)
}

fn envelope<T: Serialize>(status: StatusCode, message: &str, data: T) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "success": true,
            "message": message,
            "data": data,
        })),
    )
}
