//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::routes::AppState;
use crate::error::{Error, Result};
use crate::request::Output;

// Request bodies

/// Operation request. Only the first present field is honoured, in the order
/// `fibonacci`, `prime`, `lcm`, `hcf`, `AI`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BfhlRequest {
    /// Number of Fibonacci terms to return (1..=94). A string holding an
    /// integer (`"7"`) or an integral float (`7.0`) is also accepted.
    pub fibonacci: Option<u64>,
    /// Integers to filter down to primes. Elements may also be integer
    /// strings or integral floats; an empty list yields `[]`.
    pub prime: Option<Vec<i64>>,
    /// Non-empty list of integers to reduce by least common multiple.
    /// Elements may also be integer strings or integral floats.
    pub lcm: Option<Vec<i64>>,
    /// Non-empty list of integers to reduce by highest common factor.
    /// Elements may also be integer strings or integral floats.
    pub hcf: Option<Vec<i64>>,
    /// Question answered by the AI provider in one word. Non-string values
    /// are converted to their JSON text.
    #[serde(rename = "AI")]
    pub ai: Option<String>,
}

// Response types

/// Uniform response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope {
    pub is_success: bool,
    pub official_email: String,
    /// Operation result, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure description, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn success(official_email: &str, data: Option<Value>) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data,
            message: None,
        }
    }

    pub fn failure(official_email: &str, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.to_string(),
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Map an operation outcome to its status code and envelope
pub fn envelope_for(official_email: &str, result: Result<Output>) -> (StatusCode, Envelope) {
    match result {
        Ok(output) => match serde_json::to_value(output) {
            Ok(data) => (StatusCode::OK, Envelope::success(official_email, Some(data))),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::failure(official_email, e.to_string()),
            ),
        },
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::debug!(status = status.as_u16(), "Request failed: {}", e);
            (status, Envelope::failure(official_email, e.to_string()))
        }
    }
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = Envelope)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<Envelope> {
    Json(Envelope::success(&state.official_email, None))
}

/// Run one operation
#[utoipa::path(
    post,
    path = "/bfhl",
    request_body = BfhlRequest,
    responses(
        (status = 200, description = "Operation succeeded", body = Envelope),
        (status = 400, description = "No recognised key or malformed JSON", body = Envelope),
        (status = 500, description = "Invalid input or AI provider failure", body = Envelope)
    ),
    tag = "operations"
)]
pub async fn bfhl(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Envelope>) {
    let result = match payload {
        Ok(Json(body)) => state.dispatcher.handle(&body).await,
        Err(rejection) => Err(Error::MalformedBody(rejection.body_text())),
    };

    let (status, envelope) = envelope_for(&state.official_email, result);
    (status, Json(envelope))
}

/// Fallback for unknown routes
pub async fn not_found(State(state): State<AppState>) -> (StatusCode, Json<Envelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure(&state.official_email, "Not found")),
    )
}
