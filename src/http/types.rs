use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::store::StoreError;

/// `{"status":"success"}` / `{"status":"error"}` envelope used by every
/// mutating route.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

pub fn success() -> Json<StatusBody> {
    Json(StatusBody { status: "success".into() })
}

/// Any failed request. The mock surface collapses every failure — store
/// fault, missing id, bad payload — into `500 {"status":"error"}`.
#[derive(Debug)]
pub struct ServiceFault(pub String);

impl From<StoreError> for ServiceFault {
    fn from(err: StoreError) -> Self {
        Self(err.to_string())
    }
}

impl IntoResponse for ServiceFault {
    fn into_response(self) -> Response {
        tracing::warn!(fault = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(StatusBody { status: "error".into() }))
            .into_response()
    }
}
