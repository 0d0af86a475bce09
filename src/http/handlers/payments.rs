use crate::domain::context::ResumeContext;
use crate::domain::payment::PaymentIntent;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SessionExpiredRequest {
    pub transaction_id: String,
}

pub async fn initiate_payment(
    State(state): State<AppState>,
    Json(intent): Json<PaymentIntent>,
) -> impl IntoResponse {
    let outcome = state.flow.initiate(&intent).await;
    (axum::http::StatusCode::OK, Json(outcome))
}

pub async fn finalize_payment(
    State(state): State<AppState>,
    Json(context): Json<ResumeContext>,
) -> impl IntoResponse {
    let outcome = state.flow.finalize(&context).await;
    (axum::http::StatusCode::OK, Json(outcome))
}

pub async fn session_expired(
    State(state): State<AppState>,
    Json(req): Json<SessionExpiredRequest>,
) -> impl IntoResponse {
    let outcome = state.flow.handle_session_expired(&req.transaction_id);
    (axum::http::StatusCode::OK, Json(outcome))
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
