use crate::http::handlers::payments;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(payments::health))
        .route("/payments", post(payments::initiate_payment))
        .route("/payments/finalize", post(payments::finalize_payment))
        .route("/payments/session-expired", post(payments::session_expired))
        .with_state(state)
}
