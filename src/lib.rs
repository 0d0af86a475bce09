pub mod config;
pub mod domain {
    pub mod context;
    pub mod outcome;
    pub mod payment;
}
pub mod error;
pub mod flow;
pub mod http {
    pub mod handlers {
        pub mod payments;
    }
    pub mod routes;
}
pub mod transport;
pub mod tsi;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<flow::controller::PaymentFlowController>,
}
