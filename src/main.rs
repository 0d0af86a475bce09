use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use tsi_connector::config::{AppConfig, PartnerConfig};
use tsi_connector::flow::controller::PaymentFlowController;
use tsi_connector::http::routes::router;
use tsi_connector::transport::http_client::HttpTransport;
use tsi_connector::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let partner = PartnerConfig::from_env();

    let transport = Arc::new(HttpTransport::new(cfg.transport.clone())?);
    let flow = PaymentFlowController::tsi(transport.clone(), partner);
    let app = router(AppState { flow: Arc::new(flow) });

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, "tsi connector listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    transport.close();
    tracing::info!("tsi connector stopped");
    Ok(())
}
