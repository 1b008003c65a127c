use crate::cli::ServeArgs;
use crate::infra::{csv_backends, default_leave_policy, AppState};
use crate::routes::with_leave_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leavedesk::config::AppConfig;
use leavedesk::error::AppError;
use leavedesk::telemetry;
use leavedesk::workflows::leave::{LeaveRequestService, PdfConfirmationRenderer};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (store, roster) = csv_backends(&config.storage);
    let service = Arc::new(LeaveRequestService::new(
        store,
        roster,
        Arc::new(PdfConfirmationRenderer::default()),
        default_leave_policy(),
    ));

    let app = with_leave_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "leave request service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
