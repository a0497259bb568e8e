use crate::cli::ServeArgs;
use crate::infra::{build_service, load_catalog, AppState};
use crate::routes::with_credit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use credit_scoring::telemetry;
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

    let catalog = load_catalog(&config.assessment)?;
    let service = Arc::new(build_service(&config.assessment)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog),
    };

    let classifier_enabled = service.has_classifier();
    let app = with_credit_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        journal = %config.assessment.journal_path.display(),
        classifier_enabled,
        "credit scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
