use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use deal_audit::audit::DealAuditor;
use deal_audit::config::AppConfig;
use deal_audit::error::AppError;
use deal_audit::telemetry;
use std::sync::atomic::Ordering;
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
    let app_state = AppState::new(DealAuditor::new(config.rules.clone()), prometheus_handle);
    let readiness_flag = app_state.readiness.clone();

    let app = audit_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cpm_min = config.rules.market_cpm.min,
        cpm_max = config.rules.market_cpm.max,
        "deal audit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
