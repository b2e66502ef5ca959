use deal_audit::audit::DealAuditor;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) auditor: Arc<DealAuditor>,
}

impl AppState {
    pub(crate) fn new(auditor: DealAuditor, metrics: PrometheusHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            auditor: Arc::new(auditor),
        }
    }
}
