use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use deal_audit::audit::{AuditReport, DealRecord, IssueView, RuleConfig};
use deal_audit::error::AppError;
use serde::Serialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct AuditResponse {
    pub(crate) deal_id: String,
    pub(crate) audited_at: DateTime<Utc>,
    pub(crate) report: AuditReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) issues: Vec<IssueView>,
}

pub(crate) fn audit_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/rules", get(rules_endpoint))
        .route("/api/v1/deals/audit", post(audit_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rules_endpoint(Extension(state): Extension<AppState>) -> Json<RuleConfig> {
    Json(state.auditor.rules().clone())
}

pub(crate) async fn audit_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<DealRecord>, JsonRejection>,
) -> Result<Json<AuditResponse>, AppError> {
    let Json(deal) = payload?;
    let report = state.auditor.audit(&deal);
    let outcome = report.overall_outcome();
    info!(
        deal_id = %deal.deal_id,
        tier = outcome.outcome.label(),
        percentage = %outcome.percentage,
        "audit request served"
    );

    Ok(Json(AuditResponse {
        issues: report.issues(),
        deal_id: deal.deal_id,
        audited_at: Utc::now(),
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use deal_audit::audit::{CheckKind, DealAuditor, OutcomeTier};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState::new(DealAuditor::standard(), handle)
    }

    fn app(state: AppState) -> Router {
        audit_routes().layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn audit_endpoint_returns_full_report() {
        let Json(body) = audit_endpoint(
            Extension(test_state()),
            Ok(Json(DealRecord {
                deal_id: "D-77".to_string(),
                ..DealRecord::default()
            })),
        )
        .await
        .expect("audit succeeds");

        assert_eq!(body.deal_id, "D-77");
        assert_eq!(body.report.checks().len(), CheckKind::COUNT);
        assert_eq!(body.report.overall_outcome().outcome, OutcomeTier::Low);
        assert_eq!(body.issues.len(), 8);
    }

    #[tokio::test]
    async fn audit_route_accepts_form_payloads() {
        let payload = json!({
            "dealId": "D-1001",
            "status": "Active",
            "buyerSeatId": "BS-12345",
            "kvps": { "msft_refresh": true, "brand_safety": true },
            "targeting": { "geo": ["US", "ZZ"] },
            "dealListId": "DL-9876",
            "floorPrice": "1.5",
            "creativeApproved": true,
            "inventoryStrength": "Strong",
            "historicalPerformance": "Good"
        });

        let response = app(test_state())
            .oneshot(post_json("/api/v1/deals/audit", payload))
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["deal_id"], "D-1001");
        assert_eq!(body["report"]["kvps"]["issue"], "Missing: inventory_type");
        assert_eq!(body["report"]["targeting"]["issue"], "Invalid countries: ZZ");
        assert_eq!(body["report"]["floor_price"]["status"], "Too Low");
        assert_eq!(body["report"]["overall_outcome"]["percentage"], "66.7");
        assert_eq!(body["report"]["overall_outcome"]["outcome"], "MEDIUM");
        assert_eq!(body["issues"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn audit_route_rejects_malformed_json() {
        let response = app(test_state())
            .oneshot(
                Request::post("/api/v1/deals/audit")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{ \"dealId\": "))
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.starts_with("deal intake error")));
    }

    #[tokio::test]
    async fn audit_route_rejects_wrong_typed_fields_as_bad_request() {
        let payload = json!({
            "dealId": "D-5",
            "creativeApproved": "yes"
        });

        let response = app(test_state())
            .oneshot(post_json("/api/v1/deals/audit", payload))
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("invalid deal record payload")));
    }

    #[tokio::test]
    async fn rules_route_exposes_active_policy() {
        let response = app(test_state())
            .oneshot(
                Request::get("/api/v1/rules")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["market_cpm"]["min"], 2.0);
        assert_eq!(body["max_segments"], 5);
        assert_eq!(body["passing_inventory"], json!(["Strong", "Moderate"]));
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let state = test_state();
        let response = app(state.clone())
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request builds"))
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .readiness
            .store(true, std::sync::atomic::Ordering::Release);
        let response = app(state)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request builds"))
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
