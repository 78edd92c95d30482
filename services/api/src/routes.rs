use std::sync::Arc;

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use medvisa::workflows::clients::{
    client_router, ClientRepository, ClientWorkflowService, NotificationId, NotificationPublisher,
};

use crate::infra::AppState;

pub(crate) fn with_client_routes<R, N>(
    service: Arc<ClientWorkflowService<R, N>>,
) -> axum::Router
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    client_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/notifications",
            axum::routing::get(notifications_endpoint),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            axum::routing::post(mark_read_endpoint),
        )
        .route(
            "/api/v1/notifications/read-all",
            axum::routing::post(mark_all_read_endpoint),
        )
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

pub(crate) async fn notifications_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let log = state.notifications.lock().expect("notification mutex poisoned");
    Json(json!({
        "unread": log.unread_count(),
        "notifications": log.notifications(),
    }))
}

pub(crate) async fn mark_read_endpoint(
    Extension(state): Extension<AppState>,
    Path(notification_id): Path<u64>,
) -> impl IntoResponse {
    let mut log = state.notifications.lock().expect("notification mutex poisoned");
    // Unknown ids are a no-op, not an error: marking read is idempotent.
    let updated = log.mark_read(NotificationId(notification_id));
    Json(json!({ "updated": updated, "unread": log.unread_count() }))
}

pub(crate) async fn mark_all_read_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let mut log = state.notifications.lock().expect("notification mutex poisoned");
    log.mark_all_read();
    Json(json!({ "unread": 0 }))
}
