use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{ClientId, ClientProfile};
use super::engine::AppointmentPatch;
use super::repository::{ClientRepository, ClientSummaryView, NotificationPublisher};
use super::service::{ClientServiceError, ClientWorkflowService, StatusUpdate};
use crate::workflows::export;

/// Router builder exposing the client pipeline over HTTP. The clock is read
/// here, at the boundary; the service and engine below stay clock-free.
pub fn client_router<R, N>(service: Arc<ClientWorkflowService<R, N>>) -> Router
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/clients",
            get(list_handler::<R, N>).post(create_handler::<R, N>),
        )
        .route("/api/v1/clients/:client_id", get(detail_handler::<R, N>))
        .route(
            "/api/v1/clients/:client_id/status",
            post(status_handler::<R, N>),
        )
        .route(
            "/api/v1/clients/:client_id/appointment",
            put(appointment_handler::<R, N>),
        )
        .route(
            "/api/v1/reports/dashboard",
            get(dashboard_handler::<R, N>),
        )
        .route(
            "/api/v1/exports/booking.csv",
            get(export_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
    axum::Json(profile): axum::Json<ClientProfile>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.add_client(profile, Utc::now()) {
        Ok(client) => (StatusCode::CREATED, axum::Json(client)).into_response(),
        Err(ClientServiceError::Validation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.clients() {
        Ok(clients) => {
            let views: Vec<ClientSummaryView> =
                clients.iter().map(ClientSummaryView::from_client).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn detail_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ClientId(client_id);
    match service.client(&id) {
        Ok(Some(client)) => (StatusCode::OK, axum::Json(client)).into_response(),
        Ok(None) => not_found(&id),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
    Path(client_id): Path<String>,
    axum::Json(update): axum::Json<StatusUpdate>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ClientId(client_id);
    match service.update_status(&id, update, Utc::now()) {
        Ok(Some(client)) => (StatusCode::OK, axum::Json(client)).into_response(),
        Ok(None) => not_found(&id),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn appointment_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
    Path(client_id): Path<String>,
    axum::Json(patch): axum::Json<AppointmentPatch>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ClientId(client_id);
    match service.update_appointment(&id, patch, Utc::now()) {
        Ok(Some(client)) => (StatusCode::OK, axum::Json(client)).into_response(),
        Ok(None) => not_found(&id),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn dashboard_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.dashboard() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<ClientWorkflowService<R, N>>>,
) -> Response
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let clients = match service.clients() {
        Ok(clients) => clients,
        Err(error) => return internal_error(error),
    };

    let mut buffer = Vec::new();
    match export::write_booking_export(&clients, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"wafid-booking-export.csv\"",
                ),
            ],
            buffer,
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

fn not_found(id: &ClientId) -> Response {
    let payload = json!({ "error": format!("client '{}' not found", id.0) });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
