use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use medvisa::config::AppConfig;
use medvisa::error::AppError;
use medvisa::telemetry;
use medvisa::workflows::clients::{ClientWorkflowService, NotificationLog};

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryClientRepository, NotificationHub};
use crate::routes::with_client_routes;
use crate::seed;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed_file) = args.seed.take() {
        config.seed_file = Some(seed_file);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let notification_log = Arc::new(Mutex::new(NotificationLog::new()));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        notifications: notification_log.clone(),
    };

    // The store must be populated before the service reports ready.
    let repository = match config.seed_file.as_deref() {
        Some(path) => {
            let clients = seed::load_clients(path)?;
            info!(count = clients.len(), path = %path.display(), "client store seeded");
            Arc::new(InMemoryClientRepository::with_clients(clients))
        }
        None => Arc::new(InMemoryClientRepository::default()),
    };
    let hub = Arc::new(NotificationHub::new(notification_log));
    let service = Arc::new(ClientWorkflowService::new(repository, hub));

    let app = with_client_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "client workflow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
