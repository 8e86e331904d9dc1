use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_core_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use yenquit::config::AppConfig;
use yenquit::error::AppError;
use yenquit::telemetry;
use yenquit::wizard::{InMemoryWizardStore, WizardService};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let wizard_store = Arc::new(InMemoryWizardStore::with_capacity(
        config.wizard.max_sessions,
    ));
    let wizard_service = Arc::new(WizardService::new(wizard_store));

    let app = with_core_routes(wizard_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_wizard_sessions = config.wizard.max_sessions,
        "yenquit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
