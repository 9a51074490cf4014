use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEvaluationRepository, InMemoryResultStore};
use crate::routes::with_engine_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talentflow::config::AppConfig;
use talentflow::error::AppError;
use talentflow::telemetry;
use talentflow::workflows::evaluation::{EvaluationService, StandardCriterionCatalog};
use talentflow::workflows::psychotest::{AssessmentService, StandardCategoryCatalog};
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

    let evaluations = Arc::new(EvaluationService::new(
        Arc::new(StandardCriterionCatalog::standard()),
        Arc::new(InMemoryEvaluationRepository::default()),
    ));
    let assessments = Arc::new(AssessmentService::new(
        Arc::new(StandardCategoryCatalog::standard()),
        Arc::new(InMemoryResultStore::default()),
    ));

    let app = with_engine_routes(evaluations, assessments)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
