use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::post,
    Form, Json, Router,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::error::AppError;
use crate::form::{FormFields, GoalsForm, HabitsForm, PressureForm, WorkloadForm};
use crate::models::{
    AcademicPressureLevel, Assessment, GoalsRoadmap, StudyPressureLevel, TimeManagementLevel,
    WorkloadAssessment,
};
use crate::router::{SurveyKind, SurveyRouter};

pub struct AppState {
    pub router: SurveyRouter,
}

type Payload = Result<Form<Vec<(String, String)>>, FormRejection>;

/// A body sent without any content type is read as an empty form.
fn fields(headers: &HeaderMap, payload: Payload) -> Result<FormFields, AppError> {
    match payload {
        Ok(Form(pairs)) => Ok(FormFields::new(pairs)),
        Err(FormRejection::InvalidFormContentType(_)) if !headers.contains_key(CONTENT_TYPE) => {
            Ok(FormFields::default())
        }
        Err(rejection) => Err(rejection.into()),
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SurveyKind::Workload.path(), post(workload_handler))
        .route(SurveyKind::StudyPressure.path(), post(study_handler))
        .route(SurveyKind::TimeHabits.path(), post(time_handler))
        .route(SurveyKind::AcademicPressure.path(), post(pressure_handler))
        .route(SurveyKind::Goals.path(), post(goals_handler))
        .with_state(state)
}

async fn workload_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<Json<WorkloadAssessment>, AppError> {
    let form = WorkloadForm::from_fields(&fields(&headers, payload)?);
    Ok(Json(state.router.submit_workload(&form).await?))
}

async fn study_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<Json<Assessment<StudyPressureLevel>>, AppError> {
    let form = PressureForm::from_fields(&fields(&headers, payload)?);
    Ok(Json(state.router.study_pressure(&form)))
}

async fn time_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<Json<Assessment<TimeManagementLevel>>, AppError> {
    let form = HabitsForm::from_fields(&fields(&headers, payload)?);
    Ok(Json(state.router.time_habits(&form)))
}

async fn pressure_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<Json<Assessment<AcademicPressureLevel>>, AppError> {
    let form = PressureForm::from_fields(&fields(&headers, payload)?);
    Ok(Json(state.router.academic_pressure(&form)))
}

async fn goals_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<Json<GoalsRoadmap>, AppError> {
    let form = GoalsForm::from_fields(&fields(&headers, payload)?);
    Ok(Json(state.router.goals(&form)))
}

pub async fn serve(router: SurveyRouter, port: u16) -> anyhow::Result<()> {
    if !router.persists() {
        info!("No store attached, workload submissions will not be saved");
    }

    let state = Arc::new(AppState { router });
    let app = app(state);

    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
