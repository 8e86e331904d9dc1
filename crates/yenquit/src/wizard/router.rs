use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde::Serialize;

use super::flow::{WizardFlow, WizardStep};
use super::service::WizardService;
use super::state::{StepAnswers, WizardState};
use super::store::WizardStore;
use crate::error::AppError;

/// Wizard state plus the page details the front-end renders.
#[derive(Debug, Serialize)]
pub struct WizardView {
    #[serde(flatten)]
    pub state: WizardState,
    pub flow_label: &'static str,
    pub step_label: &'static str,
    pub step_number: usize,
    pub total_steps: usize,
}

impl From<WizardState> for WizardView {
    fn from(state: WizardState) -> Self {
        let (step_number, total_steps) = state.progress();
        Self {
            flow_label: state.flow.label(),
            step_label: state.current_step.label(),
            step_number,
            total_steps,
            state,
        }
    }
}

pub fn wizard_router<S>(service: Arc<WizardService<S>>) -> Router
where
    S: WizardStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/wizards/:flow/:session_id",
            post(start_handler::<S>)
                .get(status_handler::<S>)
                .delete(reset_handler::<S>),
        )
        .route(
            "/api/v1/wizards/:flow/:session_id/steps/:step",
            put(record_handler::<S>),
        )
        .route(
            "/api/v1/wizards/:flow/:session_id/advance",
            post(advance_handler::<S>),
        )
        .route(
            "/api/v1/wizards/:flow/:session_id/back",
            post(back_handler::<S>),
        )
        .with_state(service)
}

type WizardResponse = Result<(StatusCode, Json<WizardView>), AppError>;

fn respond(status: StatusCode, state: WizardState) -> WizardResponse {
    Ok((status, Json(WizardView::from(state))))
}

pub(crate) async fn start_handler<S>(
    State(service): State<Arc<WizardService<S>>>,
    Path((flow, session_id)): Path<(String, String)>,
) -> WizardResponse
where
    S: WizardStore + 'static,
{
    let flow: WizardFlow = flow.parse()?;
    respond(StatusCode::CREATED, service.start(flow, &session_id)?)
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<WizardService<S>>>,
    Path((flow, session_id)): Path<(String, String)>,
) -> WizardResponse
where
    S: WizardStore + 'static,
{
    let flow: WizardFlow = flow.parse()?;
    respond(StatusCode::OK, service.get(flow, &session_id)?)
}

pub(crate) async fn reset_handler<S>(
    State(service): State<Arc<WizardService<S>>>,
    Path((flow, session_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError>
where
    S: WizardStore + 'static,
{
    let flow: WizardFlow = flow.parse()?;
    service.reset(flow, &session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn record_handler<S>(
    State(service): State<Arc<WizardService<S>>>,
    Path((flow, session_id, step)): Path<(String, String, String)>,
    answers: Result<Json<StepAnswers>, JsonRejection>,
) -> WizardResponse
where
    S: WizardStore + 'static,
{
    let Json(answers) = answers?;
    let flow: WizardFlow = flow.parse()?;
    let step: WizardStep = step.parse()?;
    respond(
        StatusCode::OK,
        service.record(flow, &session_id, step, answers)?,
    )
}

pub(crate) async fn advance_handler<S>(
    State(service): State<Arc<WizardService<S>>>,
    Path((flow, session_id)): Path<(String, String)>,
) -> WizardResponse
where
    S: WizardStore + 'static,
{
    let flow: WizardFlow = flow.parse()?;
    respond(StatusCode::OK, service.advance(flow, &session_id)?)
}

pub(crate) async fn back_handler<S>(
    State(service): State<Arc<WizardService<S>>>,
    Path((flow, session_id)): Path<(String, String)>,
) -> WizardResponse
where
    S: WizardStore + 'static,
{
    let flow: WizardFlow = flow.parse()?;
    respond(StatusCode::OK, service.back(flow, &session_id)?)
}
