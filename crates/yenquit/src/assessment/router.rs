use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::domain::{HealthFlags, Modality};
use super::interpret::interpret;
use super::questionnaire::Questionnaire;
use super::recommend::{assess, recommend, AssessmentReport, TherapyPlan};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct InterpretRequest {
    pub(crate) score: i64,
    pub(crate) modality: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct InterpretResponse {
    pub(crate) score: i64,
    pub(crate) modality: Modality,
    pub(crate) label: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendRequest {
    pub(crate) score: i64,
    pub(crate) modality: String,
    #[serde(default, alias = "healthFlags")]
    pub(crate) health_flags: Option<HealthFlags>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) modality: String,
    pub(crate) answers: Vec<Option<usize>>,
    #[serde(default, alias = "healthFlags")]
    pub(crate) health_flags: Option<HealthFlags>,
}

/// Stateless Fagerström endpoints.
pub fn assessment_router() -> Router {
    Router::new()
        .route("/api/v1/fagerstrom/interpret", post(interpret_handler))
        .route("/api/v1/fagerstrom/recommend", post(recommend_handler))
        .route("/api/v1/fagerstrom/score", post(score_handler))
        .route(
            "/api/v1/fagerstrom/questionnaire/:modality",
            get(questionnaire_handler),
        )
}

pub(crate) async fn interpret_handler(
    payload: Result<Json<InterpretRequest>, JsonRejection>,
) -> Result<Json<InterpretResponse>, AppError> {
    let Json(request) = payload?;
    let modality: Modality = request.modality.parse()?;
    let label = interpret(request.score, modality)?;
    Ok(Json(InterpretResponse {
        score: request.score,
        modality,
        label,
    }))
}

pub(crate) async fn recommend_handler(
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<TherapyPlan>, AppError> {
    let Json(request) = payload?;
    let modality: Modality = request.modality.parse()?;
    let plan = recommend(request.score, modality, request.health_flags.as_ref())?;
    Ok(Json(plan))
}

pub(crate) async fn score_handler(
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<AssessmentReport>, AppError> {
    let Json(request) = payload?;
    let modality: Modality = request.modality.parse()?;
    let score = Questionnaire::standard(modality).total_score(&request.answers)?;
    Ok(Json(assess(score, modality, request.health_flags.as_ref())))
}

pub(crate) async fn questionnaire_handler(
    Path(modality): Path<String>,
) -> Result<Json<Questionnaire>, AppError> {
    let modality: Modality = modality.parse()?;
    Ok(Json(Questionnaire::standard(modality)))
}
