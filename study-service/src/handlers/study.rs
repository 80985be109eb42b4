//! Single-shot generation endpoints: study plans, quizzes, explanations,
//! code review and resource recommendations.

use super::{call_model, ApiError, EnvelopeJson};
use crate::models::{
    CodeReviewRequest, CodeReviewResponse, ExplainRequest, ExplainResponse, FieldValue,
    QuizRequest, QuizResponse, ResourcesRequest, ResourcesResponse, StudyPlanRequest,
    StudyPlanResponse,
};
use crate::services::prompts::{
    self, DEFAULT_DIFFICULTY, DEFAULT_DURATION_DAYS, DEFAULT_HOURS_PER_DAY, DEFAULT_LANGUAGE,
    DEFAULT_LEVEL, DEFAULT_NUM_QUESTIONS, DEFAULT_RESOURCE_TYPE,
};
use crate::startup::AppState;
use axum::{extract::State, Json};

async fn generate(
    state: &AppState,
    operation: &'static str,
    prompt: &str,
) -> Result<String, ApiError> {
    call_model(state.model.name(), operation, state.model.generate(prompt)).await
}

/// `POST /api/study-plan`
#[tracing::instrument(skip_all)]
pub async fn study_plan(
    State(state): State<AppState>,
    EnvelopeJson(request): EnvelopeJson<StudyPlanRequest>,
) -> Result<Json<StudyPlanResponse>, ApiError> {
    let subject = FieldValue::or(request.subject, "");
    let duration = FieldValue::or(request.duration, DEFAULT_DURATION_DAYS);
    let hours_per_day = FieldValue::or(request.hours_per_day, DEFAULT_HOURS_PER_DAY);

    let prompt = prompts::study_plan_prompt(&subject, &duration, &hours_per_day);
    let study_plan = generate(&state, "study_plan", &prompt).await?;

    Ok(Json(StudyPlanResponse {
        success: true,
        study_plan,
        subject,
        duration,
    }))
}

/// `POST /api/quiz`
#[tracing::instrument(skip_all)]
pub async fn quiz(
    State(state): State<AppState>,
    EnvelopeJson(request): EnvelopeJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let topic = FieldValue::or(request.topic, "");
    let num_questions = FieldValue::or(request.num_questions, DEFAULT_NUM_QUESTIONS);
    let difficulty = FieldValue::or(request.difficulty, DEFAULT_DIFFICULTY);

    let prompt = prompts::quiz_prompt(&topic, &num_questions, &difficulty);
    let quiz = generate(&state, "quiz", &prompt).await?;

    Ok(Json(QuizResponse {
        success: true,
        quiz,
        topic,
        num_questions,
    }))
}

/// `POST /api/explain`. The level shapes the prompt but is not echoed.
#[tracing::instrument(skip_all)]
pub async fn explain(
    State(state): State<AppState>,
    EnvelopeJson(request): EnvelopeJson<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let concept = FieldValue::or(request.concept, "");
    let level = FieldValue::or(request.level, DEFAULT_LEVEL);

    let prompt = prompts::explain_prompt(&concept, &level);
    let explanation = generate(&state, "explain", &prompt).await?;

    Ok(Json(ExplainResponse {
        success: true,
        explanation,
        concept,
    }))
}

/// `POST /api/code-review`
#[tracing::instrument(skip_all)]
pub async fn code_review(
    State(state): State<AppState>,
    EnvelopeJson(request): EnvelopeJson<CodeReviewRequest>,
) -> Result<Json<CodeReviewResponse>, ApiError> {
    let code = FieldValue::or(request.code, "");
    let language = FieldValue::or(request.language, DEFAULT_LANGUAGE);

    let prompt = prompts::code_review_prompt(&code, &language);
    let review = generate(&state, "code_review", &prompt).await?;

    Ok(Json(CodeReviewResponse {
        success: true,
        review,
        language,
    }))
}

/// `POST /api/resources`
#[tracing::instrument(skip_all)]
pub async fn resources(
    State(state): State<AppState>,
    EnvelopeJson(request): EnvelopeJson<ResourcesRequest>,
) -> Result<Json<ResourcesResponse>, ApiError> {
    let topic = FieldValue::or(request.topic, "");
    let resource_type = FieldValue::or(request.resource_type, DEFAULT_RESOURCE_TYPE);

    let prompt = prompts::resources_prompt(&topic, &resource_type);
    let resources = generate(&state, "resources", &prompt).await?;

    Ok(Json(ResourcesResponse {
        success: true,
        resources,
        topic,
    }))
}
