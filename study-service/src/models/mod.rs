//! Request and response shapes for the study API.

pub mod envelope;
pub mod requests;

pub use envelope::{
    ChatResponse, CodeReviewResponse, ErrorEnvelope, ExplainResponse, HealthResponse,
    QuizResponse, ResourcesResponse, StudyPlanResponse,
};
pub use requests::{
    ChatRequest, CodeReviewRequest, ExplainRequest, FieldValue, QuizRequest, ResourcesRequest,
    StudyPlanRequest,
};
