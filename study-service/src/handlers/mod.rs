//! HTTP handlers for study-service.
//!
//! Every `/api/*` handler reads its fields, builds a prompt (or resolves a chat
//! session), calls the model once, and wraps the text in a success envelope.
//! Failures of any kind become [`ApiError`], which renders the failure envelope.

pub mod chat;
pub mod error;
pub mod health;
pub mod metrics;
pub mod study;

pub use chat::chat;
pub use error::{ApiError, EnvelopeJson};
pub use health::health_check;
pub use study::{code_review, explain, quiz, resources, study_plan};

use crate::services::{metrics as service_metrics, ProviderError};
use std::future::Future;
use std::time::Instant;

/// Await one model call, recording its latency and error kind.
async fn call_model<F>(
    provider: &'static str,
    operation: &'static str,
    call: F,
) -> Result<String, ApiError>
where
    F: Future<Output = Result<String, ProviderError>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed().as_secs_f64();

    service_metrics::record_provider_call(
        provider,
        operation,
        elapsed,
        result.as_ref().err().map(ProviderError::kind),
    );

    match &result {
        Ok(text) => tracing::debug!(
            provider,
            operation,
            elapsed_secs = elapsed,
            response_len = text.len(),
            "Model call completed"
        ),
        Err(e) => tracing::warn!(provider, operation, error = %e, "Model call failed"),
    }

    Ok(result?)
}
