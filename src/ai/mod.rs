//! AI completion service integration
//!
//! Sends the lesson-plan instruction together with the encoded reference
//! documents to a hosted text-generation API and returns the generated plan.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiCompletionClient;
pub use mock::MockCompletionClient;

use crate::models::{GenerationRequest, GenerationResult};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// One request, one answer. Implementations never retry; every failure
    /// surfaces as [`crate::Error::Service`].
    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}
