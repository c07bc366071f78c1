use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::ai::CompletionService;
use crate::models::{GenerationRequest, GenerationResult};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiCompletionClient {
    http: GeminiHttpClient,
}

impl GeminiCompletionClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(request.parts.len() + 1);
        parts.push(Part::Text {
            text: request.prompt_text.clone(),
        });
        parts.extend(request.parts.iter().map(Part::from));

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }
}

#[async_trait]
impl CompletionService for GeminiCompletionClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        tracing::debug!(
            "Requesting lesson plan from Gemini ({}) with {} attached documents",
            self.http.model(),
            request.parts.len()
        );

        let body = Self::build_request(request);
        let response: GenerateContentResponse = self.http.generate_content(&body).await?;

        // A cut-off or blocked plan must not pass for a complete one.
        if let Some(reason) = response.abnormal_finish() {
            tracing::error!("Gemini stopped early (finishReason: {})", reason);
            return Err(Error::Service(format!(
                "Gemini stopped early (finishReason: {})",
                reason
            )));
        }

        let raw_text = response
            .first_text()
            .ok_or_else(|| Error::Service("No text in Gemini response".to_string()))?;

        tracing::info!("Gemini returned a lesson plan ({} chars)", raw_text.len());
        Ok(GenerationResult { raw_text })
    }
}
