use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP transport for the lesson-plan request: one `generateContent` POST
/// authenticated with `x-goog-api-key`.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    pub(crate) base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.5-flash`);
    /// a leading `models/` segment is stripped.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends one `generateContent` call carrying the lesson prompt and the
    /// encoded documents.
    ///
    /// Exactly one attempt is made. Transport errors, non-2xx statuses and
    /// unparsable bodies all come back as [`Error::Service`], with the
    /// upstream detail kept in the log rather than shown to the user.
    pub async fn generate_content<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        request: &Req,
    ) -> Result<Resp> {
        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| service_error("request to Gemini failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| service_error("could not read Gemini response body", e))?;

        if !status.is_success() {
            return Err(service_error(
                &format!("Gemini returned status {}", status),
                body,
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Unparsable Gemini body: {}", body);
            service_error("could not parse Gemini response", e)
        })
    }
}

fn service_error(context: &str, detail: impl std::fmt::Display) -> Error {
    tracing::error!("{}: {}", context, detail);
    Error::Service(format!("{}: {}", context, detail))
}
