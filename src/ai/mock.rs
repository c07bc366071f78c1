use super::CompletionService;
use crate::models::{GenerationRequest, GenerationResult, GenerationState};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Scripted completion service for tests and dry runs.
#[derive(Clone)]
pub struct MockCompletionClient {
    responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    state_probe: Arc<Mutex<Option<watch::Receiver<GenerationState>>>>,
    observed_states: Arc<Mutex<Vec<GenerationState>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            state_probe: Arc::new(Mutex::new(None)),
            observed_states: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, text: String) -> Self {
        self.responses.lock().unwrap().push(Ok(text));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    /// Snapshots the planner state each time `complete` is called.
    pub fn observe_state(&self, receiver: watch::Receiver<GenerationState>) {
        *self.state_probe.lock().unwrap() = Some(receiver);
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn get_observed_states(&self) -> Vec<GenerationState> {
        self.observed_states.lock().unwrap().clone()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletionClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let index = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count - 1
        };
        self.requests.lock().unwrap().push(request.clone());

        if let Some(receiver) = self.state_probe.lock().unwrap().as_ref() {
            let current = receiver.borrow().clone();
            self.observed_states.lock().unwrap().push(current);
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            return Ok(GenerationResult {
                raw_text: format!(
                    "**Kế hoạch bài giảng**\nTài liệu đính kèm: {}",
                    request.parts.len()
                ),
            });
        }

        match &responses[index % responses.len()] {
            Ok(text) => Ok(GenerationResult {
                raw_text: text.clone(),
            }),
            Err(message) => Err(Error::Service(message.clone())),
        }
    }
}
