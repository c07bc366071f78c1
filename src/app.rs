//! Lesson-plan orchestration: validate the form, encode documents, ask the
//! completion service, hold the outcome and export it on demand.

use crate::ai::{CompletionService, GeminiCompletionClient};
use crate::encoder::encode_paths;
use crate::export::{export_plan, ExportSink, FsExportSink};
use crate::models::{Config, GenerationRequest, GenerationResult, GenerationState, LessonForm};
use crate::prompts::build_lesson_prompt;
use crate::render::render;
use crate::{Error, Result};
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{error, info};

/// Holds the form outcome and drives one generation at a time.
///
/// `generate` takes `&mut self`, so a second request cannot start until the
/// first settles. Every state transition is published on a watch channel; a
/// UI disables its generate control while the state is `Loading`.
pub struct LessonPlanner {
    completion: Box<dyn CompletionService>,
    sink: Box<dyn ExportSink>,
    state: GenerationState,
    topic: String,
    state_tx: watch::Sender<GenerationState>,
}

/// Injectable service bundle used to construct [`LessonPlanner`] in tests/harnesses.
pub struct PlannerServices {
    pub completion: Box<dyn CompletionService>,
    pub sink: Box<dyn ExportSink>,
}

impl LessonPlanner {
    /// Build a planner from concrete service dependencies.
    pub fn with_services(services: PlannerServices) -> Self {
        let (state_tx, _) = watch::channel(GenerationState::Idle);
        Self {
            completion: services.completion,
            sink: services.sink,
            state: GenerationState::Idle,
            topic: String::new(),
            state_tx,
        }
    }

    /// Construct a planner from configuration, exporting into `output_dir`
    /// (or the configured directory when `None`).
    pub fn from_config(config: &Config, output_dir: Option<PathBuf>) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
        let completion = GeminiCompletionClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_timeout,
        );
        let sink = FsExportSink::new(&output_dir);
        info!(
            "Completion provider: Gemini (model: {}), exports go to {}",
            completion.model(),
            sink.output_dir().display()
        );

        Self::with_services(PlannerServices {
            completion: Box::new(completion),
            sink: Box::new(sink),
        })
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state_tx.subscribe()
    }

    /// Runs one generation for the form.
    ///
    /// Validation failures return `Err` before any I/O and leave the state
    /// untouched. Once validation passes, the previous result is cleared and
    /// the outcome (success or failure) lands in [`Self::state`]; this call
    /// then returns `Ok` with a reference to it.
    pub async fn generate(&mut self, form: &LessonForm) -> Result<&GenerationState> {
        form.validate()?;

        self.state.begin();
        self.topic = form.topic.clone();
        self.publish();
        info!(
            "Generating lesson plan for '{}' ({}) from {} documents",
            form.topic,
            form.duration,
            form.files.len()
        );

        let outcome = self.request_plan(form).await;
        if let Err(e) = &outcome {
            error!("Lesson plan generation failed: {}", e);
        }

        self.state.settle(outcome)?;
        self.publish();
        Ok(&self.state)
    }

    async fn request_plan(&self, form: &LessonForm) -> Result<GenerationResult> {
        let parts = encode_paths(&form.files).await?;
        if parts.len() != form.files.len() {
            return Err(Error::Invariant(format!(
                "Encoded {} parts for {} documents",
                parts.len(),
                form.files.len()
            )));
        }

        let request = GenerationRequest {
            prompt_text: build_lesson_prompt(&form.topic, form.duration.label()),
            parts,
        };

        self.completion.complete(&request).await
    }

    /// Rendered markup of the current plan, recomputed on every call.
    pub fn rendered_plan(&self) -> Option<String> {
        self.state.result().map(|result| render(&result.raw_text))
    }

    /// Exports the current plan. `Ok(None)` when there is no plan to export.
    pub async fn download(&self) -> Result<Option<PathBuf>> {
        let markup = self.rendered_plan().unwrap_or_default();
        export_plan(self.sink.as_ref(), &markup, &self.topic).await
    }

    fn publish(&self) {
        // send_replace never fails, even with no subscribers.
        self.state_tx.send_replace(self.state.clone());
    }
}
