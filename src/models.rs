//! Data models and structures
//!
//! Defines the form input, the request/response values exchanged with the
//! completion service, the generation lifecycle state and configuration.

use crate::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A reference document picked by the teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub raw_bytes: Vec<u8>,
}

/// A document ready to be attached to a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPart {
    pub mime_type: String,
    pub base64_data: String,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt_text: String,
    pub parts: Vec<EncodedPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub raw_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LessonDuration {
    #[value(name = "35")]
    Minutes35,
    #[default]
    #[value(name = "45")]
    Minutes45,
}

impl LessonDuration {
    pub fn label(self) -> &'static str {
        match self {
            LessonDuration::Minutes35 => "35 phút",
            LessonDuration::Minutes45 => "45 phút",
        }
    }
}

impl fmt::Display for LessonDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the teacher filled in before pressing "generate".
#[derive(Debug, Clone)]
pub struct LessonForm {
    pub topic: String,
    pub duration: LessonDuration,
    pub files: Vec<PathBuf>,
}

impl LessonForm {
    /// Presence checks only: a non-blank topic and at least one document.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(Error::Validation("topic is empty".to_string()));
        }
        if self.files.is_empty() {
            return Err(Error::Validation("no documents attached".to_string()));
        }
        Ok(())
    }
}

/// Lifecycle of a single generation.
///
/// Replaces independent result/error/loading flags: a request moves
/// `Loading` exactly once at start and settles exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Success(GenerationResult),
    Failure(String),
}

impl GenerationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationState::Loading)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            GenerationState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            GenerationState::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Clears any previous outcome and marks a request as in flight.
    ///
    /// Exclusive access to the owner is what keeps requests from overlapping;
    /// a `Loading` left behind by a dropped request is simply replaced.
    pub fn begin(&mut self) {
        *self = GenerationState::Loading;
    }

    /// Records the outcome of the in-flight request.
    pub fn settle(&mut self, outcome: Result<GenerationResult>) -> Result<()> {
        if !self.is_loading() {
            return Err(Error::Invariant(
                "settle called without a request in flight".to_string(),
            ));
        }
        *self = match outcome {
            Ok(result) => GenerationState::Success(result),
            Err(e) => GenerationState::Failure(e.user_message().to_string()),
        };
        Ok(())
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_timeout: Duration,
    pub output_dir: PathBuf,
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_OUTPUT_DIR: &str = "output";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let gemini_timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number of seconds (got '{}')",
                        raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_timeout,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }
}
