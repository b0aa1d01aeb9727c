//! Learning path generation
//!
//! Turns a topic into one structured-output request, sends it through the
//! shared [`LlmClient`], and parses the reply into a [`LearningPath`]. Every
//! failure is absorbed here and reduced to a [`GenerationFailure`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::schema::{LearningPath, learning_path_schema};
use super::topic::Topic;
use crate::config::GenerationConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};

/// Output token budget asked for per path; Gemini only sends it when `max-tokens` is configured
const PATH_MAX_TOKENS: u32 = 8192;

/// Why a generation attempt produced no usable path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    /// Network, auth, quota or provider-side error
    #[error("Generation provider failed: {message}")]
    Transport { message: String, retryable: bool },

    /// Payload absent, not JSON, or not shaped like a learning path
    #[error("Malformed generation response: {message}")]
    MalformedResponse { message: String },
}

impl GenerationFailure {
    pub fn is_transport(&self) -> bool {
        matches!(self, GenerationFailure::Transport { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, GenerationFailure::MalformedResponse { .. })
    }

    /// Diagnostic detail
    pub fn message(&self) -> &str {
        match self {
            GenerationFailure::Transport { message, .. } => message,
            GenerationFailure::MalformedResponse { message } => message,
        }
    }

    /// Short text suitable for showing to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationFailure::Transport { retryable: true, .. } => {
                "The roadmap service is unavailable right now. Please try again."
            }
            GenerationFailure::Transport { retryable: false, .. } => {
                "The roadmap service rejected the request. Check the API key and quota."
            }
            GenerationFailure::MalformedResponse { .. } => "The generated roadmap could not be read. Please try again.",
        }
    }

    fn malformed(message: impl Into<String>) -> Self {
        GenerationFailure::MalformedResponse {
            message: message.into(),
        }
    }
}

impl From<LlmError> for GenerationFailure {
    fn from(err: LlmError) -> Self {
        GenerationFailure::Transport {
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

/// Parse a provider payload into a learning path
///
/// Absent or blank payloads, invalid JSON, missing required fields and
/// documents without steps are all malformed. Step count, durations and
/// resource counts are not checked.
pub fn parse_learning_path(payload: Option<&str>) -> Result<LearningPath, GenerationFailure> {
    let text = match payload.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Err(GenerationFailure::malformed("provider returned an empty payload")),
    };

    let path: LearningPath =
        serde_json::from_str(text).map_err(|e| GenerationFailure::malformed(format!("invalid learning path JSON: {e}")))?;

    if path.steps.is_empty() {
        return Err(GenerationFailure::malformed("learning path has no steps"));
    }

    Ok(path)
}

/// Generates learning paths through a shared LLM client
///
/// Stateless apart from its settings: no caching, no retries, and
/// overlapping calls are independent of each other.
pub struct PathGenerator {
    llm: Arc<dyn LlmClient>,
    step_count: u32,
    audience: String,
}

impl PathGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, config: &GenerationConfig) -> Self {
        debug!(provider = %llm.provider(), step_count = config.step_count, "PathGenerator::new: called");
        Self {
            llm,
            step_count: config.step_count,
            audience: config.audience.clone(),
        }
    }

    /// Natural-language instruction embedding the topic
    pub fn instruction(&self, topic: &Topic) -> String {
        format!(
            "Create a structured {}-step learning path for a {} wanting to learn about \"{}\". Keep descriptions concise.",
            self.step_count, self.audience, topic
        )
    }

    /// Build the provider request for `topic`
    pub fn build_request(&self, topic: &Topic) -> CompletionRequest {
        CompletionRequest {
            system_prompt: String::new(),
            messages: vec![Message::user(self.instruction(topic))],
            max_tokens: PATH_MAX_TOKENS,
            response_schema: Some(learning_path_schema()),
        }
    }

    /// Generate one learning path for `topic`
    pub async fn generate(&self, topic: &Topic) -> Result<LearningPath, GenerationFailure> {
        debug!(%topic, "generate: called");
        let response = match self.llm.complete(self.build_request(topic)).await {
            Ok(response) => response,
            Err(e) => {
                let failure = GenerationFailure::from(e);
                warn!(%topic, provider = %self.llm.provider(), error = %failure, "generate: provider call failed");
                return Err(failure);
            }
        };

        debug!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "generate: provider responded"
        );

        match parse_learning_path(response.content.as_deref()) {
            Ok(path) => {
                info!(%topic, steps = path.steps.len(), "generate: learning path ready");
                Ok(path)
            }
            Err(failure) => {
                warn!(%topic, stop_reason = ?response.stop_reason, error = %failure, "generate: unusable payload");
                Err(failure)
            }
        }
    }

    /// Generate, discarding the failure cause
    pub async fn try_generate(&self, topic: &Topic) -> Option<LearningPath> {
        self.generate(topic).await.ok()
    }
}
