//! EdSkill - AI-generated learning paths
//!
//! A user signs in, types a topic, and a generation provider returns a
//! structured learning path (a topic plus ordered steps with titles,
//! descriptions, durations and resource keywords). Paths are kept in memory,
//! newest first, and can be filtered by topic.
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait plus Gemini and OpenAI providers
//! - [`path`] - Learning path documents, schema, generator and collection
//! - [`session`] - Sign-in state machine
//! - [`dashboard`] - Generation request lifecycle and view state
//! - [`render`] - Terminal rendering of path cards
//! - [`repl`] - Interactive front-end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod llm;
pub mod path;
pub mod render;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use config::{Config, GenerationConfig, LlmConfig, SessionConfig, StaleResultPolicy};
pub use dashboard::{Applied, Dashboard, GenerationOutcome, LifecycleState, RequestId};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, create_client};
pub use path::{
    GenerationFailure, LearningPath, LearningStep, PathCollection, PathGenerator, Topic, TopicError,
    learning_path_schema,
};
pub use session::{AuthError, Authenticator, Credentials, Identity, Session, SessionState, SimulatedAuthenticator};
