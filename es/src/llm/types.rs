//! LLM request/response types for EdSkill
//!
//! Provider-agnostic shapes for a single structured-output completion.
//! Each provider client translates these into its own wire format.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (may be empty, in which case it is omitted on the wire)
    pub system_prompt: String,

    /// User messages (a single instruction for path generation)
    pub messages: Vec<Message>,

    /// Max tokens for response (capped by the client's configured maximum)
    pub max_tokens: u32,

    /// Schema the response text must conform to, if structured output is wanted
    pub response_schema: Option<ResponseSchema>,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A named JSON Schema constraining the response text
///
/// The schema is written in lower-case JSON Schema form; providers that want a
/// different dialect convert it on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    /// Create a new response schema
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        let name = name.into();
        debug!(%name, "ResponseSchema::new: called");
        Self { name, schema }
    }

    /// Convert to Gemini `responseSchema` format (OpenAPI subset, upper-case type names)
    pub fn to_gemini_schema(&self) -> serde_json::Value {
        debug!(%self.name, "ResponseSchema::to_gemini_schema: called");
        let mut schema = self.schema.clone();
        uppercase_types(&mut schema);
        schema
    }

    /// Convert to OpenAI `response_format.json_schema` format
    ///
    /// Strict mode requires every object to forbid additional properties.
    pub fn to_openai_schema(&self) -> serde_json::Value {
        debug!(%self.name, "ResponseSchema::to_openai_schema: called");
        let mut schema = self.schema.clone();
        close_objects(&mut schema);
        serde_json::json!({
            "name": self.name,
            "strict": true,
            "schema": schema,
        })
    }
}

fn uppercase_types(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "type"
                    && let serde_json::Value::String(s) = child
                {
                    *s = s.to_uppercase();
                } else {
                    uppercase_types(child);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(uppercase_types),
        _ => {}
    }
}

fn close_objects(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type").and_then(|t| t.as_str()) == Some("object") {
                map.insert("additionalProperties".to_string(), serde_json::Value::Bool(false));
            }
            for (key, child) in map.iter_mut() {
                if key != "additionalProperties" {
                    close_objects(child);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(close_objects),
        _ => {}
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage reported by the provider
    pub usage: TokenUsage,
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ContentFiltered,
}

impl StopReason {
    /// Parse from Gemini `finishReason`
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "StopReason::from_gemini: called");
        match s {
            "STOP" => StopReason::EndTurn,
            "MAX_TOKENS" => StopReason::MaxTokens,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => StopReason::ContentFiltered,
            _ => {
                debug!("StopReason::from_gemini: unknown, defaulting to EndTurn");
                StopReason::EndTurn
            }
        }
    }

    /// Parse from OpenAI `finish_reason`
    pub fn from_openai(s: &str) -> Self {
        debug!(%s, "StopReason::from_openai: called");
        match s {
            "stop" => StopReason::EndTurn,
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::ContentFiltered,
            _ => {
                debug!("StopReason::from_openai: unknown, defaulting to EndTurn");
                StopReason::EndTurn
            }
        }
    }
}

/// Token usage for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
