//! Learning path document shapes and their structured-output schema

use serde::{Deserialize, Serialize};

use crate::llm::ResponseSchema;

/// One step of a learning path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStep {
    /// Short step title
    pub title: String,

    /// Concise description of what to learn
    pub description: String,

    /// Advisory time estimate, e.g. "2 weeks" (never parsed)
    pub duration: String,

    /// Search keywords, usually two or three
    pub resources: Vec<String>,
}

/// A generated learning path: the requested topic and its ordered steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Subject as echoed back by the provider
    pub topic: String,

    /// Steps in the order they should be followed
    pub steps: Vec<LearningStep>,
}

impl LearningPath {
    /// Case-insensitive substring match on the topic
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn topic_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.topic.to_lowercase().contains(needle)
    }
}

/// Schema name sent to providers that want one
pub const SCHEMA_NAME: &str = "learning_path";

/// Structured-output schema for [`LearningPath`]
///
/// Every field of both objects is required.
pub fn learning_path_schema() -> ResponseSchema {
    ResponseSchema::new(
        SCHEMA_NAME,
        serde_json::json!({
            "type": "object",
            "properties": {
                "topic": { "type": "string" },
                "steps": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "duration": {
                                "type": "string",
                                "description": "Estimated time e.g. '2 weeks'"
                            },
                            "resources": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "2-3 keywords for what to search for"
                            }
                        },
                        "required": ["title", "description", "duration", "resources"]
                    }
                }
            },
            "required": ["topic", "steps"]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_every_field() {
        let schema = learning_path_schema().schema;

        assert_eq!(schema["required"], serde_json::json!(["topic", "steps"]));
        assert_eq!(
            schema["properties"]["steps"]["items"]["required"],
            serde_json::json!(["title", "description", "duration", "resources"])
        );
        assert_eq!(schema["properties"]["steps"]["items"]["properties"]["resources"]["items"]["type"], "string");
    }

    #[test]
    fn test_schema_properties_match_struct_fields() {
        let schema = learning_path_schema().schema;
        let sample = LearningPath {
            topic: "Rust".to_string(),
            steps: vec![LearningStep {
                title: "Install".to_string(),
                description: "Get rustup".to_string(),
                duration: "1 day".to_string(),
                resources: vec!["rustup".to_string()],
            }],
        };
        let value = serde_json::to_value(&sample).unwrap();

        let doc_keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        let schema_keys: Vec<_> = schema["properties"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(doc_keys.len(), schema_keys.len());
        assert!(doc_keys.iter().all(|k| schema_keys.contains(k)));

        let step_keys = value["steps"][0].as_object().unwrap().len();
        let schema_step_keys = schema["properties"]["steps"]["items"]["properties"].as_object().unwrap().len();
        assert_eq!(step_keys, schema_step_keys);
    }

    #[test]
    fn test_missing_step_field_fails_to_parse() {
        let raw = r#"{"topic":"Go","steps":[{"title":"t","description":"d","resources":[]}]}"#;
        assert!(serde_json::from_str::<LearningPath>(raw).is_err());
    }

    #[test]
    fn test_topic_contains_is_case_insensitive() {
        let path = LearningPath {
            topic: "Machine Learning".to_string(),
            steps: vec![],
        };

        assert!(path.topic_contains("machine"));
        assert!(path.topic_contains("learn"));
        assert!(path.topic_contains(""));
        assert!(!path.topic_contains("zzz"));
    }
}
