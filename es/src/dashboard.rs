//! Dashboard view state and the generation request lifecycle
//!
//! The dashboard owns the path collection, the topic input and the search
//! term. Submissions spawn independent generation tasks whose outcomes come
//! back over a channel; the owner applies them one at a time, so every
//! mutation happens on the owning task. Outcomes are applied in resolution
//! order, not submission order, and nothing is ever cancelled.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::StaleResultPolicy;
use crate::path::{GenerationFailure, LearningPath, PathCollection, PathGenerator, Topic, TopicError};

/// Identifier handed out per submission, increasing in submission order
pub type RequestId = u64;

/// A resolved generation request, waiting to be applied
#[derive(Debug)]
pub struct GenerationOutcome {
    pub request_id: RequestId,
    pub topic: Topic,
    pub result: Result<LearningPath, GenerationFailure>,
}

/// What applying an outcome did to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The path was prepended and the topic input cleared
    Recorded,
    /// Generation failed; nothing changed except the last failure
    Failed(GenerationFailure),
    /// A newer submission superseded this request; nothing changed
    Discarded,
}

/// Request lifecycle as seen by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Generating { in_flight: usize },
}

/// Dashboard view state
pub struct Dashboard {
    generator: Arc<PathGenerator>,
    stale_results: StaleResultPolicy,
    paths: PathCollection,
    topic_input: String,
    in_flight: HashSet<RequestId>,
    next_request_id: RequestId,
    last_failure: Option<GenerationFailure>,
    outcome_tx: mpsc::UnboundedSender<GenerationOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<GenerationOutcome>,
}

impl Dashboard {
    pub fn new(generator: Arc<PathGenerator>, stale_results: StaleResultPolicy) -> Self {
        debug!(?stale_results, "Dashboard::new: called");
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            generator,
            stale_results,
            paths: PathCollection::new(),
            topic_input: String::new(),
            in_flight: HashSet::new(),
            next_request_id: 0,
            last_failure: None,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn set_topic_input(&mut self, text: impl Into<String>) {
        self.topic_input = text.into();
    }

    pub fn topic_input(&self) -> &str {
        &self.topic_input
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.paths.set_search_term(term);
    }

    pub fn search_term(&self) -> &str {
        self.paths.search_term()
    }

    pub fn visible_paths(&self) -> Vec<&LearningPath> {
        self.paths.visible_paths()
    }

    pub fn paths(&self) -> &PathCollection {
        &self.paths
    }

    /// Most recent failure, cleared by the next recorded path
    pub fn last_failure(&self) -> Option<&GenerationFailure> {
        self.last_failure.as_ref()
    }

    pub fn state(&self) -> LifecycleState {
        if self.in_flight.is_empty() {
            LifecycleState::Idle
        } else {
            LifecycleState::Generating {
                in_flight: self.in_flight.len(),
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Whether the submit control should be enabled: idle with a non-blank topic
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.topic_input.trim().is_empty()
    }

    /// Submit the current topic input
    ///
    /// Only the non-blank precondition is enforced here; submitting while
    /// another request is in flight starts a second independent request.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self) -> Result<RequestId, TopicError> {
        let topic = Topic::parse(&self.topic_input)?;
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight.insert(request_id);
        info!(request_id, %topic, in_flight = self.in_flight.len(), "submit: generating");

        let generator = self.generator.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = generator.generate(&topic).await;
            if tx
                .send(GenerationOutcome {
                    request_id,
                    topic,
                    result,
                })
                .is_err()
            {
                debug!(request_id, "submit: dashboard dropped before outcome arrived");
            }
        });

        Ok(request_id)
    }

    /// Wait for the next request to resolve; `None` when nothing is in flight
    pub async fn next_outcome(&mut self) -> Option<GenerationOutcome> {
        if self.in_flight.is_empty() {
            return None;
        }
        self.outcome_rx.recv().await
    }

    fn is_superseded(&self, request_id: RequestId) -> bool {
        self.stale_results == StaleResultPolicy::LatestOnly && request_id + 1 != self.next_request_id
    }

    /// Apply a resolved request to the view state
    pub fn apply(&mut self, outcome: GenerationOutcome) -> Applied {
        let GenerationOutcome {
            request_id,
            topic,
            result,
        } = outcome;
        self.in_flight.remove(&request_id);

        if self.is_superseded(request_id) {
            debug!(request_id, %topic, "apply: superseded, discarding");
            return Applied::Discarded;
        }

        match result {
            Ok(path) => {
                info!(request_id, %topic, "apply: recording path");
                self.paths.record_path(path);
                self.topic_input.clear();
                self.last_failure = None;
                Applied::Recorded
            }
            Err(failure) => {
                warn!(request_id, %topic, error = %failure, "apply: generation failed");
                self.last_failure = Some(failure.clone());
                Applied::Failed(failure)
            }
        }
    }

    /// Wait for the next outcome and apply it
    pub async fn resolve_next(&mut self) -> Option<Applied> {
        let outcome = self.next_outcome().await?;
        Some(self.apply(outcome))
    }

    /// Resolve everything currently in flight, in resolution order
    pub async fn settle(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Some(result) = self.resolve_next().await {
            applied.push(result);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
    use async_trait::async_trait;

    /// Answers with a path for whatever topic the instruction names; topics containing "fail" error out
    struct EchoLlmClient;

    fn quoted_topic(request: &CompletionRequest) -> String {
        let text = &request.messages[0].content;
        let start = text.find('"').map(|i| i + 1).unwrap_or(0);
        let end = text.rfind('"').unwrap_or(text.len());
        text[start..end].to_string()
    }

    #[async_trait]
    impl LlmClient for EchoLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let topic = quoted_topic(&request);
            if topic.contains("fail") {
                return Err(LlmError::ApiError {
                    status: 503,
                    message: "overloaded".to_string(),
                });
            }
            let doc = serde_json::json!({
                "topic": topic,
                "steps": (1..=5).map(|i| serde_json::json!({
                    "title": format!("Step {i}"),
                    "description": "Learn it",
                    "duration": "1 week",
                    "resources": ["docs", "videos"],
                })).collect::<Vec<_>>(),
            });
            Ok(CompletionResponse {
                content: Some(doc.to_string()),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        }

        fn provider(&self) -> &str {
            "echo"
        }
    }

    fn dashboard_with(llm: Arc<dyn LlmClient>, policy: StaleResultPolicy) -> Dashboard {
        let generator = Arc::new(PathGenerator::new(llm, &GenerationConfig::default()));
        Dashboard::new(generator, policy)
    }

    fn echo_dashboard() -> Dashboard {
        dashboard_with(Arc::new(EchoLlmClient), StaleResultPolicy::ApplyAll)
    }

    #[test]
    fn test_can_submit_requires_topic() {
        let mut dashboard = echo_dashboard();
        assert!(!dashboard.can_submit());

        dashboard.set_topic_input("   ");
        assert!(!dashboard.can_submit());

        dashboard.set_topic_input("Rust");
        assert!(dashboard.can_submit());
    }

    #[tokio::test]
    async fn test_blank_topic_never_reaches_generator() {
        let client = Arc::new(MockLlmClient::new(vec![]));
        let mut dashboard = dashboard_with(client.clone(), StaleResultPolicy::ApplyAll);
        dashboard.set_topic_input("  ");

        assert_eq!(dashboard.submit(), Err(TopicError::Empty));
        assert!(!dashboard.is_loading());
        assert!(dashboard.next_outcome().await.is_none());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_round_trip() {
        let mut dashboard = echo_dashboard();
        dashboard.set_topic_input("Python");

        dashboard.submit().unwrap();
        assert!(dashboard.is_loading());
        assert_eq!(dashboard.state(), LifecycleState::Generating { in_flight: 1 });
        assert!(!dashboard.can_submit());

        assert_eq!(dashboard.resolve_next().await, Some(Applied::Recorded));
        assert_eq!(dashboard.state(), LifecycleState::Idle);
        assert_eq!(dashboard.topic_input(), "");

        let visible = dashboard.visible_paths();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].topic, "Python");
        assert_eq!(visible[0].steps.len(), 5);
    }

    #[tokio::test]
    async fn test_failure_keeps_input_and_collection() {
        let mut dashboard = echo_dashboard();
        dashboard.set_topic_input("how to fail");

        dashboard.submit().unwrap();
        assert!(dashboard.is_loading());

        let applied = dashboard.resolve_next().await.unwrap();
        assert!(matches!(applied, Applied::Failed(ref f) if f.is_transport()));
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.topic_input(), "how to fail");
        assert!(dashboard.visible_paths().is_empty());
        assert!(dashboard.last_failure().is_some());
    }

    #[tokio::test]
    async fn test_success_clears_last_failure() {
        let mut dashboard = echo_dashboard();
        dashboard.set_topic_input("fail fast");
        dashboard.submit().unwrap();
        dashboard.settle().await;
        assert!(dashboard.last_failure().is_some());

        dashboard.set_topic_input("Go");
        dashboard.submit().unwrap();
        dashboard.settle().await;
        assert!(dashboard.last_failure().is_none());
    }

    #[tokio::test]
    async fn test_search_filters_without_mutating() {
        let mut dashboard = echo_dashboard();
        for topic in ["Machine Learning", "Pottery"] {
            dashboard.set_topic_input(topic);
            dashboard.submit().unwrap();
            dashboard.settle().await;
        }

        dashboard.set_search_term("MACHINE");
        let visible: Vec<_> = dashboard.visible_paths().iter().map(|p| p.topic.clone()).collect();
        assert_eq!(visible, vec!["Machine Learning"]);
        assert_eq!(dashboard.paths().len(), 2);

        dashboard.set_search_term("");
        assert_eq!(dashboard.visible_paths().len(), 2);
        assert_eq!(dashboard.visible_paths()[0].topic, "Pottery");
    }

    #[tokio::test]
    async fn test_latest_only_discards_superseded_results() {
        let mut dashboard = dashboard_with(Arc::new(EchoLlmClient), StaleResultPolicy::LatestOnly);

        dashboard.set_topic_input("A");
        let first = dashboard.submit().unwrap();
        dashboard.set_topic_input("B");
        let second = dashboard.submit().unwrap();
        assert!(second > first);

        let applied = dashboard.settle().await;
        assert_eq!(applied.len(), 2);
        assert_eq!(applied.iter().filter(|a| **a == Applied::Discarded).count(), 1);

        let topics: Vec<_> = dashboard.visible_paths().iter().map(|p| p.topic.clone()).collect();
        assert_eq!(topics, vec!["B"]);
    }

    #[tokio::test]
    async fn test_apply_all_records_both_overlapping_results() {
        let mut dashboard = echo_dashboard();

        dashboard.set_topic_input("A");
        dashboard.submit().unwrap();
        dashboard.set_topic_input("B");
        dashboard.submit().unwrap();
        assert_eq!(dashboard.state(), LifecycleState::Generating { in_flight: 2 });

        let applied = dashboard.settle().await;
        assert_eq!(applied, vec![Applied::Recorded, Applied::Recorded]);
        assert_eq!(dashboard.paths().len(), 2);
    }
}
