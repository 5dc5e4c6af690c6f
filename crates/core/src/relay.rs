use crate::domain::recommendation::{
    RecommendationRequest, RecommendationResponse, ValidationError,
};
use crate::llm::error::InferenceError;
use crate::llm::{ChatMessage, InferenceClient};
use crate::prompt::{self, SYSTEM_PROMPT};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    Validation(ValidationError),
    BackendUnavailable(String),
    BackendProtocol(String),
    Unexpected(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Validation(err) => write!(f, "{err}"),
            RelayError::BackendUnavailable(detail)
            | RelayError::BackendProtocol(detail)
            | RelayError::Unexpected(detail) => f.write_str(detail),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<ValidationError> for RelayError {
    fn from(err: ValidationError) -> Self {
        RelayError::Validation(err)
    }
}

impl From<InferenceError> for RelayError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Unavailable { .. } => RelayError::BackendUnavailable(
                "Could not connect to LM Studio API. Is it running?".to_string(),
            ),
            InferenceError::EmptyChoices => RelayError::BackendProtocol(
                "LM Studio did not return a valid recommendation.".to_string(),
            ),
            InferenceError::Protocol { detail } => {
                RelayError::BackendProtocol(format!("Error from LM Studio API: {detail}"))
            }
            InferenceError::Other { detail } => {
                RelayError::Unexpected(format!("An unexpected error occurred: {detail}"))
            }
        }
    }
}

/// Turns recommendation requests into a single chat completion call.
#[derive(Clone)]
pub struct Relay {
    client: Arc<dyn InferenceClient>,
}

impl Relay {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    pub async fn generate_recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, RelayError> {
        request.validate()?;

        let prompt = prompt::render_prompt(&request.items);
        tracing::info!(
            user_id = request.user_id,
            items = prompt.item_count,
            total_spending = prompt.total_spending,
            model = self.client.model(),
            "sending prompt to inference endpoint"
        );
        tracing::debug!(prompt = %prompt.text, "outbound prompt");

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt.text),
        ];

        let content = self.client.chat(messages).await.map_err(|err| {
            tracing::warn!(error = %err, "inference call failed");
            RelayError::from(err)
        })?;

        Ok(RecommendationResponse {
            recommendation: content.trim().to_string(),
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::FinancialItem;
    use crate::llm::Role;
    use std::sync::Mutex;

    struct FakeClient {
        reply: Result<String, InferenceError>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl FakeClient {
        fn new(reply: Result<String, InferenceError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Vec<ChatMessage>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl InferenceClient for FakeClient {
        fn model(&self) -> &str {
            "fake-model"
        }

        async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, InferenceError> {
            self.calls.lock().unwrap().push(messages);
            self.reply.clone()
        }
    }

    fn request(items: Vec<FinancialItem>) -> RecommendationRequest {
        RecommendationRequest { user_id: 7, items }
    }

    fn item(name: &str, price: f64) -> FinancialItem {
        FinancialItem {
            name: name.to_string(),
            price,
            category: None,
            date_added: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn returns_trimmed_recommendation_with_timestamp() {
        let fake = FakeClient::new(Ok("\n  Build an emergency fund first.  \n".to_string()));
        let relay = Relay::new(fake.clone());

        let before = Utc::now();
        let res = relay
            .generate_recommendation(&request(vec![item("Rent", 1200.0), item("Coffee", 4.5)]))
            .await
            .unwrap();

        assert_eq!(res.recommendation, "Build an emergency fund first.");
        assert!(res.generated_at >= before);

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        let messages = &calls[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("- Rent: $1200.00\n- Coffee: $4.50"));
        assert!(messages[1].content.contains("approximately $1204.50."));
    }

    #[tokio::test]
    async fn empty_items_never_reach_the_backend() {
        let fake = FakeClient::new(Ok("unused".to_string()));
        let relay = Relay::new(fake.clone());

        let err = relay.generate_recommendation(&request(vec![])).await.unwrap_err();
        assert_eq!(err, RelayError::Validation(ValidationError::EmptyItems));
        assert_eq!(err.to_string(), "No financial items provided for recommendation.");
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn non_positive_price_never_reaches_the_backend() {
        let fake = FakeClient::new(Ok("unused".to_string()));
        let relay = Relay::new(fake.clone());

        let err = relay
            .generate_recommendation(&request(vec![item("Rent", 0.0)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RelayError::Validation(ValidationError::NonPositivePrice { index: 0, .. })
        ));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn maps_backend_failures() {
        let cases = [
            (
                InferenceError::Unavailable {
                    detail: "connection refused".to_string(),
                },
                RelayError::BackendUnavailable(
                    "Could not connect to LM Studio API. Is it running?".to_string(),
                ),
            ),
            (
                InferenceError::EmptyChoices,
                RelayError::BackendProtocol(
                    "LM Studio did not return a valid recommendation.".to_string(),
                ),
            ),
            (
                InferenceError::Protocol {
                    detail: "status=500".to_string(),
                },
                RelayError::BackendProtocol("Error from LM Studio API: status=500".to_string()),
            ),
            (
                InferenceError::Other {
                    detail: "operation timed out".to_string(),
                },
                RelayError::Unexpected(
                    "An unexpected error occurred: operation timed out".to_string(),
                ),
            ),
        ];

        for (backend_err, expected) in cases {
            let relay = Relay::new(FakeClient::new(Err(backend_err)));
            let err = relay
                .generate_recommendation(&request(vec![item("Rent", 1200.0)]))
                .await
                .unwrap_err();
            assert_eq!(err, expected);
        }
    }
}
