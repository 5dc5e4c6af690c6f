use crate::config::Settings;
use crate::llm::error::InferenceError;
use crate::llm::{ChatMessage, InferenceClient};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

/// Client for an OpenAI-compatible chat-completion server such as LM Studio.
#[derive(Debug, Clone)]
pub struct LmStudioClient {
    http: reqwest::Client,
    url: String,
    model: String,
}

impl LmStudioClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(
            settings.lm_studio_api_base_url.clone(),
            settings.lm_studio_model_name.clone(),
            settings.lm_studio_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn new(url: String, model: String, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build LM Studio http client")?;

        Ok(Self { http, url, model })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn create_completion(
        &self,
        req: &ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse, InferenceError> {
        let res = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = res.status();
        let text = res.text().await.map_err(|e| InferenceError::Other {
            detail: format!("failed to read LM Studio response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(InferenceError::Protocol {
                detail: format!("status={status} body={text}"),
            });
        }

        serde_json::from_str::<ChatCompletionResponse>(&text).map_err(|e| {
            InferenceError::Protocol {
                detail: format!("response is not a chat completion ({e}): {text}"),
            }
        })
    }
}

fn classify_send_error(err: reqwest::Error) -> InferenceError {
    if err.is_connect() {
        InferenceError::Unavailable {
            detail: err.to_string(),
        }
    } else {
        InferenceError::Other {
            detail: err.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl InferenceClient for LmStudioClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, InferenceError> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let res = self.create_completion(&req).await?;
        res.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(InferenceError::EmptyChoices)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    content: String,
}
