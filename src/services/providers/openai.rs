//! OpenAI-compatible chat completions provider
//!
//! Posts a two-message exchange to `{api_url}/chat/completions` with
//! `response_format = json_object` and hands back the content of the first choice.
use crate::{
    config::RequestPolicy,
    error::{AppError, AppResult},
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat},
    services::providers::{build_http_client, ensure_success, with_attempts, CompletionService},
};
use reqwest::{Client as HttpClient, Request};

const PROVIDER: &str = "openai";

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    max_attempts: u32,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        policy: &RequestPolicy,
    ) -> AppResult<Self> {
        Ok(Self {
            http_client: build_http_client(policy)?,
            api_key,
            api_url,
            model,
            max_attempts: policy.max_attempts,
        })
    }

    fn build_request(&self, system_prompt: &str, user_message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            response_format: ResponseFormat::json_object(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
        }
    }

    fn completion_request(&self, body: &ChatCompletionRequest) -> AppResult<Request> {
        let url = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));
        Ok(self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .build()?)
    }

    async fn send(&self, body: &ChatCompletionRequest) -> AppResult<String> {
        let request = self.completion_request(body)?;
        let response = self.http_client.execute(request).await?;
        let response = ensure_success(response, "Completion API").await?;

        let completion: ChatCompletionResponse = response.json().await?;
        extract_content(completion)
    }
}

/// Pulls the message text out of the first choice
fn extract_content(completion: ChatCompletionResponse) -> AppResult<String> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            AppError::MalformedResponse("Completion response has no message content".to_string())
        })
}

#[async_trait::async_trait]
impl CompletionService for OpenAiProvider {
    async fn complete_json(&self, system_prompt: &str, user_message: &str) -> AppResult<String> {
        let request = self.build_request(system_prompt, user_message);
        let content = with_attempts(PROVIDER, self.max_attempts, || self.send(&request)).await?;

        tracing::debug!(
            model = %self.model,
            bytes = content.len(),
            provider = PROVIDER,
            "Completion received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
