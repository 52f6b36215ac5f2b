use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A text-generation model that answers a chat transcript with raw text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError>;
}

/// Workers AI style chat request.
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    messages: &'a [ChatMessage],
}

/// The REST API wraps the output in `result`; the in-worker binding does not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RunResponse {
    Wrapped { result: RunResult },
    Bare(RunResult),
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    response: String,
}

impl RunResponse {
    fn into_text(self) -> String {
        match self {
            RunResponse::Wrapped { result } | RunResponse::Bare(result) => result.response,
        }
    }
}

/// HTTP client for a hosted model exposed as `POST {run_url}/{model}`.
///
/// No timeout and no retries: a slow model stalls only the request waiting on it.
pub struct WorkersAiModel {
    endpoint: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl WorkersAiModel {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            endpoint: format!(
                "{}/{}",
                config.run_url.trim_end_matches('/'),
                config.model.trim_start_matches('/')
            ),
            api_token: config.api_token.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LanguageModel for WorkersAiModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&RunRequest { messages });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "Model endpoint returned status {}",
                resp.status()
            )));
        }

        let body: RunResponse = resp.json().await?;
        Ok(body.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_url_and_model() {
        let model = WorkersAiModel::new(&AiConfig {
            run_url: "https://api.example.com/accounts/abc/ai/run/".to_string(),
            api_token: None,
            model: "@cf/meta/llama-3-8b-instruct".to_string(),
        });
        assert_eq!(
            model.endpoint(),
            "https://api.example.com/accounts/abc/ai/run/@cf/meta/llama-3-8b-instruct"
        );
    }

    #[test]
    fn test_response_shapes() {
        let wrapped: RunResponse =
            serde_json::from_str(r#"{"result": {"response": "Groceries"}, "success": true}"#)
                .unwrap();
        assert_eq!(wrapped.into_text(), "Groceries");

        let bare: RunResponse = serde_json::from_str(r#"{"response": "Errands"}"#).unwrap();
        assert_eq!(bare.into_text(), "Errands");
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hello")];
        let json = serde_json::to_value(RunRequest {
            messages: &messages,
        })
        .unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }
}
