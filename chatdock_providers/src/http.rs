use async_trait::async_trait;
use chatdock_core::util::GENERIC_REQUEST_FAILURE;
use chatdock_core::{AssistantClient, AssistantError, ChatMessage, PageContext};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    page_context: PageContext,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: String,
}

#[derive(Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
}

/// Talks to the portal's `/ai/*` routes with a bearer token.
pub struct HttpAssistantClient {
    client: Client,
    base_url: String,
}

impl HttpAssistantClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8080`).
    ///
    /// Requests time out after [`DEFAULT_TIMEOUT`] unless changed with
    /// [`Self::with_timeout`].
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("Invalid assistant base URL {base_url:?}: {e}"))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        info!("Creating HttpAssistantClient for {base_url}");
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/ai/chat/", self.base_url)
    }

    fn suggestions_url(&self, page: PageContext) -> Result<Url, AssistantError> {
        Url::parse_with_params(
            &format!("{}/ai/suggestions/", self.base_url),
            &[("page", page.as_str())],
        )
        .map_err(|e| AssistantError::TransportFailed(format!("invalid suggestions URL: {e}")))
    }

    /// Turn a response into its body text, mapping error statuses to
    /// `RequestFailed`.
    async fn read_body(response: Response) -> Result<String, AssistantError> {
        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;

        if status.is_success() {
            Ok(body)
        } else {
            let detail = failure_detail(&body);
            debug!("Assistant responded with {status}: {detail}");
            Err(AssistantError::RequestFailed(detail))
        }
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn exchange(
        &self,
        history: &[ChatMessage],
        page: PageContext,
        token: &str,
    ) -> Result<String, AssistantError> {
        info!(
            "Sending chat exchange: messages={}, page={page}",
            history.len()
        );

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(token)
            .json(&ChatRequest {
                messages: history,
                page_context: page,
            })
            .send()
            .await
            .map_err(transport_failure)?;

        let body = Self::read_body(response).await?;
        let reply: ChatResponse = parse_success(&body)?;

        info!("Received chat reply ({} chars)", reply.message.len());
        Ok(reply.message)
    }

    async fn fetch_suggestions(
        &self,
        page: PageContext,
        token: &str,
    ) -> Result<Vec<String>, AssistantError> {
        debug!("Fetching suggestions for page={page}");

        let response = self
            .client
            .get(self.suggestions_url(page)?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_failure)?;

        let body = Self::read_body(response).await?;
        let parsed: SuggestionsResponse = parse_success(&body)?;
        Ok(parsed.suggestions)
    }
}

fn transport_failure(err: reqwest::Error) -> AssistantError {
    if err.is_timeout() {
        warn!("Assistant request timed out: {err}");
    } else {
        warn!("Assistant request failed in transport: {err}");
    }
    AssistantError::TransportFailed(err.to_string())
}

fn parse_success<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, AssistantError> {
    serde_json::from_str(body).map_err(|e| {
        warn!("Malformed assistant response: {e}");
        AssistantError::RequestFailed("invalid response from assistant".to_string())
    })
}

/// Pull a string `detail` out of an error body, or fall back to the generic
/// message.
fn failure_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail")?.as_str().map(str::to_string))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| GENERIC_REQUEST_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_taken_from_json_body() {
        assert_eq!(failure_detail(r#"{"detail": "overloaded"}"#), "overloaded");
    }

    #[test]
    fn missing_or_odd_detail_falls_back() {
        assert_eq!(failure_detail("{}"), GENERIC_REQUEST_FAILURE);
        assert_eq!(failure_detail("<html>502</html>"), GENERIC_REQUEST_FAILURE);
        assert_eq!(failure_detail(r#"{"detail": ""}"#), GENERIC_REQUEST_FAILURE);
        // FastAPI validation errors put a list in `detail`.
        assert_eq!(
            failure_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#),
            GENERIC_REQUEST_FAILURE
        );
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let body = serde_json::to_value(ChatRequest {
            messages: &history,
            page_context: PageContext::WinterOpsLog,
        })
        .ok();
        assert_eq!(
            body,
            Some(serde_json::json!({
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" }
                ],
                "page_context": "WinterOpsLog"
            }))
        );
    }

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let client = HttpAssistantClient::new("http://localhost:8080/");
        assert!(client.is_ok());
        if let Ok(client) = client {
            assert_eq!(client.chat_url(), "http://localhost:8080/ai/chat/");
            assert_eq!(
                client
                    .suggestions_url(PageContext::Default)
                    .map(|u| u.to_string())
                    .ok()
                    .as_deref(),
                Some("http://localhost:8080/ai/suggestions/?page=default")
            );
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(HttpAssistantClient::new("not a url").is_err());
    }
}
