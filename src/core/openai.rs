use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ChatCompletionResponse, ChatRequest};
use crate::core::config::ApiKey;
use crate::core::generator::{CompletionBackend, GenerationError};
use crate::utils::url::construct_api_url;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Non-streaming client for the OpenAI `chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        let chat_url = construct_api_url(&self.base_url, "chat/completions");
        debug!(url = %chat_url, "posting chat completion request");

        let response = self
            .client
            .post(chat_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: summarize_api_error(&body),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyCompletion)
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// One-line description of an error body: the JSON `error.message` when the
/// service sent one, otherwise the collapsed raw text.
fn summarize_api_error(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatMessage;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    struct CapturedRequest {
        request_line: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    }

    async fn read_http_request(
        stream: &mut tokio::net::TcpStream,
    ) -> Result<CapturedRequest, String> {
        let mut buffer = Vec::new();
        let mut header_end = None;
        while header_end.is_none() {
            let mut chunk = [0_u8; 1024];
            let read = stream
                .read(&mut chunk)
                .await
                .map_err(|err| err.to_string())?;
            if read == 0 {
                return Err("Unexpected EOF while reading HTTP headers".to_string());
            }
            buffer.extend_from_slice(&chunk[..read]);
            header_end = buffer
                .windows(4)
                .position(|window| window == b"\r\n\r\n")
                .map(|index| index + 4);
        }

        let header_end = header_end.expect("header end should exist");
        let header_text =
            std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
        let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
        let request_line = lines
            .next()
            .ok_or_else(|| "Missing HTTP request line".to_string())?
            .to_string();

        let mut headers = Vec::new();
        let mut content_length = 0_usize;
        for line in lines {
            let mut parts = line.splitn(2, ':');
            let Some(name) = parts.next() else {
                continue;
            };
            let value = parts.next().unwrap_or_default().trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
            }
            headers.push((name.to_string(), value));
        }

        let mut body = buffer[header_end..].to_vec();
        while body.len() < content_length {
            let mut chunk = [0_u8; 1024];
            let read = stream
                .read(&mut chunk)
                .await
                .map_err(|err| err.to_string())?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..read]);
        }

        Ok(CapturedRequest {
            request_line,
            headers,
            body,
        })
    }

    /// Serve exactly one request with the given status and body, returning
    /// the base URL to point the client at.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, Arc<Mutex<Option<CapturedRequest>>>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");
        let captured = Arc::new(Mutex::new(None));
        let captured_for_server = Arc::clone(&captured);

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let request = read_http_request(&mut stream).await.expect("request");
            *captured_for_server.lock().await = Some(request);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = stream.shutdown().await;
        });

        (format!("http://{addr}/v1"), captured)
    }

    fn sample_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "directive".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "Hello".to_string(),
                },
            ],
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn posts_request_and_returns_first_choice() {
        let (base_url, captured) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi there!"},"finish_reason":"stop"}]}"#,
        )
        .await;
        let client = OpenAiClient::with_base_url(ApiKey::new("sk-test"), base_url);

        let text = client.complete(&sample_request()).await.expect("completion");
        assert_eq!(text, "Hi there!");

        let captured = captured.lock().await;
        let request = captured.as_ref().expect("server saw a request");
        assert_eq!(request.request_line, "POST /v1/chat/completions HTTP/1.1");
        let auth = request
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str());
        assert_eq!(auth, Some("Bearer sk-test"));

        let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn error_status_maps_to_api_error_with_summary() {
        let (base_url, _) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;
        let client = OpenAiClient::with_base_url(ApiKey::new("bad"), base_url);

        match client.complete(&sample_request()).await {
            Err(GenerationError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed() {
        let (base_url, _) = serve_once("200 OK", "<html>gateway</html>").await;
        let client = OpenAiClient::with_base_url(ApiKey::new("sk-test"), base_url);

        let result = client.complete(&sample_request()).await;
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[tokio::test]
    async fn missing_choices_is_empty_completion() {
        let (base_url, _) = serve_once("200 OK", r#"{"choices":[]}"#).await;
        let client = OpenAiClient::with_base_url(ApiKey::new("sk-test"), base_url);

        let result = client.complete(&sample_request()).await;
        assert!(matches!(result, Err(GenerationError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = OpenAiClient::with_base_url(ApiKey::new("sk-test"), format!("http://{addr}"));
        let result = client.complete(&sample_request()).await;
        assert!(matches!(result, Err(GenerationError::Transport(_))));
    }

    #[test]
    fn summarize_handles_plain_and_empty_bodies() {
        assert_eq!(summarize_api_error("  "), "<empty body>");
        assert_eq!(summarize_api_error("bad   gateway\n"), "bad gateway");
        assert_eq!(summarize_api_error(r#"{"error":"quota exceeded"}"#), "quota exceeded");
        assert_eq!(
            summarize_api_error(r#"{"status":"failed"}"#),
            r#"{"status":"failed"}"#
        );
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let client = OpenAiClient::new(ApiKey::new("sk-secret"));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains(DEFAULT_OPENAI_BASE_URL));
    }
}
