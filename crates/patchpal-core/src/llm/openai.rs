use crate::constants::endpoints;
use crate::error::PatchpalError;
use crate::llm::traits::*;
use futures::channel::mpsc;
use serde::{Deserialize, Serialize};

/// Client for OpenAI-compatible `/v1/chat/completions` endpoints.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: crate::constants::models::DEFAULT_MAIN_MODEL.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            endpoints::CHAT_COMPLETIONS_PATH
        )
    }

    fn request_body<'a>(&'a self, messages: &'a [Message]) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: &self.model,
            messages,
            temperature: 0.0,
            stream: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OpenAIStreamChunk {
    #[serde(default)]
    choices: Vec<OpenAIStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIStreamChoice {
    #[serde(default)]
    delta: Option<OpenAIDelta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIDelta {
    #[serde(default)]
    content: Option<String>,
}

/// What a single SSE line contributes to the stream.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseLine {
    Text(String),
    Done,
    /// Keep-alives, role-only deltas, unparseable chunks.
    Skip,
}

pub(crate) fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim();
    let Some(data) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim_start();
    if data == "[DONE]" {
        return SseLine::Done;
    }

    let chunk: OpenAIStreamChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::debug!("Skipping malformed stream chunk: {e}");
            return SseLine::Skip;
        }
    };

    let Some(choice) = chunk.choices.into_iter().next() else {
        return SseLine::Skip;
    };

    if let Some(reason) = choice.finish_reason.as_deref() {
        if reason != "stop" {
            tracing::warn!("Response finished early: {reason}");
        }
    }

    match choice.delta.and_then(|d| d.content) {
        Some(text) if !text.is_empty() => SseLine::Text(text),
        _ => SseLine::Skip,
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAIClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn chat_stream(
        &self,
        messages: &[Message],
    ) -> Result<mpsc::UnboundedReceiver<StreamEvent>, PatchpalError> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PatchpalError::Llm(format!(
                "OpenAI API error ({}): {}",
                status, text
            )));
        }

        let (tx, rx) = mpsc::unbounded();

        let mut stream = response.bytes_stream();
        tokio::spawn(async move {
            use futures::StreamExt;
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx.unbounded_send(StreamEvent::Error(e.to_string()));
                        return;
                    }
                };

                // A UTF-8 sequence may straddle chunks; decode whole lines only.
                buffer.extend_from_slice(&chunk);

                while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=line_end).collect();
                    match parse_sse_line(&String::from_utf8_lossy(&line)) {
                        SseLine::Text(text) => {
                            let _ = tx.unbounded_send(StreamEvent::TextDelta(text));
                        }
                        SseLine::Done => {
                            let _ = tx.unbounded_send(StreamEvent::Done);
                            return;
                        }
                        SseLine::Skip => {}
                    }
                }
            }

            // Connection closed without [DONE]; whatever arrived is the response.
            let _ = tx.unbounded_send(StreamEvent::Done);
        });

        Ok(rx)
    }
}
