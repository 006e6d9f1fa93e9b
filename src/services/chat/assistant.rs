//! Remote assistant client speaking the OpenAI-compatible streaming chat
//! completion protocol. Any failure here is absorbed by the chat service and
//! answered with the deterministic fallback instead.

use crate::errors::ServiceError;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::ChatChunk;

#[derive(Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<OutboundMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

impl AssistantClient {
    pub fn new(api_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Streams completion deltas into `tx` as they arrive. Returns Err on any
    /// transport or protocol failure so the caller can fall back; a dropped
    /// receiver just ends the stream quietly.
    #[instrument(skip(self, system_prompt, tx))]
    pub async fn stream_completion(
        &self,
        system_prompt: &str,
        tx: &mpsc::Sender<ChatChunk>,
    ) -> Result<(), ServiceError> {
        let url = format!(
            "{}/chat/completions",
            self.api_url.trim_end_matches('/')
        );
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![OutboundMessage {
                role: "system",
                content: system_prompt,
            }],
            stream: true,
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ServiceError::ExternalServiceError(format!(
                "Assistant returned status {}",
                response.status()
            )));
        }

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            while let Some(pos) = buffer.find('\n') {
                let line: String = buffer.drain(..=pos).collect();
                let line = line.trim();
                let Some(payload) = line.strip_prefix("data: ") else {
                    continue;
                };
                if payload == "[DONE]" {
                    return Ok(());
                }
                let Ok(parsed) = serde_json::from_str::<StreamChunk>(payload) else {
                    debug!("Skipping unparseable stream chunk");
                    continue;
                };
                if let Some(content) = parsed
                    .choices
                    .first()
                    .and_then(|c| c.delta.content.clone())
                    .filter(|c| !c.is_empty())
                {
                    if tx.send(ChatChunk::Content(content)).await.is_err() {
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }
}
