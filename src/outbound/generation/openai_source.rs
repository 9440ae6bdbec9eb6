//! Reqwest-backed chat-completion source adapter.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into the
//! generated text.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::GenerationConfig;
use crate::domain::ports::{CompletionRequest, GenerationSource, GenerationSourceError};

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto, ChatMessageDto};

/// Chat-completion source performing HTTP POST requests against one endpoint.
pub struct OpenAiChatSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &GenerationConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl GenerationSource for OpenAiChatSource {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, GenerationSourceError> {
        let body = ChatCompletionRequestDto {
            model: self.model.as_str(),
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: request.system.as_str(),
                },
                ChatMessageDto {
                    role: "user",
                    content: request.prompt.as_str(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        parse_completion(bytes.as_ref())
    }
}

fn parse_completion(body: &[u8]) -> Result<String, GenerationSourceError> {
    let decoded: ChatCompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        GenerationSourceError::decode(format!("invalid completion payload: {error}"))
    })?;
    decoded
        .into_generated_text()
        .ok_or_else(|| GenerationSourceError::decode("completion carried no choices"))
}

fn map_transport_error(error: reqwest::Error) -> GenerationSourceError {
    if error.is_timeout() {
        GenerationSourceError::timeout(error.to_string())
    } else {
        GenerationSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GenerationSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GenerationSourceError::timeout(message)
        }
        _ => GenerationSourceError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
