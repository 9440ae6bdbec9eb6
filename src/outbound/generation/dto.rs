//! Wire-format DTOs for the chat-completion endpoint.

use serde::{Deserialize, Serialize};

/// One chat message in a completion request.
#[derive(Debug, Serialize)]
pub struct ChatMessageDto<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Request body for one completion round trip.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequestDto<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessageDto<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Response body of a completion round trip.
///
/// Only the fields this adapter reads are modelled; everything else in the
/// upstream payload is ignored.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponseDto {
    pub choices: Vec<ChatChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceDto {
    pub message: ChatChoiceMessageDto,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessageDto {
    /// Generated text; upstream may send `null`, which maps to empty.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponseDto {
    /// Text of the first completion choice.
    ///
    /// Returns `None` when the response carries no choices at all; a null
    /// content field degrades to an empty string instead.
    pub fn into_generated_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
    }
}
