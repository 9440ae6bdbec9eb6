//! Port abstraction for the external text-generation service.

use std::sync::Mutex;

use async_trait::async_trait;

/// A single completion request: a system persona plus the user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System persona steering the generation.
    pub system: String,
    /// Rendered user prompt.
    pub prompt: String,
}

/// Errors raised by generation source adapters.
///
/// All variants carry the upstream detail opaquely; the domain surfaces it
/// without interpreting or retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationSourceError {
    /// The request timed out before a response arrived.
    #[error("generation request timed out: {message}")]
    Timeout { message: String },

    /// The request failed below the HTTP layer or with a server fault.
    #[error("generation transport failed: {message}")]
    Transport { message: String },

    /// The service answered with a non-success status.
    #[error("generation service returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body could not be decoded into a completion.
    #[error("generation response could not be decoded: {message}")]
    Decode { message: String },
}

impl GenerationSourceError {
    /// Create a timeout error with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error for the given HTTP status code.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Driven port for one synchronous completion round trip.
#[async_trait]
pub trait GenerationSource: Send + Sync {
    /// Send the request and return the generated text of the first choice.
    async fn complete(&self, request: &CompletionRequest)
        -> Result<String, GenerationSourceError>;
}

/// Canned generation source used until an external service is wired, and by
/// tests; records every request it receives.
#[derive(Debug)]
pub struct FixtureGenerationSource {
    reply: Result<String, GenerationSourceError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FixtureGenerationSource {
    /// A source answering every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A source failing every request with `error`.
    pub fn failing(error: GenerationSourceError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests observed so far, in arrival order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request log lock").clone()
    }
}

#[async_trait]
impl GenerationSource for FixtureGenerationSource {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, GenerationSourceError> {
        self.requests
            .lock()
            .expect("request log lock")
            .push(request.clone());
        self.reply.clone()
    }
}
