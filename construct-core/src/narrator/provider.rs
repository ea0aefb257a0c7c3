//! Remote provider dispatch.
//!
//! A tagged [`Provider`] variant plus one capability trait,
//! [`ProviderClient`]. OpenAI is the only implemented provider;
//! the other variants fail with `UnsupportedProvider` rather than
//! silently matching a default. No retries happen here: one call,
//! one result.

use crate::narrator::prompt::{PromptPayload, Role};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Maximum output tokens requested from a remote provider.
pub const MAX_COMPLETION_TOKENS: u32 = 300;

/// Sampling temperature for remote completions.
pub const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Known remote providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Claude,
    Grok,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Claude, Provider::Grok];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Claude => "Claude",
            Provider::Grok => "Grok",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a provider name that names no known provider.
#[derive(Debug, Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "grok" => Ok(Provider::Grok),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Failure of a remote provider call.
///
/// Every failure mode surfaces as one of these variants to the caller;
/// nothing is handled partially inside the client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<openai::Error> for ProviderError {
    fn from(err: openai::Error) -> Self {
        match err {
            openai::Error::Network(msg) => ProviderError::Transport(msg),
            openai::Error::Api { status, message } => ProviderError::BadStatus {
                status,
                body: message,
            },
            openai::Error::Parse(msg) => ProviderError::MalformedResponse(msg),
            openai::Error::NoApiKey => ProviderError::Transport("API key not configured".into()),
            openai::Error::Config(msg) => ProviderError::Transport(msg),
        }
    }
}

/// Capability to send a compiled prompt to a named remote provider.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Send the payload and return the trimmed text of the first
    /// completion choice.
    async fn send(
        &self,
        provider: &str,
        api_key: &str,
        payload: &PromptPayload,
    ) -> Result<String, ProviderError>;
}

/// Production provider client dispatching over HTTP.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpProviderClient;

impl HttpProviderClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn send(
        &self,
        provider: &str,
        api_key: &str,
        payload: &PromptPayload,
    ) -> Result<String, ProviderError> {
        let provider: Provider = provider
            .parse()
            .map_err(|UnknownProvider(name)| ProviderError::UnsupportedProvider(name))?;

        match provider {
            Provider::OpenAi => {
                let client = openai::Client::new(api_key);
                let messages = payload
                    .messages
                    .iter()
                    .map(|m| match m.role {
                        Role::System => openai::ChatMessage::system(&m.content),
                        Role::User => openai::ChatMessage::user(&m.content),
                    })
                    .collect();

                let request = openai::ChatRequest::new(messages)
                    .with_max_tokens(MAX_COMPLETION_TOKENS)
                    .with_temperature(SAMPLING_TEMPERATURE);

                let response = client.chat(request).await?;
                debug!(
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    total_tokens = response.usage.total_tokens,
                    "provider token usage"
                );

                let text = response.text().ok_or_else(|| {
                    ProviderError::MalformedResponse("response contained no choices".into())
                })?;
                Ok(text.trim().to_string())
            }
            other => Err(ProviderError::UnsupportedProvider(other.name().to_string())),
        }
    }
}
