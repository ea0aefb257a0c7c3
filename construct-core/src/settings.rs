//! AI provider settings and the credential store capability.
//!
//! Credentials live behind the [`CredentialStore`] trait so the narrator
//! reads a fresh snapshot per request instead of ambient global state:
//! a key changed in the store takes effect on the next player action.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Store key for the selected provider name.
pub const PROVIDER_KEY: &str = "aiProvider";

/// Store key for the provider API key.
pub const API_KEY_KEY: &str = "aiApiKey";

/// Errors from persisting settings.
///
/// Surfaced only to settings-management callers; the narrator treats a
/// failed read as an absent credential.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to persist {key}: {reason}")]
    Persist { key: String, reason: String },

    #[error("credential store is read-only")]
    ReadOnly,
}

/// Key-value credential storage.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value. Failure to read is reported as `None`.
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// A per-request snapshot of the AI settings.
#[derive(Debug, Clone)]
pub struct AiSettings {
    /// Stored provider name. Defaults to "OpenAI" when absent; an
    /// unrecognized name is kept as-is and rejected at dispatch.
    pub provider: String,

    /// API key, absent when not configured or unreadable.
    pub api_key: Option<String>,
}

impl AiSettings {
    /// Load a snapshot from the store.
    pub async fn load(store: &dyn CredentialStore) -> AiSettings {
        let provider = store
            .get(PROVIDER_KEY)
            .await
            .unwrap_or_else(|| "OpenAI".to_string());
        let api_key = store.get(API_KEY_KEY).await.filter(|k| !k.is_empty());
        AiSettings { provider, api_key }
    }
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read-only credential store backed by environment variables.
///
/// Maps `aiApiKey` to `OPENAI_API_KEY` and `aiProvider` to
/// `CONSTRUCT_AI_PROVIDER`. Writes fail with [`SettingsError::ReadOnly`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvStore;

#[async_trait]
impl CredentialStore for EnvStore {
    async fn get(&self, key: &str) -> Option<String> {
        let var = match key {
            API_KEY_KEY => "OPENAI_API_KEY",
            PROVIDER_KEY => "CONSTRUCT_AI_PROVIDER",
            _ => return None,
        };
        std::env::var(var).ok()
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), SettingsError> {
        Err(SettingsError::ReadOnly)
    }
}
