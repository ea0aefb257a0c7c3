//! The narrator: provider dispatch with graceful degradation.
//!
//! One player action flows through a fixed sequence: read a credential
//! snapshot, compile the prompt, make at most one remote attempt, and
//! fall back to the local narrator on a missing credential or any
//! provider failure. The caller-visible contract is that a query always
//! resolves to a narrative string.

pub mod local;
pub mod prompt;
pub mod provider;

use crate::conversation::ConversationTurn;
use crate::session::{Character, SessionConfig};
use crate::settings::{AiSettings, CredentialStore};
use provider::{HttpProviderClient, ProviderClient};
use std::sync::Arc;
use tracing::{info, warn};

/// Produces narrative beats for player actions.
pub struct Narrator {
    store: Arc<dyn CredentialStore>,
    client: Arc<dyn ProviderClient>,
}

impl Narrator {
    /// Create a narrator reading credentials from the given store and
    /// dispatching over HTTP.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            client: Arc::new(HttpProviderClient::new()),
        }
    }

    /// Replace the provider client (scripted clients in tests).
    pub fn with_client(mut self, client: Arc<dyn ProviderClient>) -> Self {
        self.client = client;
        self
    }

    /// Produce the next narrative beat for a player action.
    ///
    /// Never fails: a missing credential or any provider error resolves
    /// to local narration. Credentials are re-read on every call, so a
    /// change in the store takes effect on the next action.
    pub async fn query(
        &self,
        action: &str,
        config: &SessionConfig,
        character: &Character,
        history: &[ConversationTurn],
    ) -> String {
        let settings = AiSettings::load(&*self.store).await;

        let Some(api_key) = settings.api_key else {
            // Not an error path: running without a key is the documented
            // default behavior.
            info!("no API key configured, using local narrator");
            return local::narrate(action, config, character, history);
        };

        let payload = prompt::compile(action, config, character, history);
        match self
            .client
            .send(&settings.provider, &api_key, &payload)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(provider = %settings.provider, error = %err, "provider call failed, using local narrator");
                local::narrate(action, config, character, history)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{CredentialStore, MemoryStore, API_KEY_KEY, PROVIDER_KEY};
    use crate::testing::{CountingClient, FailingClient, ScriptedClient};

    fn fixture() -> (SessionConfig, Character) {
        (
            SessionConfig::default().with_theme("Star Wars"),
            Character::new("Human", "Rogue", "Criminal"),
        )
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let (config, character) = fixture();
        let client = Arc::new(CountingClient::new());
        let narrator =
            Narrator::new(Arc::new(MemoryStore::new())).with_client(client.clone());

        let reply = narrator.query("I open the door", &config, &character, &[]).await;

        assert_eq!(client.calls(), 0);
        assert!(reply.contains("As a Human Rogue"));
    }

    #[tokio::test]
    async fn test_remote_reply_used_when_configured() {
        let (config, character) = fixture();
        let store = Arc::new(MemoryStore::new());
        store.set(API_KEY_KEY, "sk-test").await.unwrap();

        let client = Arc::new(ScriptedClient::with_replies(["The droid beeps twice."]));
        let narrator = Narrator::new(store).with_client(client.clone());

        let reply = narrator.query("I ask the droid", &config, &character, &[]).await;

        assert_eq!(reply, "The droid beeps twice.");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let (config, character) = fixture();
        let store = Arc::new(MemoryStore::new());
        store.set(API_KEY_KEY, "sk-test").await.unwrap();

        let client = Arc::new(FailingClient::new());
        let narrator = Narrator::new(store).with_client(client.clone());

        let reply = narrator.query("I open the door", &config, &character, &[]).await;

        // Exactly one remote attempt, then fallback.
        assert_eq!(client.calls(), 1);
        assert!(reply.contains("As a Human Rogue"));
    }

    #[tokio::test]
    async fn test_unsupported_provider_falls_back() {
        let (config, character) = fixture();
        let store = Arc::new(MemoryStore::new());
        store.set(API_KEY_KEY, "sk-test").await.unwrap();
        store.set(PROVIDER_KEY, "Claude").await.unwrap();

        let narrator = Narrator::new(store);
        let reply = narrator.query("I open the door", &config, &character, &[]).await;

        assert!(reply.contains("As a Human Rogue"));
    }

    #[tokio::test]
    async fn test_credential_change_takes_effect_next_call() {
        let (config, character) = fixture();
        let store = Arc::new(MemoryStore::new());
        let client = Arc::new(ScriptedClient::with_replies(["Remote narration."]));
        let narrator = Narrator::new(store.clone()).with_client(client.clone());

        let reply = narrator.query("I wait", &config, &character, &[]).await;
        assert!(reply.contains("As a Human Rogue"));
        assert_eq!(client.calls(), 0);

        store.set(API_KEY_KEY, "sk-test").await.unwrap();
        let reply = narrator.query("I wait", &config, &character, &[]).await;
        assert_eq!(reply, "Remote narration.");
        assert_eq!(client.calls(), 1);
    }
}
