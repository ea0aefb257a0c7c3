//! Testing utilities.
//!
//! Scripted provider clients for deterministic tests without network
//! access, a [`TestHarness`] wrapping a full session, and helpers for
//! picking apart local-narrator output.

use crate::narrator::prompt::PromptPayload;
use crate::narrator::provider::{ProviderClient, ProviderError};
use crate::session::{Character, GameSession, SessionConfig};
use crate::settings::{CredentialStore, MemoryStore, API_KEY_KEY};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Provider client returning scripted replies in order.
///
/// Once the script is exhausted, further calls fail with a transport
/// error (and therefore fall back to the local narrator).
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue another reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply.into());
        }
    }

    /// Number of send attempts made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for ScriptedClient {
    async fn send(
        &self,
        _provider: &str,
        _api_key: &str,
        _payload: &PromptPayload,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        reply.ok_or_else(|| ProviderError::Transport("no scripted reply left".into()))
    }
}

/// Provider client that fails every call with a transport error.
#[derive(Debug, Default)]
pub struct FailingClient {
    calls: AtomicUsize,
}

impl FailingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for FailingClient {
    async fn send(
        &self,
        _provider: &str,
        _api_key: &str,
        _payload: &PromptPayload,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Transport("scripted transport failure".into()))
    }
}

/// Provider client that records calls and fails; used to assert that a
/// code path never attempts the network.
#[derive(Debug, Default)]
pub struct CountingClient {
    calls: AtomicUsize,
}

impl CountingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for CountingClient {
    async fn send(
        &self,
        _provider: &str,
        _api_key: &str,
        _payload: &PromptPayload,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Transport("unexpected network attempt".into()))
    }
}

/// Extract the numeric result and success flag from a local-narrator
/// roll message ("... Roll result: 14. Success!").
pub fn parse_roll_result(text: &str) -> Option<(i32, bool)> {
    let rest = text.split("Roll result: ").nth(1)?;
    let (number, rest) = rest.split_once('.')?;
    let roll = number.trim().parse().ok()?;
    let success = if rest.contains("Success!") {
        true
    } else if rest.contains("Failure!") {
        false
    } else {
        return None;
    };
    Some((roll, success))
}

/// A full session wired to an in-memory store and a scripted client.
pub struct TestHarness {
    /// The session under test.
    pub session: GameSession,
    /// The credential store the narrator reads from.
    pub store: Arc<MemoryStore>,
    client: Arc<ScriptedClient>,
}

impl TestHarness {
    /// Harness with no API key configured: every action resolves via
    /// the local narrator.
    pub fn offline(config: SessionConfig, character: Character) -> Self {
        let store = Arc::new(MemoryStore::new());
        let client = Arc::new(ScriptedClient::new());
        let session =
            GameSession::new(config, character, store.clone()).with_provider_client(client.clone());

        Self {
            session,
            store,
            client,
        }
    }

    /// Harness with an API key configured so scripted replies are used.
    pub async fn online(config: SessionConfig, character: Character) -> Self {
        let harness = Self::offline(config, character);
        harness
            .store
            .set(API_KEY_KEY, "sk-test")
            .await
            .unwrap_or_else(|_| unreachable!("memory store writes cannot fail"));
        harness
    }

    /// Queue a scripted remote reply.
    pub fn expect_reply(&self, text: impl Into<String>) -> &Self {
        self.client.push_reply(text);
        self
    }

    /// Send a player action through the session.
    pub async fn input(&mut self, text: &str) -> String {
        self.session.player_action(text).await
    }

    /// Number of remote send attempts made.
    pub fn calls(&self) -> usize {
        self.client.calls()
    }
}
