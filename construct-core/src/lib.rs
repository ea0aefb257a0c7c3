//! Turn-based AI game master engine.
//!
//! This crate provides:
//! - A prompt compiler that turns session config, character sheet, rules
//!   lookups, and recent conversation into a single chat payload
//! - Pluggable remote provider dispatch with graceful degradation
//! - A deterministic local narrator used when no provider is reachable
//! - d20 check rolling and a read-only 5e rules reference
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use construct_core::{Character, EnvStore, GameSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SessionConfig::default().with_theme("Star Wars");
//!     let character = Character::new("Human", "Rogue", "Criminal");
//!
//!     let mut session = GameSession::new(config, character, Arc::new(EnvStore));
//!     let reply = session.player_action("I check for traps").await;
//!     println!("{reply}");
//! }
//! ```

pub mod conversation;
pub mod dice;
pub mod narrator;
pub mod session;
pub mod settings;
pub mod srd;
pub mod testing;

// Primary public API
pub use conversation::{ConversationState, ConversationTurn, Speaker};
pub use narrator::provider::{HttpProviderClient, Provider, ProviderClient, ProviderError};
pub use narrator::prompt::{PromptMessage, PromptPayload, Role};
pub use narrator::Narrator;
pub use session::{CampaignMode, Character, Difficulty, GameSession, SessionConfig};
pub use settings::{AiSettings, CredentialStore, EnvStore, MemoryStore, SettingsError};
pub use srd::RulesReference;
