//! Game session: configuration, character sheet, and the play loop.
//!
//! A `GameSession` owns the conversation log and drives the narrator:
//! one player action in, one narrative beat out. The config and
//! character are fixed once the session starts.

use crate::conversation::{ConversationState, ConversationTurn, Speaker};
use crate::dice;
use crate::narrator::provider::ProviderClient;
use crate::narrator::Narrator;
use crate::settings::CredentialStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Number of trailing turns handed to the prompt compiler.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

/// Theme options offered at session setup.
pub const THEMES: [&str; 5] = [
    "Classic D&D",
    "Modern Zombies",
    "Star Wars",
    "Post-Apocalyptic Wasteland",
    "Custom",
];

/// Session length options offered at session setup.
pub const SESSION_TIMES: [&str; 3] = ["10 minutes", "30 minutes", "1 hour"];

/// Race options offered at character creation.
pub const RACES: [&str; 6] = ["Human", "Elf", "Dwarf", "Halfling", "Tiefling", "Dragonborn"];

/// Class options offered at character creation.
pub const CLASSES: [&str; 6] = ["Fighter", "Wizard", "Rogue", "Cleric", "Paladin", "Warlock"];

/// Background options offered at character creation.
pub const BACKGROUNDS: [&str; 6] = [
    "Acolyte",
    "Criminal",
    "Folk Hero",
    "Noble",
    "Sage",
    "Soldier",
];

/// Session difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// Whether the session is a single sitting or a running campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CampaignMode {
    #[default]
    OneShot,
    Ongoing,
}

impl fmt::Display for CampaignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CampaignMode::OneShot => "One-shot",
            CampaignMode::Ongoing => "Ongoing",
        })
    }
}

/// Configuration for a game session. Immutable once play starts.
///
/// String fields left empty are substituted with documented defaults by
/// the prompt compiler (theme "Classic Fantasy", time "1 hour").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub theme: String,
    pub difficulty: Difficulty,
    pub session_time: String,
    pub campaign_mode: CampaignMode,
    pub num_players: u8,
    pub ai_dm: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            theme: String::new(),
            difficulty: Difficulty::default(),
            session_time: String::new(),
            campaign_mode: CampaignMode::default(),
            num_players: 1,
            ai_dm: true,
        }
    }
}

impl SessionConfig {
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_session_time(mut self, session_time: impl Into<String>) -> Self {
        self.session_time = session_time.into();
        self
    }

    pub fn with_campaign_mode(mut self, mode: CampaignMode) -> Self {
        self.campaign_mode = mode;
        self
    }

    pub fn with_num_players(mut self, num_players: u8) -> Self {
        self.num_players = num_players;
        self
    }

    pub fn with_ai_dm(mut self, ai_dm: bool) -> Self {
        self.ai_dm = ai_dm;
        self
    }
}

/// A player character sheet. Immutable per session.
///
/// Empty fields are substituted with documented defaults by the prompt
/// compiler ("Human" / "Fighter" / "Acolyte" / "A wandering hero").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    pub race: String,
    pub class: String,
    pub background: String,
    pub backstory: String,
}

impl Character {
    pub fn new(
        race: impl Into<String>,
        class: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            race: race.into(),
            class: class.into(),
            background: background.into(),
            backstory: String::new(),
        }
    }

    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }
}

/// A running game session.
///
/// Owns the conversation log exclusively; `player_action` takes
/// `&mut self`, so at most one action per session is ever in flight.
pub struct GameSession {
    config: SessionConfig,
    character: Character,
    conversation: ConversationState,
    narrator: Narrator,
    history_window: usize,
}

impl GameSession {
    /// Start a session. The conversation opens with a themed greeting
    /// from the narrator.
    pub fn new(
        config: SessionConfig,
        character: Character,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let mut conversation = ConversationState::new();
        conversation.push(Speaker::Narrator, greeting(&config, &character));

        Self {
            narrator: Narrator::new(store),
            config,
            character,
            conversation,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    /// Override the trailing history window size.
    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    /// Replace the narrator's provider client (scripted clients in tests).
    pub fn with_provider_client(mut self, client: Arc<dyn ProviderClient>) -> Self {
        self.narrator = self.narrator.with_client(client);
        self
    }

    /// Process a player action and return the narrator's reply.
    ///
    /// Appends the player turn, queries the narrator over the trailing
    /// history window, and appends the reply. Never fails: provider
    /// problems resolve to local narration. Holding `&mut self` across
    /// the call means a stale reply can never land in the log: an
    /// abandoned caller drops the future before anything is appended.
    pub async fn player_action(&mut self, action: &str) -> String {
        // The window captured here predates the player turn; the action
        // itself travels in the payload's user message.
        let window: Vec<ConversationTurn> =
            self.conversation.window(self.history_window).to_vec();
        self.conversation.push(Speaker::Player, action);

        let reply = self
            .narrator
            .query(action, &self.config, &self.character, &window)
            .await;

        self.conversation.push(Speaker::Narrator, reply.as_str());
        reply
    }

    /// Roll a manual d20 check and log it as a player turn.
    pub fn roll_d20(&mut self, modifier: i32) -> String {
        let message = dice::roll_message(modifier);
        self.conversation.push(Speaker::Player, message.as_str());
        message
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Clear the conversation log and start over with a fresh greeting.
    pub fn restart(&mut self) {
        self.conversation.reset();
        self.conversation
            .push(Speaker::Narrator, greeting(&self.config, &self.character));
    }
}

fn greeting(config: &SessionConfig, character: &Character) -> String {
    let theme = if config.theme.trim().is_empty() {
        "fantasy"
    } else {
        config.theme.as_str()
    };
    let race = if character.race.trim().is_empty() {
        "brave"
    } else {
        character.race.as_str()
    };
    let class = if character.class.trim().is_empty() {
        "adventurer"
    } else {
        character.class.as_str()
    };
    format!(
        "Welcome to your {theme} adventure! As a {race} {class}, you find yourself \
         in a mysterious setting. What do you do?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    #[test]
    fn test_config_builder() {
        let config = SessionConfig::default()
            .with_theme("Star Wars")
            .with_difficulty(Difficulty::Hard)
            .with_session_time("30 minutes")
            .with_campaign_mode(CampaignMode::Ongoing)
            .with_num_players(4);

        assert_eq!(config.theme, "Star Wars");
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.session_time, "30 minutes");
        assert_eq!(config.campaign_mode, CampaignMode::Ongoing);
        assert_eq!(config.num_players, 4);
        assert!(config.ai_dm);
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        assert_eq!(CampaignMode::OneShot.to_string(), "One-shot");
        assert_eq!(CampaignMode::Ongoing.to_string(), "Ongoing");
    }

    #[test]
    fn test_session_opens_with_greeting() {
        let session = GameSession::new(
            SessionConfig::default().with_theme("Star Wars"),
            Character::new("Human", "Rogue", "Criminal"),
            Arc::new(MemoryStore::new()),
        );

        let turns = session.conversation().turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].speaker, Speaker::Narrator);
        assert!(turns[0]
            .text
            .starts_with("Welcome to your Star Wars adventure!"));
        assert!(turns[0].text.contains("As a Human Rogue"));
    }

    #[test]
    fn test_greeting_defaults() {
        let session = GameSession::new(
            SessionConfig::default(),
            Character::default(),
            Arc::new(MemoryStore::new()),
        );

        let greeting = &session.conversation().turns()[0].text;
        assert!(greeting.contains("your fantasy adventure"));
        assert!(greeting.contains("As a brave adventurer"));
    }

    #[test]
    fn test_roll_d20_logs_player_turn() {
        let mut session = GameSession::new(
            SessionConfig::default(),
            Character::default(),
            Arc::new(MemoryStore::new()),
        );

        let message = session.roll_d20(3);
        assert!(message.starts_with("Dice Roll (d20 + 3): "));

        let last = session.conversation().last().unwrap();
        assert_eq!(last.speaker, Speaker::Player);
        assert_eq!(last.text, message);
    }

    #[test]
    fn test_abandoned_action_leaves_log_untouched() {
        let mut session = GameSession::new(
            SessionConfig::default(),
            Character::default(),
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(session.conversation().len(), 1);

        // A caller that walks away drops the future before it is ever
        // polled; no turn may land in the log.
        let pending = session.player_action("I open the door");
        drop(pending);

        assert_eq!(session.conversation().len(), 1);
    }

    #[test]
    fn test_restart_greets_again() {
        let mut session = GameSession::new(
            SessionConfig::default().with_theme("Star Wars"),
            Character::new("Human", "Rogue", "Criminal"),
            Arc::new(MemoryStore::new()),
        );
        session.roll_d20(0);
        assert_eq!(session.conversation().len(), 2);

        session.restart();
        assert_eq!(session.conversation().len(), 1);
        assert!(session.conversation().turns()[0]
            .text
            .starts_with("Welcome to your Star Wars adventure!"));
    }
}
