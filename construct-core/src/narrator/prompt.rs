//! Prompt compiler.
//!
//! Combines session config, character sheet, rules lookups, and the
//! trailing conversation window into the two-message chat payload sent
//! to a remote provider. Compilation is a pure function of its inputs
//! and never fails: missing fields degrade to documented defaults.

use crate::conversation::ConversationTurn;
use crate::session::{Character, SessionConfig};
use crate::srd::RulesReference;

/// Role of a compiled prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One message of the compiled payload.
#[derive(Debug, Clone)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// The compiled artifact: exactly one system message carrying the full
/// game context, followed by one user message carrying the raw player
/// action verbatim.
#[derive(Debug, Clone)]
pub struct PromptPayload {
    pub messages: Vec<PromptMessage>,
}

impl PromptPayload {
    /// The system-context message.
    pub fn system(&self) -> &str {
        &self.messages[0].content
    }

    /// The user message (the raw player action).
    pub fn user(&self) -> &str {
        &self.messages[1].content
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Compile a player action plus context into a prompt payload.
pub fn compile(
    action: &str,
    config: &SessionConfig,
    character: &Character,
    history: &[ConversationTurn],
) -> PromptPayload {
    let rules = RulesReference::global();

    let race = or_default(&character.race, "Human");
    let class = or_default(&character.class, "Fighter");
    let background = or_default(&character.background, "Acolyte");
    let backstory = or_default(&character.backstory, "A wandering hero");

    // Lookups resolve the sheet as written, not the rendered defaults:
    // an absent or unknown race/class degrades to an empty
    // trait/feature list.
    let race_traits = rules
        .find_race(&character.race)
        .map(|r| r.traits.join(", "))
        .unwrap_or_default();
    let class_features = rules
        .find_class(&character.class)
        .map(|c| c.features.join(", "))
        .unwrap_or_default();

    let skill_details = rules
        .mentioned_skills(action)
        .iter()
        .map(|s| format!("{} ({}): {}", s.name, s.ability, s.description))
        .collect::<Vec<_>>()
        .join("; ");
    let spell_details = rules
        .mentioned_spells(action)
        .iter()
        .map(|s| format!("{} (Level {}, {}): {}", s.name, s.level, s.school, s.description))
        .collect::<Vec<_>>()
        .join("; ");

    let history_lines = history
        .iter()
        .map(|turn| format!("{}: {}", turn.speaker.label(), turn.text))
        .collect::<Vec<_>>()
        .join("\n");

    let mut system = String::new();
    system.push_str(&format!(
        "You are an AI Dungeon Master for a D&D 5e game. Adhere to 5e rules: \
         character stats (e.g., Strength, Dexterity), classes ({class}), races ({race}), \
         skills, spells, combat (initiative, attack rolls, saving throws).\n"
    ));
    system.push_str(&format!(
        "Session details: Theme - {}, Difficulty - {}, Time - {}, Mode - {}.\n",
        or_default(&config.theme, "Classic Fantasy"),
        config.difficulty,
        or_default(&config.session_time, "1 hour"),
        config.campaign_mode,
    ));
    system.push_str(&format!(
        "Player character: Race - {race} (Traits: {race_traits}), \
         Class - {class} (Features: {class_features}), \
         Background - {background}, Backstory - {backstory}.\n\n"
    ));
    system.push_str(&format!(
        "Relevant skills: {}.\n",
        or_default(&skill_details, "None mentioned")
    ));
    system.push_str(&format!(
        "Relevant spells: {}.\n\n",
        or_default(&spell_details, "None mentioned")
    ));
    system.push_str(&format!("Conversation history: {history_lines}.\n\n"));
    system.push_str(
        "Respond narratively, resolve actions (e.g., roll virtual dice if needed, \
         describe outcomes based on 5e rules), keep it engaging and true to 5e.\n",
    );
    system.push_str(&format!("Player's current action: {action}\n"));

    PromptPayload {
        messages: vec![
            PromptMessage {
                role: Role::System,
                content: system,
            },
            PromptMessage {
                role: Role::User,
                content: action.to_string(),
            },
        ],
    }
}
