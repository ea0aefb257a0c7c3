//! Local narrator fallback.
//!
//! A deterministic, non-networked text generator used when no remote
//! provider is configured or reachable. Degrades quality, not
//! availability: the session keeps moving on canned narration.

use crate::conversation::ConversationTurn;
use crate::dice;
use crate::session::{Character, SessionConfig};
use rand::Rng;

/// Threshold a d20 result must meet for the canned check to succeed.
const SUCCESS_THRESHOLD: i32 = 10;

/// Generate a fallback narration for a player action.
///
/// Actions mentioning "roll" or "check" (any case) resolve a d20 check
/// with modifier 0; everything else gets a generic continuation that
/// embeds the character and the verbatim action.
pub fn narrate(
    action: &str,
    config: &SessionConfig,
    character: &Character,
    history: &[ConversationTurn],
) -> String {
    narrate_with_rng(action, config, character, history, &mut rand::thread_rng())
}

/// Fallback narration with a specific RNG.
pub fn narrate_with_rng<R: Rng>(
    action: &str,
    config: &SessionConfig,
    character: &Character,
    _history: &[ConversationTurn],
    rng: &mut R,
) -> String {
    let lower = action.to_lowercase();
    if lower.contains("roll") || lower.contains("check") {
        let theme = if config.theme.trim().is_empty() {
            "fantasy"
        } else {
            config.theme.as_str()
        };
        let roll = dice::roll_check_with_rng(0, rng);
        let outcome = if roll >= SUCCESS_THRESHOLD {
            "Success!"
        } else {
            "Failure!"
        };
        return format!(
            "You attempt the action in the {theme} world... Roll result: {roll}. {outcome}"
        );
    }

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
        "The DM narrates: As a {race} {class}, you {action}. \
         Suddenly, a shadowy figure appears! What next?"
    )
}
