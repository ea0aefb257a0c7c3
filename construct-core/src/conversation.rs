//! Conversation log for a game session.
//!
//! An append-only, ordered sequence of turns. Sequence numbers are
//! assigned at append time and never reused, even across a reset, so a
//! turn's identity stays stable for the life of the session.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Narrator,
    Player,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Narrator => "Narrator",
            Speaker::Player => "Player",
        }
    }
}

/// One atomic contribution to the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub sequence: u64,
    pub speaker: Speaker,
    pub text: String,
}

/// Ordered, append-only log of turns, owned by one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    turns: Vec<ConversationTurn>,
    next_sequence: u64,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return a reference to it.
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) -> &ConversationTurn {
        let turn = ConversationTurn {
            sequence: self.next_sequence,
            speaker,
            text: text.into(),
        };
        self.next_sequence += 1;
        let index = self.turns.len();
        self.turns.push(turn);
        &self.turns[index]
    }

    /// The trailing `n` turns, in chronological order.
    pub fn window(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// All turns, in chronological order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Clear the log. Sequence numbers are not reused.
    pub fn reset(&mut self) {
        self.turns.clear();
    }
}
