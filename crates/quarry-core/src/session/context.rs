//! Conversation memory for multi-turn chat
//!
//! Sessions never share state. Front-ends that want follow-up questions keep
//! a [`ConversationMemory`] and let it prepend the last few turns to the next
//! question.

use serde::Serialize;
use std::collections::VecDeque;

/// Default number of turns kept
pub const DEFAULT_MEMORY_SIZE: usize = 5;

/// One completed question/answer exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Question as the user typed it (without context)
    pub question: String,
    /// SQL that produced the answer
    pub sql: Option<String>,
    /// Answer shown to the user
    pub response: Option<String>,
}

/// Bounded memory of recent turns
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    capacity: usize,
    turns: VecDeque<Turn>,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}

impl ConversationMemory {
    /// Memory holding at most `capacity` turns
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            turns: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Remember a turn, forgetting the oldest when full
    pub fn push(&mut self, turn: Turn) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Turns oldest first
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of remembered turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing is remembered
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Prefix for the next question; empty when there is no history
    pub fn render_context(&self) -> String {
        if self.turns.is_empty() {
            return String::new();
        }

        let mut context = String::from("Previous context:\n");
        for turn in &self.turns {
            context.push_str(&format!("Q: {}\n", turn.question));
            context.push_str(&format!("SQL: {}\n", turn.sql.as_deref().unwrap_or("(none)")));
            context.push_str(&format!(
                "A: {}\n\n",
                turn.response.as_deref().unwrap_or("(no answer)")
            ));
        }
        context.push_str("Current question: ");
        context
    }

    /// The question with the rendered context prepended
    pub fn contextualize(&self, question: &str) -> String {
        format!("{}{}", self.render_context(), question)
    }
}
