//! Per-question session state and cross-question conversation memory

mod context;
mod state;

pub use context::{ConversationMemory, Turn};
pub use state::{HistoryEntry, QuerySession, SessionOutcome, StepOutcome};
