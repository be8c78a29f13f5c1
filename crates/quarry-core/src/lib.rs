//! # Quarry Core
//!
//! The orchestration engine behind Quarry: it turns a natural-language
//! question into SQL, runs it, repairs failing queries, and summarizes the
//! result.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ QueryWorkflow │  ← drives the step graph, owns no I/O
//! └──────┬───────┘
//!        │ uses (trait objects)
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ TextGenerator   QueryExecutor                 │
//! │ SchemaProvider  ValueRecoverer                │  ← quarry-llm, quarry-sqlite
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The step graph:
//!
//! ```text
//! generate_sql → execute_sql ─┬─ error, budget left ──→ recover_sql ─┬─ budget left → execute_sql
//!                             ├─ no error ────────────→ generate_response → END
//!                             └─ error, budget spent ─→ END          └─ budget spent → END
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quarry_core::{ConversationMemory, QueryWorkflow};
//!
//! let workflow = QueryWorkflow::builder()
//!     .generator(generator)
//!     .executor(executor)
//!     .schema(&schema_provider)
//!     .recoverer(recoverer)
//!     .build()?;
//!
//! let session = workflow.run("top 5 rented movies per category", &ConversationMemory::default()).await?;
//! println!("{:?}", session.outcome());
//! ```

pub mod session;
pub mod traits;
pub mod value;
pub mod workflow;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use session::{
    ConversationMemory, HistoryEntry, QuerySession, SessionOutcome, StepOutcome, Turn,
};
pub use traits::{
    DbError, DbResult, LlmError, LlmResult, QueryExecutor, RecoveredQuery, RecoveryError,
    RecoveryResult, SchemaProvider, StaticSchema, TextGenerator, ValueRecoverer, ValueSuggestion,
};
pub use value::{CellValue, Row};
pub use workflow::{
    ExecutionFault, QueryWorkflow, QueryWorkflowBuilder, StepName, Transition, WorkflowError,
    WorkflowResult, NO_RESULTS_RESPONSE,
};
