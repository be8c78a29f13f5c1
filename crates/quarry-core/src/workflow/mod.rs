//! The question-to-answer workflow
//!
//! An explicit finite-state machine: [`StepName`]s are states, the routing
//! predicates in [`router`] pick the [`Transition`] out of each state, and
//! [`QueryWorkflow`] dispatches until it reaches [`Transition::End`].

mod engine;
mod error;
pub mod prompts;
pub mod router;
mod step;
mod steps;

pub use engine::{QueryWorkflow, QueryWorkflowBuilder};
pub use error::{ExecutionFault, WorkflowError, WorkflowResult};
pub use step::{StepName, Transition};
pub use steps::NO_RESULTS_RESPONSE;
