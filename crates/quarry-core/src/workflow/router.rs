//! Routing predicates
//!
//! Pure functions of the session state and the repair budget.

use super::step::{StepName, Transition};
use crate::session::QuerySession;

/// Route out of `execute_sql`
///
/// - fault with budget left → `recover_sql`
/// - no fault → `generate_response`
/// - fault with budget spent → end, keeping the fault
pub fn route_after_execution(state: &QuerySession, max_attempts: u32) -> Transition {
    match state.error {
        Some(_) if state.recovery_attempts() < max_attempts => {
            Transition::Step(StepName::RecoverSql)
        }
        None => Transition::Step(StepName::GenerateResponse),
        Some(_) => Transition::End,
    }
}

/// Route out of `recover_sql`
pub fn route_after_recovery(state: &QuerySession, max_attempts: u32) -> Transition {
    if state.recovery_attempts() >= max_attempts {
        Transition::End
    } else {
        Transition::Step(StepName::ExecuteSql)
    }
}

/// Fixed edges plus the two conditional ones
pub fn next_transition(step: StepName, state: &QuerySession, max_attempts: u32) -> Transition {
    match step {
        StepName::GenerateSql => Transition::Step(StepName::ExecuteSql),
        StepName::ExecuteSql => route_after_execution(state, max_attempts),
        StepName::RecoverSql => route_after_recovery(state, max_attempts),
        StepName::GenerateResponse => Transition::End,
    }
}
