//! Budget and routing properties over arbitrary failure sequences

use proptest::prelude::*;
use quarry_config::WorkflowConfig;
use quarry_core::test_support::{rental_rows, ScriptedExecutor, ScriptedGenerator, ScriptedRecoverer};
use quarry_core::{DbError, QueryWorkflow, SessionOutcome};
use std::sync::Arc;

/// Run a session whose first `failures` executions fault
fn run(budget: u32, failures: u32) -> quarry_core::QuerySession {
    let mut generator = ScriptedGenerator::new();
    let mut executor = ScriptedExecutor::new();
    for i in 0..=budget {
        let sql = format!("SELECT {}", i);
        generator = generator.reply(sql.clone());
        executor = if i < failures {
            executor.fault(sql, DbError::Execution(format!("fault {}", i)))
        } else {
            executor.rows(sql, rental_rows(1))
        };
    }
    generator = generator.reply("summary");

    let workflow = QueryWorkflow::builder()
        .generator(Arc::new(generator))
        .executor(Arc::new(executor))
        .recoverer(Arc::new(ScriptedRecoverer::passthrough()))
        .schema_text("Table: t")
        .config(WorkflowConfig {
            max_recovery_attempts: budget,
            ..Default::default()
        })
        .build()
        .unwrap();

    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(workflow.run_question("q"))
        .unwrap()
}

proptest! {
    #[test]
    fn attempts_stay_within_budget(budget in 0u32..5, failures in 0u32..8) {
        let session = run(budget, failures);
        prop_assert!(session.recovery_attempts() <= budget);
        prop_assert_eq!(session.recovery_attempts(), failures.min(budget));
        prop_assert!(!(session.error.is_some() && session.response.is_some()));
    }

    #[test]
    fn outcome_follows_failure_count(budget in 0u32..5, failures in 0u32..8) {
        let session = run(budget, failures);
        let outcome = session.outcome();
        if failures < budget || failures == 0 {
            let answered = matches!(outcome, SessionOutcome::Answered { .. });
            prop_assert!(answered, "expected an answer, got {:?}", outcome);
        } else if budget == 0 {
            let failed = matches!(outcome, SessionOutcome::Failed { .. });
            prop_assert!(failed, "expected a failure, got {:?}", outcome);
        } else {
            prop_assert_eq!(outcome, SessionOutcome::Incomplete);
        }
    }

    #[test]
    fn history_bounded_by_step_limit(budget in 0u32..5, failures in 0u32..8) {
        let session = run(budget, failures);
        prop_assert!(session.history().len() <= 2 + 2 * budget as usize + 1);
        prop_assert!(session.history().len() >= 2);
    }
}
