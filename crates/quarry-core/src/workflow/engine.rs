//! Workflow engine and builder

use super::error::{WorkflowError, WorkflowResult};
use super::router::next_transition;
use super::step::{StepName, Transition};
use crate::session::{ConversationMemory, QuerySession};
use crate::traits::{QueryExecutor, SchemaProvider, TextGenerator, ValueRecoverer};
use quarry_config::WorkflowConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// The question-to-answer orchestrator
///
/// Owns no I/O of its own; every external call goes through an injected
/// collaborator. One workflow serves any number of independent sessions.
pub struct QueryWorkflow {
    generator: Arc<dyn TextGenerator>,
    executor: Arc<dyn QueryExecutor>,
    recoverer: Arc<dyn ValueRecoverer>,
    schema: String,
    config: WorkflowConfig,
}

impl std::fmt::Debug for QueryWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryWorkflow")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QueryWorkflow {
    /// Start building a workflow
    pub fn builder() -> QueryWorkflowBuilder {
        QueryWorkflowBuilder::default()
    }

    /// Engine settings
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Schema description embedded in prompts
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub(crate) fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    pub(crate) fn executor(&self) -> &dyn QueryExecutor {
        self.executor.as_ref()
    }

    pub(crate) fn recoverer(&self) -> &dyn ValueRecoverer {
        self.recoverer.as_ref()
    }

    /// Most steps a session can take under the configured budget
    ///
    /// generate + execute, then one repair and re-execution per attempt, then
    /// the response.
    pub fn step_limit(&self) -> usize {
        2 + 2 * self.config.max_recovery_attempts as usize + 1
    }

    /// Answer a question, prepending the conversation context
    pub async fn run(
        &self,
        question: &str,
        memory: &ConversationMemory,
    ) -> WorkflowResult<QuerySession> {
        if question.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }

        self.run_session(QuerySession::new(memory.contextualize(question)))
            .await
    }

    /// Answer a question with no conversation context
    pub async fn run_question(&self, question: &str) -> WorkflowResult<QuerySession> {
        self.run(question, &ConversationMemory::default()).await
    }

    /// Drive an existing session from the first step to the end
    pub async fn run_session(&self, mut state: QuerySession) -> WorkflowResult<QuerySession> {
        let budget = self.config.max_recovery_attempts;
        let limit = self.step_limit();
        info!(session = %state.session_id, "Starting query session");

        let mut step = StepName::GenerateSql;
        let mut steps_taken = 0usize;

        loop {
            steps_taken += 1;
            if steps_taken > limit {
                return Err(WorkflowError::StepLimitExceeded { limit });
            }

            let history_before = state.history().len();
            let attempts_before = state.recovery_attempts();
            debug!(session = %state.session_id, step = %step, "Running step");

            state = self.dispatch(step, state).await;
            check_invariants(step, &state, history_before, attempts_before, budget)?;

            match next_transition(step, &state, budget) {
                Transition::Step(next) => step = next,
                Transition::End => break,
            }
        }

        if state.error.is_some() && state.response.is_some() {
            return Err(WorkflowError::InvariantViolated {
                step,
                detail: "session ended with both a response and an error".to_string(),
            });
        }

        info!(
            session = %state.session_id,
            steps = steps_taken,
            recovery_attempts = state.recovery_attempts(),
            answered = state.response.is_some(),
            "Query session finished"
        );
        Ok(state)
    }

    async fn dispatch(&self, step: StepName, state: QuerySession) -> QuerySession {
        match step {
            StepName::GenerateSql => self.generate_sql(state).await,
            StepName::ExecuteSql => self.execute_sql(state).await,
            StepName::RecoverSql => self.recover_sql(state).await,
            StepName::GenerateResponse => self.generate_response(state).await,
        }
    }
}

fn check_invariants(
    step: StepName,
    state: &QuerySession,
    history_before: usize,
    attempts_before: u32,
    budget: u32,
) -> WorkflowResult<()> {
    let violation = |detail: String| WorkflowError::InvariantViolated { step, detail };

    if state.history().len() < history_before {
        return Err(violation(format!(
            "history shrank from {} to {} entries",
            history_before,
            state.history().len()
        )));
    }
    if state.recovery_attempts() < attempts_before {
        return Err(violation(format!(
            "recovery attempts decreased from {} to {}",
            attempts_before,
            state.recovery_attempts()
        )));
    }
    if state.recovery_attempts() > budget {
        return Err(violation(format!(
            "recovery attempts {} exceed budget {}",
            state.recovery_attempts(),
            budget
        )));
    }
    Ok(())
}

/// Builder for [`QueryWorkflow`]
#[derive(Default)]
pub struct QueryWorkflowBuilder {
    generator: Option<Arc<dyn TextGenerator>>,
    executor: Option<Arc<dyn QueryExecutor>>,
    recoverer: Option<Arc<dyn ValueRecoverer>>,
    schema: Option<String>,
    config: WorkflowConfig,
}

impl QueryWorkflowBuilder {
    /// Language model gateway
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Database executor
    pub fn executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Zero-row value recoverer
    pub fn recoverer(mut self, recoverer: Arc<dyn ValueRecoverer>) -> Self {
        self.recoverer = Some(recoverer);
        self
    }

    /// Read the schema description once from a provider
    pub fn schema(mut self, provider: &dyn SchemaProvider) -> Self {
        self.schema = Some(provider.schema_description());
        self
    }

    /// Use a pre-rendered schema description
    pub fn schema_text(mut self, description: impl Into<String>) -> Self {
        self.schema = Some(description.into());
        self
    }

    /// Engine settings
    pub fn config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble the workflow
    pub fn build(self) -> WorkflowResult<QueryWorkflow> {
        let missing = |what: &str| WorkflowError::Configuration(format!("no {} configured", what));

        Ok(QueryWorkflow {
            generator: self.generator.ok_or_else(|| missing("text generator"))?,
            executor: self.executor.ok_or_else(|| missing("query executor"))?,
            recoverer: self.recoverer.ok_or_else(|| missing("value recoverer"))?,
            schema: self.schema.ok_or_else(|| missing("schema"))?,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedExecutor, ScriptedGenerator, ScriptedRecoverer};

    #[test]
    fn test_build_requires_collaborators() {
        let err = QueryWorkflow::builder()
            .generator(Arc::new(ScriptedGenerator::new()))
            .executor(Arc::new(ScriptedExecutor::new()))
            .schema_text("Table: film")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Configuration("no value recoverer configured".to_string())
        );
    }

    #[test]
    fn test_step_limit_follows_budget() {
        let workflow = QueryWorkflow::builder()
            .generator(Arc::new(ScriptedGenerator::new()))
            .executor(Arc::new(ScriptedExecutor::new()))
            .recoverer(Arc::new(ScriptedRecoverer::passthrough()))
            .schema_text("Table: film")
            .config(WorkflowConfig {
                max_recovery_attempts: 1,
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(workflow.step_limit(), 5);
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let workflow = QueryWorkflow::builder()
            .generator(Arc::new(ScriptedGenerator::new()))
            .executor(Arc::new(ScriptedExecutor::new()))
            .recoverer(Arc::new(ScriptedRecoverer::passthrough()))
            .schema_text("")
            .build()
            .unwrap();

        let err = workflow.run_question("   ").await.unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
    }
}
