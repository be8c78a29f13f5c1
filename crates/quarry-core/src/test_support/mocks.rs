//! Scripted collaborator mocks

use crate::traits::{
    DbError, DbResult, LlmError, LlmResult, QueryExecutor, RecoveredQuery, RecoveryError,
    RecoveryResult, TextGenerator, ValueRecoverer, ValueSuggestion,
};
use crate::value::{CellValue, Row};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCall {
    /// System instruction sent
    pub system_instruction: String,
    /// User message sent
    pub user_message: String,
}

/// Gateway that replays a queue of replies in order
///
/// An exhausted queue answers with `LlmError::InvalidResponse`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    replies: Arc<Mutex<VecDeque<LlmResult<String>>>>,
    calls: Arc<Mutex<Vec<GenerationCall>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn fail(self, error: LlmError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Every call so far
    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> LlmResult<String> {
        self.calls.lock().unwrap().push(GenerationCall {
            system_instruction: system_instruction.to_string(),
            user_message: user_message.to_string(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("no scripted reply".to_string())))
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Executor answering from a SQL → result table
///
/// Unknown SQL fails with `DbError::Syntax`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    results: Arc<Mutex<HashMap<String, DbResult<Vec<Row>>>>>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned for `sql`
    pub fn rows(self, sql: impl Into<String>, rows: Vec<Row>) -> Self {
        self.results.lock().unwrap().insert(sql.into(), Ok(rows));
        self
    }

    /// Fault raised for `sql`
    pub fn fault(self, sql: impl Into<String>, error: DbError) -> Self {
        self.results.lock().unwrap().insert(sql.into(), Err(error));
        self
    }

    /// Every executed statement, in order
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, sql: &str) -> DbResult<Vec<Row>> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.results
            .lock()
            .unwrap()
            .get(sql)
            .cloned()
            .unwrap_or_else(|| Err(DbError::Syntax(format!("no such statement: {}", sql))))
    }
}

#[derive(Debug, Clone)]
enum RecoveryScript {
    Passthrough,
    Rewrite(RecoveredQuery),
    Fail(RecoveryError),
}

/// Recoverer with a fixed answer
#[derive(Debug, Clone)]
pub struct ScriptedRecoverer {
    script: RecoveryScript,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRecoverer {
    /// Returns every query unchanged
    pub fn passthrough() -> Self {
        Self::with_script(RecoveryScript::Passthrough)
    }

    /// Always proposes `sql`, with one suggestion per `(original, replacement)`
    pub fn rewrite(sql: impl Into<String>, replacements: &[(&str, &str)]) -> Self {
        let suggestions = replacements
            .iter()
            .map(|(original, replacement)| ValueSuggestion {
                original: original.to_string(),
                replacement: replacement.to_string(),
                table: "film".to_string(),
                column: "title".to_string(),
                score: 100,
            })
            .collect();
        Self::with_script(RecoveryScript::Rewrite(RecoveredQuery {
            sql: sql.into(),
            suggestions,
        }))
    }

    /// Always fails
    pub fn failing(error: RecoveryError) -> Self {
        Self::with_script(RecoveryScript::Fail(error))
    }

    fn with_script(script: RecoveryScript) -> Self {
        Self {
            script,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queries passed in so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValueRecoverer for ScriptedRecoverer {
    async fn recover_query(&self, sql: &str) -> RecoveryResult<RecoveredQuery> {
        self.calls.lock().unwrap().push(sql.to_string());
        match &self.script {
            RecoveryScript::Passthrough => Ok(RecoveredQuery::unchanged(sql)),
            RecoveryScript::Rewrite(recovered) => Ok(recovered.clone()),
            RecoveryScript::Fail(error) => Err(error.clone()),
        }
    }
}

/// `n` rows shaped like a rental report, with a decimal revenue column
pub fn rental_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            Row::new()
                .with("category", format!("Category {}", i % 16))
                .with("title", format!("FILM {}", i))
                .with("rentals", 40 - i as i64)
                .with("revenue", CellValue::Decimal(format!("{}.99", 100 + i)))
        })
        .collect()
}
