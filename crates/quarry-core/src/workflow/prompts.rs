//! Prompt templates for the three gateway calls

use crate::session::{HistoryEntry, StepOutcome};

/// Instruction for turning a question into SQL
pub fn generation_instruction(dialect: &str, schema: &str) -> String {
    format!(
        "You are a database expert in {dialect}. Your task is to convert natural language \
questions into {dialect} queries.
Do not make any assumptions about the data in the database. Always refer to the schema.

Schema:
{schema}

Return only the SQL query without any explanations or markdown."
    )
}

/// Instruction for repairing a failing query
pub fn repair_instruction(dialect: &str, schema: &str) -> String {
    format!(
        "You are a database expert in {dialect}. Your task is to fix SQL queries that have errors. \
Analyze the error message and the original query, then provide a corrected version.

When fixing queries:
1. Analyze the error message carefully
2. Do not make any assumptions about the data in the database. Always consider the schema and the data types of columns
3. For \"top N per group\" queries, use window functions like ROW_NUMBER()
4. Rating columns hold categorical labels (e.g. 'PG', 'R') and must never be averaged or summed
5. Ensure aggregate functions match column data types

Database Schema:
{schema}

Return only the corrected SQL query without any explanations or markdown."
    )
}

/// Render prior step outcomes for the repair prompt
///
/// Empty history renders as an empty string.
pub fn history_digest(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return String::new();
    }

    let mut digest = String::from("Previous attempts:\n");
    for entry in history {
        match &entry.outcome {
            StepOutcome::Output(output) => digest.push_str(&format!("- Recovery: {}\n", output)),
            StepOutcome::Error(error) => digest.push_str(&format!("- Error: {}\n", error)),
        }
    }
    digest
}

/// User message for the repair call
pub fn repair_message(question: &str, sql: &str, error: &str, history: &[HistoryEntry]) -> String {
    format!(
        "Original question: {question}
Original query: {sql}
Error message: {error}
{digest}
Please provide a corrected SQL query that resolves this error.",
        digest = history_digest(history)
    )
}

/// Instruction for summarizing rows
pub const SUMMARY_INSTRUCTION: &str = "You are a helpful database analyst. Your task is to summarize \
SQL query results in natural language. Focus on key insights and patterns in the data. \
Be concise but informative.";

/// User message for the summary call
pub fn summary_message(question: &str, results_json: &str) -> String {
    format!(
        "Original question: {question}
Query results: {results_json}

Please provide a natural language summary of these results, highlighting key insights."
    )
}

/// Remove markdown code fences a model may wrap around SQL
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```sql", "")
        .replace("```SQL", "")
        .replace("```", "")
        .trim()
        .to_string()
}
