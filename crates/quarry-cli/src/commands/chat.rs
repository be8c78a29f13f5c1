//! Interactive question loop
//!
//! Reads one question per line, answers it with the previous turns as
//! context, and appends every exchange to the daily interaction log.

use crate::factories;
use crate::interaction_log::InteractionLog;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use quarry_config::QuarryConfig;
use quarry_core::{ConversationMemory, QueryWorkflow, SessionOutcome, Turn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

const EXIT_COMMAND: &str = "q";

pub async fn execute(config: QuarryConfig) -> Result<()> {
    let workflow = factories::create_workflow(&config).await?;
    let log = InteractionLog::new(&config.chat.log_dir);
    let memory = ConversationMemory::new(config.chat.history_size);

    println!("{}", "Ask a question about your data ('q' to quit).".bold());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_loop(&workflow, memory, &log, stdin, &mut stdout).await?;
    Ok(())
}

/// Drive the loop over any line source; returns the number of questions answered
pub async fn run_loop<R, W>(
    workflow: &QueryWorkflow,
    mut memory: ConversationMemory,
    log: &InteractionLog,
    input: R,
    out: &mut W,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: std::io::Write,
{
    let mut lines = input.lines();
    let mut asked = 0;

    loop {
        write!(out, "\n{} ", "Question:".green().bold())?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if question.is_empty() {
            continue;
        }
        asked += 1;

        let session = match workflow.run(question, &memory).await {
            Ok(session) => session,
            Err(e) => {
                writeln!(out, "\n{} {}", "Sorry, I encountered an error:".red().bold(), e)?;
                continue;
            }
        };
        output::write_session(out, &session)?;

        let sql = session.executed_query().map(str::to_string);
        let response = match session.outcome() {
            SessionOutcome::Answered { response } => Some(response),
            _ => None,
        };

        if let Err(e) = log.append(question, sql.as_deref(), response.as_deref()) {
            warn!(dir = %log.dir().display(), error = %e, "Failed to write interaction log");
        }

        memory.push(Turn {
            question: question.to_string(),
            sql,
            response,
        });
    }

    Ok(asked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::test_support::{rental_rows, ScriptedExecutor, ScriptedGenerator, ScriptedRecoverer};
    use std::sync::Arc;

    fn workflow(generator: Arc<ScriptedGenerator>) -> QueryWorkflow {
        let executor = ScriptedExecutor::new()
            .rows("SELECT COUNT(*) FROM film", rental_rows(1))
            .rows("SELECT title FROM film", rental_rows(2));
        QueryWorkflow::builder()
            .generator(generator)
            .executor(Arc::new(executor))
            .recoverer(Arc::new(ScriptedRecoverer::passthrough()))
            .schema_text("Table: film\n  - title (TEXT)")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_loop_answers_until_quit_and_logs() {
        colored::control::set_override(false);
        let generator = Arc::new(
            ScriptedGenerator::new()
                .reply("SELECT COUNT(*) FROM film")
                .reply("One film.")
                .reply("SELECT title FROM film")
                .reply("Two titles."),
        );
        let workflow = workflow(generator.clone());
        let dir = tempfile::tempdir().unwrap();
        let log = InteractionLog::new(dir.path());
        let input: &[u8] = b"how many films?\n\nand their titles?\nq\nignored\n";
        let mut out = Vec::new();

        let asked = run_loop(&workflow, ConversationMemory::new(5), &log, input, &mut out)
            .await
            .unwrap();

        assert_eq!(asked, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("One film."));
        assert!(text.contains("Two titles."));

        // second generation call carries the first turn as context
        let calls = generator.calls();
        assert!(calls[2].user_message.contains("how many films?"));
        assert!(calls[2].user_message.contains("and their titles?"));

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains("Question: how many films?"));
        assert!(content.contains("Generated SQL: SELECT title FROM film"));
        assert!(content.contains("Response: Two titles."));
    }

    #[tokio::test]
    async fn test_loop_stops_at_end_of_input() {
        let workflow = workflow(Arc::new(ScriptedGenerator::new()));
        let dir = tempfile::tempdir().unwrap();
        let log = InteractionLog::new(dir.path());
        let input: &[u8] = b"";
        let mut out = Vec::new();

        let asked = run_loop(&workflow, ConversationMemory::new(5), &log, input, &mut out)
            .await
            .unwrap();
        assert_eq!(asked, 0);
    }
}
