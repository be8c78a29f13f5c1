//! Terminal rendering of finished sessions

use colored::Colorize;
use quarry_core::{QuerySession, SessionOutcome, StepOutcome};
use std::io::{self, Write};

/// Print the executed SQL and answer, or the error
pub fn write_session(out: &mut impl Write, session: &QuerySession) -> io::Result<()> {
    match session.outcome() {
        SessionOutcome::Answered { response } => {
            writeln!(out, "\n{}", "Executed SQL Query:".bold())?;
            writeln!(
                out,
                "{}",
                session.executed_query().unwrap_or("No SQL generated").cyan()
            )?;
            writeln!(out, "\n{}", "Response:".bold())?;
            writeln!(out, "{}", response)?;
        }
        SessionOutcome::Failed { error } => {
            writeln!(
                out,
                "\n{} {}",
                "Sorry, I encountered an error:".red().bold(),
                error
            )?;
        }
        SessionOutcome::Incomplete => {
            writeln!(
                out,
                "\n{}",
                "The query was repaired but the retry budget ran out before it could run."
                    .yellow()
            )?;
            if let Some(sql) = session.executed_query() {
                writeln!(out, "Last query: {}", sql.cyan())?;
            }
        }
    }
    Ok(())
}

/// Print the execution history and trace messages
pub fn write_history(out: &mut impl Write, session: &QuerySession) -> io::Result<()> {
    writeln!(out, "\n{}", "Execution history:".bold())?;
    for (index, entry) in session.history().iter().enumerate() {
        let time = entry.timestamp.format("%H:%M:%S");
        match &entry.outcome {
            StepOutcome::Output(output) => {
                writeln!(out, "{:>2}. [{}] {} {}", index + 1, time, entry.step, output)?
            }
            StepOutcome::Error(error) => writeln!(
                out,
                "{:>2}. [{}] {} {}",
                index + 1,
                time,
                entry.step,
                error.red()
            )?,
        }
        if let Some(recovered) = &entry.recovered_query {
            writeln!(out, "      recovered query: {}", recovered.cyan())?;
        }
    }

    writeln!(out, "\n{}", "Messages:".bold())?;
    for message in session.messages() {
        writeln!(out, "- {}", message)?;
    }
    writeln!(
        out,
        "\nRecovery attempts: {}",
        session.recovery_attempts()
    )?;
    Ok(())
}
