use crate::factories;
use crate::output;
use anyhow::Result;
use quarry_config::QuarryConfig;
use std::io::Write;

/// Answer a single question
pub async fn execute(config: QuarryConfig, question: String, history: bool, json: bool) -> Result<()> {
    let workflow = factories::create_workflow(&config).await?;
    let session = workflow.run_question(&question).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&session)?)?;
        return Ok(());
    }

    output::write_session(&mut out, &session)?;
    if history {
        output::write_history(&mut out, &session)?;
    }
    Ok(())
}
