//! Agent command implementation.

use crate::agent::{Agent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use anyhow::Result;
use std::sync::Arc;

/// Run the agent command.
pub async fn run_agent(
    task: &str,
    context: Option<String>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        Output::info("Run 'brandlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let model = model.unwrap_or_else(|| settings.agent.model.clone());
    let max_iterations = settings.agent.max_iterations as usize;

    let toolkit = Toolkit::new(settings)?;
    let system_prompt = toolkit.prompts().agent.system.clone();

    // Create tool context
    let tool_context = ToolContext::new(Arc::new(toolkit));

    // Create and run agent
    let agent = Agent::new(tool_context, &model)
        .with_system_prompt(&system_prompt)
        .with_max_iterations(max_iterations);

    let spinner = Output::spinner("Agent working...");

    match agent.run(task, context.as_deref()).await {
        Ok(response) => {
            spinner.finish_and_clear();

            // Show the agent's response
            println!("\n{}\n", response.content);

            // Show tool calls summary
            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {} {}", call.name, truncate(&call.arguments, 60)));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
