use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use stride_agent::{Assistant, HttpLlmClient, LlmClient, OfflineLlmClient, PlanGateway};
use stride_core::config::AppConfig;

/// Interactive REPL over stdin. Drives one session: each line is a turn,
/// and the first time the session reports readiness the plan gateway is
/// invoked exactly once and the summary printed.
pub async fn run(config: AppConfig, seed: Option<u64>) -> Result<()> {
    let client = build_client(&config);
    let mut assistant = match seed {
        Some(seed) => Assistant::seeded(client.clone(), &config, seed),
        None => Assistant::new(client.clone(), &config),
    };
    let mut gateway = PlanGateway::new(client, &config);

    if !assistant.health_check().generation_configured {
        println!("(no generation backend available; replies will use built-in fallbacks)");
    }
    println!("{}", assistant.greeting());
    println!("Type :reset to start over, :quit to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            ":quit" | ":exit" => break,
            ":reset" => {
                assistant.reset();
                println!("{}", assistant.greeting());
                continue;
            }
            _ => {}
        }

        let reply = assistant.handle_turn(input).await;
        println!("{reply}");

        if assistant.is_ready_for_plan() {
            if let Some(context) = assistant.finalize_goal_context() {
                tracing::info!(
                    event_name = "cli.plan_synthesis_started",
                    session_id = %assistant.session_id(),
                    goal = %context.goal,
                    "goal context finalized; requesting plan synthesis"
                );
                println!("\nGenerating your plan...");
                let plan = gateway.generate(&context).await;
                println!("\n{}\n", plan.summary());
                assistant.conclude_planning();
            }
        }
    }

    Ok(())
}

fn build_client(config: &AppConfig) -> Arc<dyn LlmClient> {
    match HttpLlmClient::from_config(&config.llm) {
        Ok(client) => Arc::new(client),
        Err(error) => {
            tracing::warn!(
                event_name = "cli.llm_client_unavailable",
                error = %error,
                "could not build generation client; continuing offline"
            );
            Arc::new(OfflineLlmClient)
        }
    }
}
