//! Console chat host
//!
//! Owns one session, threads it through `process_turn` for every line read
//! from stdin and prints the response. Logs go to stderr.
//!
//! Usage: `copy-assistant [--config <path>] [--json-logs] [--no-delay]`
//!
//! Commands: `/reset` starts a new session, `/state` prints it as JSON,
//! `/quit` exits.

mod thinking;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use copy_assistant_agent::{format_amount, AssistantResponse, CopyAssistant, TurnOutcome};
use copy_assistant_config::{AssistantSettings, LoggingSettings};

use crate::thinking::ThinkingDelay;

#[derive(Parser, Debug)]
#[command(name = "copy-assistant", about = "Console chat with the copywriting assistant")]
struct Args {
    /// Settings file (YAML/TOML/JSON)
    #[arg(long, short, env = "COPY_ASSISTANT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Answer immediately without the typing pause
    #[arg(long)]
    no_delay: bool,
}

fn init_tracing(logging: &LoggingSettings, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if json || logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn render(response: &AssistantResponse) -> String {
    let mut out = response.text.clone();

    if !response.recommendations.is_empty() {
        out.push_str("\n\nРекомендации:");
        for rec in &response.recommendations {
            out.push_str("\n  - ");
            out.push_str(rec);
        }
    }

    if !response.quick_links.is_empty() {
        out.push_str("\n\nСсылки:");
        for link in &response.quick_links {
            out.push_str(&format!("\n  [{}] {} ({})", link.title, link.url, link.description));
        }
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = AssistantSettings::load(args.config.as_deref())
        .context("failed to load settings")?;
    init_tracing(&settings.logging, args.json_logs);

    let delay = if args.no_delay {
        ThinkingDelay::disabled()
    } else {
        ThinkingDelay::from_settings(&settings.console)
    };
    let company = settings.brand.company_name.clone();
    let assistant =
        CopyAssistant::from_settings(settings).context("failed to build assistant")?;

    let mut state = assistant.new_session();
    tracing::info!(session_id = %state.session_id, "Session started");

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{} | /reset, /state, /quit\n> ", company).as_bytes())
        .await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();

        let output = match message {
            "/quit" | "/exit" => break,
            "/reset" => {
                state = assistant.new_session();
                tracing::info!(session_id = %state.session_id, "Session reset");
                "Новая сессия.".to_string()
            }
            "/state" => serde_json::to_string_pretty(&state)?,
            _ => {
                let TurnOutcome {
                    route,
                    response,
                    state: next,
                } = assistant.process_turn(message, state);
                state = next;
                tracing::debug!(route = route.as_str(), "Response ready");

                delay.wait().await;
                if let Some(ref quote) = response.quote {
                    tracing::info!(
                        service = %quote.service_name,
                        final_price = %format_amount(quote.final_price),
                        "Quote issued"
                    );
                }
                render(&response)
            }
        };

        stdout.write_all(format!("{}\n\n> ", output).as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!(
        session_id = %state.session_id,
        turns = state.turn_count,
        "Session ended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "copy-assistant",
            "--config",
            "assistant.yaml",
            "--json-logs",
            "--no-delay",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("assistant.yaml")));
        assert!(args.json_logs);
        assert!(args.no_delay);

        let args = Args::try_parse_from(["copy-assistant", "-c", "other.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("other.toml")));
        assert!(!args.json_logs);
    }

    #[test]
    fn test_args_reject_unknown_flag() {
        assert!(Args::try_parse_from(["copy-assistant", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["copy-assistant", "--config"]).is_err());
    }
}
