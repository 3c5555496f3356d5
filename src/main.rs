use anyhow::{anyhow, Context, Result};
use bat::PrettyPrinter;
use clap::{Parser, Subcommand};
use cliclack::spinner;
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tool_agent::agent::{Agent, AgentSettings, DEFAULT_MAX_TOKENS, DEFAULT_MAX_TURNS};
use tool_agent::ask::{ask, AskSettings, DEFAULT_ASK_MAX_TOKENS};
use tool_agent::configs::anthropic::DEFAULT_MODEL;
use tool_agent::configs::{AnthropicProviderConfig, EnvConfig, WeatherConfig};
use tool_agent::providers::anthropic::AnthropicProvider;
use tool_agent::providers::types::tool::ServerTool;
use tool_agent::tools::{ToolRegistry, WeatherTool};

const DEFAULT_AGENT_PROMPT: &str = "What's the weather in NYC, Chicago, and LA right now? Compare them.";
const DEFAULT_ASK_PROMPT: &str = "What's the weather like in NYC right now? Be brief, 2-3 sentences.";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Anthropic API Key (can also be set via ANTHROPIC_API_KEY environment variable)
    #[arg(short, long, global = true)]
    api_key: Option<String>,

    /// Model to use
    #[arg(short, long, global = true, default_value = DEFAULT_MODEL)]
    model: String,

    /// Print the answer as-is instead of rendering markdown
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a prompt, letting the model call the local weather tool
    Agent {
        #[arg(default_value = DEFAULT_AGENT_PROMPT)]
        prompt: String,

        /// Give up after this many model round-trips
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
        max_tokens: u32,

        /// Optional system prompt
        #[arg(long)]
        system: Option<String>,

        /// Write the full conversation as JSON to this file
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// Ask a single question, with the hosted web search tool enabled
    Ask {
        #[arg(default_value = DEFAULT_ASK_PROMPT)]
        prompt: String,

        /// Don't offer web search
        #[arg(long)]
        no_web_search: bool,

        /// Maximum searches the endpoint may run
        #[arg(long, default_value_t = 3)]
        max_uses: u32,

        #[arg(long, default_value_t = DEFAULT_ASK_MAX_TOKENS)]
        max_tokens: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Get API key from command line or environment variable
    let config = match cli.api_key {
        Some(api_key) => AnthropicProviderConfig::from_env_with_api_key(api_key)?,
        None => AnthropicProviderConfig::from_env().context(
            "API key must be provided via --api-key or ANTHROPIC_API_KEY environment variable",
        )?,
    };
    let provider = AnthropicProvider::new(config)?;

    let answer = match cli.command {
        Command::Agent {
            prompt,
            max_turns,
            max_tokens,
            system,
            transcript,
        } => {
            let registry = ToolRegistry::new().with(Box::new(WeatherTool::new(WeatherConfig::from_env()?)?))?;
            let settings = AgentSettings {
                model: cli.model,
                max_tokens,
                max_turns,
                system,
            };
            let agent = Agent::new(Box::new(provider), registry, settings);

            let reply = with_spinner(cli.plain, || agent.run(&prompt))?;

            if let Some(path) = transcript {
                let json = serde_json::to_string_pretty(&reply.conversation)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("could not write transcript to {}", path.display()))?;
            }
            reply.text
        }
        Command::Ask {
            prompt,
            no_web_search,
            max_uses,
            max_tokens,
        } => {
            let mut settings = AskSettings {
                model: cli.model,
                max_tokens,
                ..AskSettings::default()
            };
            if !no_web_search {
                settings.server_tools.push(ServerTool::web_search(Some(max_uses)));
            }

            with_spinner(cli.plain, || ask(&provider, &settings, &prompt))?
        }
    };

    if cli.plain {
        println!("{}", answer);
    } else {
        render(&answer)?;
        println!();
    }
    Ok(())
}

fn with_spinner<T, E>(plain: bool, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    if plain {
        return f();
    }
    let spin = spinner();
    spin.start("awaiting reply");
    let result = f();
    spin.stop("");
    result
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow!("could not render answer: {}", e))?;
    Ok(())
}
