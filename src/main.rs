use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

use guardcheck::config::Config;
use guardcheck::moderation::{GroqModerator, ModerationModel};
use guardcheck::output::json::{self, VerdictReport};
use guardcheck::parser::{parse_moderation_reply, ModerationVerdict, ParsePolicy};

/// Guardcheck: check prompts against the Llama Guard hazard taxonomy.
///
/// Sends text to a hosted Llama Guard model and reports whether it is safe,
/// and if not, which MLCommons hazard categories it violates.
#[derive(Parser)]
#[command(name = "guardcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a prompt to the moderation model and show the verdict
    Check {
        /// Text to analyse (reads --file or stdin when omitted)
        prompt: Option<String>,

        /// Read the prompt from a file
        #[arg(long, short, conflicts_with = "prompt")]
        file: Option<PathBuf>,

        /// How to interpret the model's reply
        #[arg(long, value_enum)]
        policy: Option<ParsePolicy>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,

        /// Groq API key for this run (overrides GROQ_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Moderation model to query (overrides GUARDCHECK_MODEL)
        #[arg(long)]
        model: Option<String>,
    },

    /// Parse a saved model reply without calling the API
    Parse {
        /// Raw reply text (reads stdin when omitted)
        reply: Option<String>,

        /// How to interpret the reply
        #[arg(long, value_enum)]
        policy: Option<ParsePolicy>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the S1-S14 safety categories
    Categories,

    /// Show the effective configuration (model, endpoint, key presence)
    Status,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("guardcheck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            prompt,
            file,
            policy,
            json,
            api_key,
            model,
        } => {
            let config = Config::load()?.with_overrides(api_key, model, policy);
            config.require_api_key()?;

            let prompt = read_input(prompt, file.as_ref(), "prompt")?;
            let moderator =
                GroqModerator::new(&config.groq_api_key, &config.model, &config.api_url)?;

            info!(model = moderator.model_id(), "Checking prompt");

            let spinner = if json { None } else { Some(start_spinner()?) };
            let outcome = moderator.moderate(&prompt).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let reply = outcome?;

            let verdict = parse_moderation_reply(&reply, config.parse_policy);
            info!(verdict = verdict.as_str(), policy = %config.parse_policy, "Parsed reply");

            present(&verdict, &reply, Some(moderator.model_id()), config.parse_policy, json)?;
            Ok(exit_code(&verdict))
        }

        Commands::Parse {
            reply,
            policy,
            json,
        } => {
            let config = Config::load()?;
            let policy = policy.unwrap_or(config.parse_policy);
            let reply = read_input(reply, None, "reply")?;

            let verdict = parse_moderation_reply(&reply, policy);
            present(&verdict, &reply, None, policy, json)?;
            Ok(exit_code(&verdict))
        }

        Commands::Categories => {
            guardcheck::output::terminal::display_categories();
            Ok(ExitCode::SUCCESS)
        }

        Commands::Status => {
            let config = Config::load()?;
            guardcheck::status::show(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Take input from the argument, else the file, else stdin.
fn read_input(arg: Option<String>, file: Option<&PathBuf>, what: &str) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} from {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("{}", format!("Enter the {what}, then press Ctrl-D:").dimmed());
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .with_context(|| format!("Failed to read {what} from stdin"))?;
    Ok(buf)
}

fn start_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);
    spinner.set_message("Please wait...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn present(
    verdict: &ModerationVerdict,
    reply: &str,
    model: Option<&str>,
    policy: ParsePolicy,
    as_json: bool,
) -> Result<()> {
    if as_json {
        let report = VerdictReport {
            model,
            policy,
            verdict,
            raw_reply: reply,
        };
        println!("{}", json::render(&report)?);
    } else {
        guardcheck::output::terminal::display_verdict(verdict, reply);
    }
    Ok(())
}

/// 0 for safe, 1 for anything that shouldn't be let through.
fn exit_code(verdict: &ModerationVerdict) -> ExitCode {
    if verdict.is_safe() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
