use crate::infra::load_engine;
use crate::screen::{run_classify, run_evaluate, ClassifyArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use denboard::config::{AppConfig, RulesConfig};
use denboard::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "denboard",
    about = "Screen boarding bookings for breed, weight, and meet & greet requirements",
    version
)]
struct Cli {
    /// JSON rule-table file overriding BOARDING_RULES_PATH and the house policy
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a single pet by breed and weight
    Classify(ClassifyArgs),
    /// Evaluate a whole booking from a JSON list of pets
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.rules {
        config.rules = RulesConfig { path: Some(path) };
    }

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::Classify(args) => run_classify(args, &load_engine(&config.rules)?),
        Command::Evaluate(args) => run_evaluate(args, &load_engine(&config.rules)?),
    }
}
