use anyhow::Result;

use bracket_elo::cli::{Cli, Command};
use bracket_elo::{
    handle_calculate, handle_completions, handle_fetch, handle_h2h, handle_predict, handle_report,
    handle_seed, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = cli.config.as_path();
    match &cli.command {
        Command::Fetch { force } => handle_fetch(config, *force),
        Command::Calculate {
            filters,
            refetch,
            resume,
        } => handle_calculate(config, filters, *refetch, resume.as_deref()),
        Command::Report {
            filters,
            summaries,
            matrix,
        } => handle_report(config, filters, *summaries, *matrix),
        Command::H2h { name, opponent } => handle_h2h(config, name, opponent.as_deref()),
        Command::Predict {
            winner,
            loser,
            score,
        } => handle_predict(config, winner, loser, score),
        Command::Seed { tournament } => handle_seed(config, tournament),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
