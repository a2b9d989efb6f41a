pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod ranking;
pub mod rate_limiter;
pub mod rating;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use log::info;

use crate::cli::FilterArgs;
use crate::config::settings::AppConfig;
use crate::domain::TournamentRecord;
use crate::ranking::{Filter, FilterPipeline};
use crate::rating::AliasTable;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;
use crate::services::reporting::ReportingService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_fetch(config_path: &Path, force: bool) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    fetch_tournaments(&config, force)?;
    Ok(())
}

pub fn handle_calculate(
    config_path: &Path,
    filter_args: &FilterArgs,
    refetch: bool,
    resume: Option<&Path>,
) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let filters = filter_pipeline(filter_args, &config.alias_table()?)?;
    let service = ProcessingService::new(config.clone())?;

    let tournaments = match service.cached_tournaments()? {
        Some(tournaments) if !refetch => tournaments,
        _ => fetch_tournaments(&config, refetch)?,
    };
    info!("  → {} tournaments to rate", tournaments.len());

    service.run(&tournaments, resume, &filters)?;
    Ok(())
}

pub fn handle_report(
    config_path: &Path,
    filter_args: &FilterArgs,
    with_summaries: bool,
    with_matrix: bool,
) -> Result<()> {
    let service = ReportingService::new(AppConfig::load(config_path)?)?;
    let filters = filter_pipeline(filter_args, service.aliases())?;
    println!("{}", service.ranking(&filters, with_summaries, with_matrix));
    Ok(())
}

pub fn handle_h2h(config_path: &Path, name: &str, opponent: Option<&str>) -> Result<()> {
    let service = ReportingService::new(AppConfig::load(config_path)?)?;
    println!("{}", service.head_to_head(name, opponent)?);
    Ok(())
}

pub fn handle_predict(config_path: &Path, winner: &str, loser: &str, score: &str) -> Result<()> {
    let service = ReportingService::new(AppConfig::load(config_path)?)?;
    print!("{}", service.predict(winner, loser, score)?);
    Ok(())
}

pub fn handle_seed(config_path: &Path, tournament_key: &str) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let tournament = runtime.block_on(async {
        let mut service = IngestionService::new(&config)?;
        service.fetch_fresh(tournament_key).await
    })?;

    let entrants: Vec<&str> = tournament
        .participants
        .iter()
        .map(|p| p.display_name.as_str())
        .collect();
    info!("  → {} entrants in '{}'", entrants.len(), tournament.name);

    let service = ReportingService::new(config)?;
    print!("{}", service.seed(&entrants)?);
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn fetch_tournaments(config: &AppConfig, force: bool) -> Result<Vec<TournamentRecord>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut service = IngestionService::new(config)?;
        service.run(force).await
    })
}

/// Build the filter pipeline in flag order, rank cutoff last.
pub fn filter_pipeline(args: &FilterArgs, aliases: &AliasTable) -> Result<FilterPipeline> {
    let mut pipeline = FilterPipeline::new();
    if let Some(min) = args.min_games {
        pipeline.push(Filter::MinGames(min));
    }
    if let Some(min) = args.min_wins {
        pipeline.push(Filter::MinWins(min));
    }
    if let Some(min) = args.min_tournaments {
        pipeline.push(Filter::MinTournaments(min));
    }
    if let Some(min) = args.min_rating {
        pipeline.push(Filter::MinRating(min));
    }
    if let Some(path) = &args.include {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read include list {}", path.display()))?;
        pipeline.push(Filter::include(content.lines(), aliases)?);
    }
    if let Some(n) = args.top {
        pipeline.push(Filter::Top(n));
    }
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_pipeline_order() {
        let args = FilterArgs {
            min_games: Some(3),
            top: Some(10),
            ..FilterArgs::default()
        };
        let pipeline = filter_pipeline(&args, &AliasTable::new()).unwrap();
        assert_eq!(pipeline.filters(), [Filter::MinGames(3), Filter::Top(10)]);
        assert!(filter_pipeline(&FilterArgs::default(), &AliasTable::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_include_file() {
        let dir = std::env::temp_dir().join("bracket_elo_test_include");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("include.txt");
        std::fs::write(&path, "alpha\n\n  Bravo \n").unwrap();

        let args = FilterArgs {
            include: Some(path),
            ..FilterArgs::default()
        };
        let mut aliases = AliasTable::new();
        aliases.insert("ALPHA", "ACE");
        let pipeline = filter_pipeline(&args, &aliases).unwrap();
        let expected = ["ACE", "BRAVO"].map(String::from).into_iter().collect();
        assert_eq!(pipeline.filters(), [Filter::Include(expected)]);

        let missing = FilterArgs {
            include: Some(dir.join("missing.txt")),
            ..FilterArgs::default()
        };
        assert!(filter_pipeline(&missing, &aliases).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
