//! Desk commands.
//!
//! Every command loads the tournament snapshot, applies one change and
//! saves it back, so the desk can be driven one step at a time.

use anyhow::{Context, Error, anyhow};
use karate_tournament::{
    Tournament,
    bout::MatchPhase,
    bracket::BracketSeeder,
    entities::EntrantId,
    import::{self, ImportReport},
    persistence::SnapshotRepository,
};
use log::info;
use std::path::Path;

use crate::config::CliConfig;

/// Load the saved tournament, or start a new one from `config`
pub async fn load_or_create(
    repo: &dyn SnapshotRepository,
    config: &CliConfig,
) -> Result<Tournament, Error> {
    match repo.load().await? {
        Some(snapshot) => {
            let tournament = Tournament::from_snapshot(snapshot)?;
            info!(
                "Loaded {} ({} participants, {} categories)",
                tournament.settings().name,
                tournament.participants().len(),
                tournament.categories().len()
            );
            Ok(tournament)
        }
        None => {
            info!("No saved tournament, starting {}", config.settings.name);
            Ok(Tournament::new(config.settings.clone())?)
        }
    }
}

async fn load_existing(repo: &dyn SnapshotRepository) -> Result<Tournament, Error> {
    let snapshot = repo
        .load()
        .await?
        .ok_or_else(|| anyhow!("No tournament saved yet; run `import` first"))?;
    Ok(Tournament::from_snapshot(snapshot)?)
}

async fn save(repo: &dyn SnapshotRepository, tournament: &Tournament) -> Result<(), Error> {
    repo.save(&tournament.snapshot())
        .await
        .map_err(|e| anyhow!("Failed to save tournament: {}", e))
}

/// Register every record of a JSON import file
///
/// # Arguments
///
/// * `partitioning` - `(by_belt, by_age)` override for this import
pub async fn import(
    repo: &dyn SnapshotRepository,
    config: &CliConfig,
    input: &Path,
    partitioning: Option<(bool, bool)>,
) -> Result<ImportReport, Error> {
    let json = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let records = import::parse_records(&json)?;

    let mut tournament = load_or_create(repo, config).await?;
    if let Some((by_belt, by_age)) = partitioning {
        tournament.set_partitioning(by_belt, by_age);
    }

    let report = import::import_records(&mut tournament, records);
    save(repo, &tournament).await?;
    Ok(report)
}

/// One line per category, prefixed with the index other commands take
pub async fn list(repo: &dyn SnapshotRepository) -> Result<Vec<String>, Error> {
    let Some(snapshot) = repo.load().await? else {
        return Ok(Vec::new());
    };
    let tournament = Tournament::from_snapshot(snapshot)?;
    Ok(category_lines(&tournament))
}

pub fn category_lines(tournament: &Tournament) -> Vec<String> {
    tournament
        .categories()
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| format!("{index:>3}  {}", category.summary()))
        .collect()
}

/// Merge category `from` into `into`; returns the merged category's line
pub async fn merge(
    repo: &dyn SnapshotRepository,
    into: usize,
    from: usize,
) -> Result<String, Error> {
    let mut tournament = load_existing(repo).await?;
    let merged = tournament.merge_categories(into, from)?;
    save(repo, &tournament).await?;

    let category = tournament.category(merged)?;
    Ok(format!("{merged:>3}  {}", category.summary()))
}

/// Draw the bracket of `category`; returns the opening bouts
pub async fn bracket(
    repo: &dyn SnapshotRepository,
    config: &CliConfig,
    category: usize,
    seed: Option<u64>,
) -> Result<Vec<String>, Error> {
    let mut tournament = load_existing(repo).await?;
    let mut seeder = match seed.or(config.bracket_seed) {
        Some(seed) => BracketSeeder::from_seed(seed),
        None => BracketSeeder::new(),
    };
    let nodes = tournament.open_bracket(category, &mut seeder)?;
    save(repo, &tournament).await?;
    info!("Bracket drawn with {nodes} nodes");

    Ok(opening_bouts(&tournament, category))
}

fn opening_bouts(tournament: &Tournament, category: usize) -> Vec<String> {
    let Ok(category) = tournament.category(category) else {
        return Vec::new();
    };
    let name = |id: EntrantId| {
        tournament
            .entrant_name(id)
            .unwrap_or_else(|| id.to_string())
    };

    category
        .matches
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, m)| m.phase() == MatchPhase::Ready)
        .filter_map(|(index, m)| {
            let (aka, shiro) = (m.aka?, m.shiro?);
            Some(format!("{index:>3}  {} (aka) vs {} (shiro)", name(aka), name(shiro)))
        })
        .collect()
}
