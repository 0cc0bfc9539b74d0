//! Tournament desk.
//!
//! Prepares a karate tournament from the command line: imports the roster,
//! lists and merges the generated categories and draws brackets. State
//! lives in a JSON snapshot between invocations.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Error, anyhow};
use karate_tournament::persistence::JsonFileRepository;
use log::info;
use pico_args::Arguments;

use crate::config::CliConfig;

const HELP: &str = "\
Prepare a karate tournament

USAGE:
  kt_cli [OPTIONS] <COMMAND>

COMMANDS:
  import --input FILE [--by-belt] [--by-age]
                           Register participants from a JSON file
  list                     Print categories with their indices
  merge --into INDEX --from INDEX
                           Merge two categories
  bracket --category INDEX [--seed N]
                           Draw the bracket of a category

OPTIONS:
  --data       FILE        Tournament snapshot  [default: env KT_DATA_FILE or tournament.json]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  KT_DATA_FILE             Tournament snapshot path
  KT_TOURNAMENT_NAME       Name of a newly created tournament
  KT_PARTITION_BY_BELT     Split categories by belt (true/false)
  KT_PARTITION_BY_AGE      Split categories by age (true/false)
  KT_MATCH_DURATION_SECS   Regulation time of timed matches
  KT_OVERTIME_SECS         Length of each overtime segment
  KT_ADVANTAGE_RULE        First scorer wins a tied match (true/false)
  KT_MIN_JUDGES            Marks required per judged performance
  KT_BRACKET_SEED          Fixed seed for bracket draws
  RUST_LOG                 Log filter (default: info)
";

enum Command {
    Import {
        input: PathBuf,
        partitioning: Option<(bool, bool)>,
    },
    List,
    Merge {
        into: usize,
        from: usize,
    },
    Bracket {
        category: usize,
        seed: Option<u64>,
    },
}

struct Args {
    data: Option<PathBuf>,
    command: Command,
}

fn parse_args(mut pargs: Arguments) -> Result<Args, Error> {
    let data = pargs.opt_value_from_os_str("--data", |s| {
        Ok::<_, std::convert::Infallible>(PathBuf::from(s))
    })?;

    let command = match pargs.subcommand()?.as_deref() {
        Some("import") => {
            let input = pargs.value_from_os_str("--input", |s| {
                Ok::<_, std::convert::Infallible>(PathBuf::from(s))
            })?;
            let by_belt = pargs.contains("--by-belt");
            let by_age = pargs.contains("--by-age");
            Command::Import {
                input,
                partitioning: (by_belt || by_age).then_some((by_belt, by_age)),
            }
        }
        Some("list") => Command::List,
        Some("merge") => Command::Merge {
            into: pargs.value_from_str("--into")?,
            from: pargs.value_from_str("--from")?,
        },
        Some("bracket") => Command::Bracket {
            category: pargs.value_from_str("--category")?,
            seed: pargs.opt_value_from_str("--seed")?,
        },
        Some(other) => return Err(anyhow!("Unknown command `{other}`; see --help")),
        None => return Err(anyhow!("No command given; see --help")),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        return Err(anyhow!("Unexpected arguments: {remaining:?}"));
    }

    Ok(Args { data, command })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = parse_args(pargs)?;

    logging::init();

    let config = CliConfig::from_env(args.data);
    config.validate()?;
    info!("Using tournament data at {}", config.data_file.display());

    let repo = JsonFileRepository::new(config.data_file.clone());
    let started = Instant::now();

    let name = match args.command {
        Command::Import {
            input,
            partitioning,
        } => {
            let report = commands::import(&repo, &config, &input, partitioning).await?;
            println!("Imported {} participants", report.imported.len());
            for skipped in &report.skipped {
                println!("  skipped row {}: {}", skipped.row, skipped.error);
            }
            "import"
        }
        Command::List => {
            let lines = commands::list(&repo).await?;
            if lines.is_empty() {
                println!("No categories");
            }
            for line in lines {
                println!("{line}");
            }
            "list"
        }
        Command::Merge { into, from } => {
            let line = commands::merge(&repo, into, from).await?;
            println!("Merged into:");
            println!("{line}");
            "merge"
        }
        Command::Bracket { category, seed } => {
            let bouts = commands::bracket(&repo, &config, category, seed).await?;
            println!("Opening bouts:");
            for bout in bouts {
                println!("{bout}");
            }
            "bracket"
        }
    };

    logging::log_command(name, started.elapsed());
    Ok(())
}
