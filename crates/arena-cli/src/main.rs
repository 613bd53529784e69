//! Tournament CLI
//!
//! Run the full round-robin, replay a single pairing, or list strategies.

use anyhow::Result;
use arena_cli::{report, ArenaConfig};
use clap::{Args, Parser, Subcommand};
use match_logic::{Strategy, Tournament};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "arena")]
#[command(about = "Iterated Prisoner's Dilemma round-robin tournament")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Setup {
    /// JSON configuration file (rounds, seed, payoff, roster)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounds per match, overrides the config file
    #[arg(short, long, allow_negative_numbers = true)]
    rounds: Option<i64>,

    /// Seed for randomised strategies, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Setup {
    fn tournament(&self) -> Result<Tournament> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::load(path)?,
            None => ArenaConfig::default(),
        };
        if self.rounds.is_some() {
            config.rounds = self.rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config.tournament()?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play every ordered pair of the roster and print the matrices
    Run {
        #[command(flatten)]
        setup: Setup,

        /// Directory to write scores.csv and streaks.csv into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// File to write the full result to as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Run matches one after another instead of on the thread pool
        #[arg(long)]
        sequential: bool,
    },
    /// Print one match round by round
    Replay {
        /// Row strategy name
        row: String,
        /// Column strategy name
        column: String,

        #[command(flatten)]
        setup: Setup,
    },
    /// List the built-in strategies
    Strategies,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            setup,
            output_dir,
            json,
            sequential,
        } => {
            let tournament = setup.tournament()?.parallel(!sequential);
            let result = tournament.run()?;

            print!("{}", report::format_report(&result));

            if let Some(dir) = output_dir {
                report::write_matrices(&dir, &result)?;
                tracing::info!("matrices written to {}", dir.display());
            }
            if let Some(path) = json {
                report::write_json(&path, &result)?;
                tracing::info!("results written to {}", path.display());
            }
        }
        Commands::Replay { row, column, setup } => {
            let replay = setup.tournament()?.replay(&row, &column)?;
            print!("{}", report::format_replay(&replay));
        }
        Commands::Strategies => {
            for strategy in Strategy::catalog() {
                println!("{:<18}{}", strategy.kind(), strategy.describe());
            }
        }
    }

    Ok(())
}
