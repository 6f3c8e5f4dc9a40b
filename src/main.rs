use clap::Parser;
use isolation_core::engine::config::AgentConfig;
use isolation_core::engine::eval::Heuristic;
use isolation_core::players::PlayerKind;
use runner::MatchSettings;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod runner;

/// Play knight's Isolation matches between the search agent and a sample opponent.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Opponent: random, greedy, minimax or alpha_beta
    #[arg(short, long, default_value = "random")]
    opponent: PlayerKind,

    /// Games played with the agent moving first
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// Also play every round with the seats swapped
    #[arg(long)]
    fair: bool,

    /// Per-move budget in milliseconds
    #[arg(short, long, default_value_t = 150)]
    time_limit: u64,

    /// Heuristic for the agent: mobility, centrality, aggressive or evasive
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Deepest iterative-deepening pass
    #[arg(long)]
    max_depth: Option<u8>,

    /// JSON agent config; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write every game to this JSON file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Seed for every random choice; entropy when absent
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(path: &Path) -> Result<AgentConfig, Box<dyn Error>> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    Ok(AgentConfig::load_from_json(&json)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut agent = cli
        .config
        .as_deref()
        .map(load_config)
        .transpose()?
        .unwrap_or_default();
    if let Some(heuristic) = cli.heuristic {
        agent.heuristic = heuristic;
    }
    if let Some(max_depth) = cli.max_depth {
        agent.max_depth = max_depth;
    }
    if let Some(seed) = cli.seed {
        agent.seed = Some(seed);
    }

    let settings = MatchSettings {
        agent,
        opponent: cli.opponent,
        rounds: cli.rounds,
        fair: cli.fair,
        time_limit: Duration::from_millis(cli.time_limit),
    };
    tracing::info!(
        "Agent ({}, depth {}) vs {} over {} round(s), {} ms per move",
        settings.agent.heuristic,
        settings.agent.depth_ceiling(),
        settings.opponent,
        settings.rounds,
        cli.time_limit
    );

    let (summary, records) = runner::run_matches(&settings);

    if let Some(path) = &cli.record {
        let log = serde_json::json!({ "summary": summary, "games": records });
        fs::write(path, serde_json::to_string_pretty(&log)?)?;
        tracing::info!("Recorded {} game(s) to {}", records.len(), path.display());
    }

    println!("{}", summary.report(settings.opponent));
    Ok(())
}
