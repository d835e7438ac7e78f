use clap::{Parser, Subcommand};
use leaderboard_engine::{EngineConfig, LeaderboardEngine, LeaderboardError};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leaderboard-cli")]
#[command(about = "Leaderboard Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Feed URL (overrides config)
    #[arg(long)]
    feed_url: Option<String>,

    /// Feed file (overrides config)
    #[arg(long)]
    feed_path: Option<PathBuf>,

    /// Base URL for avatar files
    #[arg(long)]
    avatar_base: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall ranking
    Top {
        /// Number of players
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Wins podium and board
    Wins,

    /// Kills board
    Kills,

    /// Score and rank of one player
    Rank {
        nickname: String,
    },

    /// Typeahead suggestions
    Search {
        query: String,

        /// Maximum suggestions (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Full player profile
    Profile {
        nickname: String,
    },

    /// Ingestion statistics
    Stats,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaderboard_engine=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.feed_url {
        config.feed.url = Some(url);
    }
    if let Some(path) = cli.feed_path {
        config.feed.url = None;
        config.feed.path = Some(path);
    }
    if cli.avatar_base.is_some() {
        config.avatar_base = cli.avatar_base;
    }

    let engine = LeaderboardEngine::from_config(&config)?;
    let board = engine.refresh().await?;

    match cli.command {
        Commands::Top { limit } => {
            let top = board.top(limit);
            if cli.json {
                return print_json(&top);
            }

            println!("🏆 Ranking ({} players)", board.len());
            for entry in top {
                println!("   #{:<3} {:<24} {:>8} pts", entry.rank, entry.record.nickname, entry.score);
            }
        }

        Commands::Wins => {
            let boards = board.boards();
            if cli.json {
                return print_json(&(&boards.podium, &boards.wins));
            }

            println!("🥇 Podium:");
            for entry in &boards.podium {
                println!("   {}. {} - {} wins", entry.position, entry.record.nickname, entry.value);
            }
            if !boards.wins.is_empty() {
                println!("\n📋 Wins:");
                for entry in &boards.wins {
                    println!("   {}. {} - {}", entry.position, entry.record.nickname, entry.value);
                }
            }
        }

        Commands::Kills => {
            let kills = board.boards().kills;
            if cli.json {
                return print_json(&kills);
            }

            println!("⚔️ Kills:");
            for entry in &kills {
                println!("   {}. {} - {}", entry.position, entry.record.nickname, entry.value);
            }
        }

        Commands::Rank { nickname } => match board.rank_of(&nickname) {
            Some(info) => {
                if cli.json {
                    return print_json(&info);
                }
                println!("✅ {}: #{} of {} ({} pts)", nickname, info.rank, board.len(), info.score);
            }
            None => {
                let hints = board.did_you_mean(&nickname, 3);
                if !hints.is_empty() {
                    eprintln!("❓ Did you mean: {}", hints.join(", "));
                }
                return Err(LeaderboardError::PlayerNotFound(nickname).into());
            }
        },

        Commands::Search { query, limit } => {
            let limit = limit.unwrap_or(config.suggestion_limit);
            let suggestions = board.suggest(&query, limit);
            if cli.json {
                return print_json(&suggestions);
            }

            println!("🔍 Searching for: {}", query);
            for (i, player) in suggestions.iter().enumerate() {
                println!("   {}. {}", i + 1, player.nickname);
            }
        }

        Commands::Profile { nickname } => {
            let profile = match engine.profile(&nickname).await {
                Ok(profile) => profile,
                Err(e) => {
                    let hints = board.did_you_mean(&nickname, 3);
                    if !hints.is_empty() {
                        eprintln!("❓ Did you mean: {}", hints.join(", "));
                    }
                    return Err(e.into());
                }
            };
            if cli.json {
                return print_json(&profile);
            }

            let record = &profile.record;
            println!("👤 {} ({})", record.nickname, profile.handle());
            println!("   Rank: {}", profile.rank_label());
            println!("   Score: {}", profile.score);
            println!("   Level: {} (XP {}/{})", record.level, profile.xp.current, profile.xp.max);
            println!("   Wins: {}  Kills: {}  Matches: {}", record.wins, record.kills, record.deaths);
            if let Some(url) = &profile.avatar.primary {
                println!("   Avatar: {}", url);
            }

            println!("\n🎖️ Achievements:");
            for category in &profile.achievements {
                println!("   {} {}/{}", category.title, category.unlocked(), category.total());
                for achievement in category.achievements.iter().filter(|a| a.unlocked) {
                    println!("      ✓ {} - {}", achievement.name, achievement.description);
                }
            }
        }

        Commands::Stats => {
            let stats = board.stats();
            if cli.json {
                return print_json(&stats);
            }

            println!("📊 Feed Statistics:");
            println!("   Source: {}", engine.source_name());
            println!("   Players: {}", stats.players);
            println!("   Raw records: {}", stats.raw_records);
            println!("   Dropped fragments: {}", stats.dropped_fragments);
            println!("   Stage: {:?}", stats.stage);
            println!("   Built at: {}", stats.built_at.format("%Y-%m-%d %H:%M:%S"));
        }
    }

    Ok(())
}
