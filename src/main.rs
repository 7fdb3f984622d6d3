use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duel_ranking::api::{build_router, state::AppState};
use duel_ranking::config::AppConfig;
use duel_ranking::models::{
    parse_date, EntityId, PenaltyRecord, PenaltyType, PlacementRecord, Player, Scope, Tier,
    Tournament, TournamentKind,
};
use duel_ranking::storage::{
    record_result, remove_penalty, remove_placement, save_penalty, save_player, save_tournament,
    Snapshot, StorageConfig,
};

#[derive(Parser)]
#[command(name = "duel-ranking")]
#[command(about = "Yu-Gi-Oh! event tracker with player rankings and tiers")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Register a player
    AddPlayer {
        #[arg(long)]
        name: String,

        #[arg(long)]
        image_url: Option<String>,
    },

    /// Register a tournament
    AddTournament {
        #[arg(long)]
        name: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// "veteran" or "beginner"
        #[arg(long, default_value = "veteran")]
        kind: String,
    },

    /// Record a player's result in a tournament
    RecordResult {
        /// Tournament ID
        #[arg(long)]
        tournament: String,

        /// Player ID
        #[arg(long)]
        player: String,

        /// Final placement (1-4); omit if the player did not reach the top 4
        #[arg(long)]
        placement: Option<i32>,

        /// Deck played
        #[arg(long)]
        deck: Option<String>,
    },

    /// Delete a recorded result
    RemoveResult {
        #[arg(long)]
        id: String,
    },

    /// Record a double-loss penalty
    AddPenalty {
        /// Player ID
        #[arg(long)]
        player: String,

        /// "regular" or "beginner"
        #[arg(long = "type", default_value = "regular")]
        penalty_type: String,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a penalty
    RemovePenalty {
        #[arg(long)]
        id: String,
    },

    /// Print the tiered ranking
    Ranking {
        /// "all", "veteran" or "beginner"
        #[arg(long)]
        scope: Option<String>,
    },

    /// Print the penalty ranking
    Penalties {
        #[arg(long)]
        scope: Option<String>,
    },

    /// Print deck usage
    Decks {
        #[arg(long)]
        scope: Option<String>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn resolve_scope(arg: Option<&str>, default: Scope) -> Result<Scope> {
    match arg {
        Some(s) => Ok(s.parse()?),
        None => Ok(default),
    }
}

fn print_ranking(snapshot: &Snapshot, scope: Scope) {
    let report = snapshot.ranking(scope);

    println!(
        "Ranking ({}) - average points {} | thresholds S {} A {} B {} C {}",
        scope,
        report.avg_points,
        report.thresholds.s,
        report.thresholds.a,
        report.thresholds.b,
        report.thresholds.c
    );
    for usage in report.slot_usage() {
        let names: Vec<&str> = report
            .in_tier(usage.tier)
            .iter()
            .map(|p| p.player.name.as_str())
            .collect();
        match usage.slots {
            Some(slots) => println!(
                "  Tier {}: {}/{} slots taken  {}",
                usage.tier,
                usage.occupied,
                slots,
                names.join(", ")
            ),
            None => println!("  Tier {}: {}  {}", usage.tier, usage.occupied, names.join(", ")),
        }
    }
    println!();
    println!(
        "{:>4}  {:<4} {:<24} {:>3} {:>3} {:>3} {:>3} {:>5} {:>7} {:>6}",
        "#", "Tier", "Player", "1st", "2nd", "3rd", "4th", "TOPs", "TOP %", "Points"
    );
    for entry in &report.tiered_players {
        let p = &entry.player;
        println!(
            "{:>4}  {:<4} {:<24} {:>3} {:>3} {:>3} {:>3} {:>5} {:>6.1}% {:>6}",
            entry.rank,
            entry.tier.map(|t: Tier| t.to_string()).unwrap_or_else(|| "-".into()),
            p.name,
            p.first_place,
            p.second_place,
            p.third_place,
            p.fourth_place,
            p.total_tops,
            p.top_percentage,
            p.points
        );
    }
}

fn print_penalties(snapshot: &Snapshot, scope: Scope) {
    let standings = snapshot.penalty_standings(scope);
    if standings.is_empty() {
        println!("No penalties recorded ({})", scope);
        return;
    }

    println!(
        "{:>4}  {:<24} {:>9} {:>11} {:>7}",
        "#", "Player", "Penalties", "Tournaments", "Rate"
    );
    for (i, s) in standings.iter().enumerate() {
        println!(
            "{:>4}  {:<24} {:>9} {:>11} {:>6.1}%",
            i + 1,
            s.name,
            s.total_penalties,
            s.total_tournaments,
            s.penalty_rate
        );
    }
}

fn print_decks(snapshot: &Snapshot, scope: Scope) {
    let decks = snapshot.deck_usage(scope);
    if decks.is_empty() {
        println!("No decks recorded ({})", scope);
        return;
    }

    println!(
        "{:<28} {:>5} {:>5} {:>5} {:>7}",
        "Deck", "Used", "TOPs", "Wins", "TOP %"
    );
    for d in &decks {
        println!(
            "{:<28} {:>5} {:>5} {:>5} {:>6.1}%",
            d.deck, d.appearances, d.tops, d.wins, d.top_rate
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting duel-ranking v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let default_scope = config.ranking.default_scope;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(storage, default_scope, config.server.cors_origin.clone());
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::AddPlayer { name, image_url } => {
            let mut player = Player::new(&name)?;
            if let Some(url) = image_url {
                player = player.with_image_url(url);
            }
            let player = save_player(&storage, player)?;
            println!("{}\t{}", player.id, player.name);
        }
        Commands::AddTournament { name, date, kind } => {
            let date = parse_date(&date)?;
            let kind: TournamentKind = kind.parse()?;
            let tournament = save_tournament(&storage, Tournament::new(name, date, kind))?;
            println!("{}\t{}\t{}", tournament.id, tournament.date, tournament.name);
        }
        Commands::RecordResult {
            tournament,
            player,
            placement,
            deck,
        } => {
            let mut record = PlacementRecord::new(EntityId::from(tournament), EntityId::from(player));
            if let Some(p) = placement {
                if !(1..=4).contains(&p) {
                    tracing::warn!("Placement {} is outside the top 4 and will not score", p);
                }
                record = record.with_placement(p);
            }
            if let Some(deck) = deck {
                record = record.with_deck(deck);
            }
            let record = record_result(&storage, record)?;
            println!("{}", record.id);
        }
        Commands::RemoveResult { id } => {
            if !remove_placement(&storage, &EntityId::from(id.clone()))? {
                anyhow::bail!("No result with id {}", id);
            }
        }
        Commands::AddPenalty {
            player,
            penalty_type,
            note,
        } => {
            let penalty_type: PenaltyType = penalty_type.parse()?;
            let mut penalty = PenaltyRecord::new(EntityId::from(player), penalty_type);
            if let Some(note) = note {
                penalty = penalty.with_note(note);
            }
            let penalty = save_penalty(&storage, penalty)?;
            println!("{}", penalty.id);
        }
        Commands::RemovePenalty { id } => {
            if !remove_penalty(&storage, &EntityId::from(id.clone()))? {
                anyhow::bail!("No penalty with id {}", id);
            }
        }
        Commands::Ranking { scope } => {
            let scope = resolve_scope(scope.as_deref(), default_scope)?;
            print_ranking(&Snapshot::load(&storage)?, scope);
        }
        Commands::Penalties { scope } => {
            let scope = resolve_scope(scope.as_deref(), default_scope)?;
            print_penalties(&Snapshot::load(&storage)?, scope);
        }
        Commands::Decks { scope } => {
            let scope = resolve_scope(scope.as_deref(), default_scope)?;
            print_decks(&Snapshot::load(&storage)?, scope);
        }
    }

    Ok(())
}
