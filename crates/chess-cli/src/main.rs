//! Chess CLI - drives the rules engine from the command line.
//!
//! Counts perft nodes, lists legal moves and replays move sequences given in
//! `"e2e4"` notation.

use anyhow::{bail, Context};
use chess_engine::{perft, perft_divide, EngineConfig, GameState, GameStatus};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess rules engine")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Start position (defaults to the standard one)
        #[arg(long)]
        fen: Option<String>,
        /// Print the node count under each root move
        #[arg(long)]
        divide: bool,
    },
    /// List legal moves, optionally after replaying some moves
    Moves {
        #[arg(long)]
        fen: Option<String>,
        /// Moves to replay first, e.g. e2e4 e7e5
        moves: Vec<String>,
    },
    /// Replay moves and print the resulting position
    Play {
        #[arg(long)]
        fen: Option<String>,
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Perft { depth, fen, divide } => {
            let mut game = load_game(fen.as_deref(), config, &[])?;
            let start = Instant::now();
            let nodes = if divide {
                let results = perft_divide(&mut game, depth);
                for (mv, count) in &results {
                    println!("{}: {}", mv, count);
                }
                results.iter().map(|(_, count)| count).sum()
            } else {
                perft(&mut game, depth)
            };
            let elapsed = start.elapsed();
            println!();
            println!("Nodes: {}", nodes);
            tracing::info!(depth, nodes, ?elapsed, "perft finished");
        }
        Commands::Moves { fen, moves } => {
            let mut game = load_game(fen.as_deref(), config, &moves)?;
            let legal = game.valid_moves();
            let mut listed: Vec<String> = legal.iter().map(|m| m.notation()).collect();
            listed.sort();
            println!("{}", listed.join(" "));
            println!("{} legal moves, {}", legal.len(), status_line(&game));
        }
        Commands::Play { fen, moves } => {
            let mut game = load_game(fen.as_deref(), config, &moves)?;
            game.valid_moves();
            println!("{}", game.board());
            println!("{}", move_log_text(&game));
            println!("{}", status_line(&game));
        }
    }

    Ok(())
}

/// Builds a game from an optional FEN and replays `moves` on it.
fn load_game(fen: Option<&str>, config: EngineConfig, moves: &[String]) -> anyhow::Result<GameState> {
    let game = match fen {
        Some(fen) => GameState::from_fen(fen).with_context(|| format!("invalid FEN {:?}", fen))?,
        None => GameState::new(),
    };
    let mut game = game.with_config(config);

    for (i, mv) in moves.iter().enumerate() {
        if let Err(e) = game.play(mv) {
            bail!("move {} ({}): {}", i + 1, mv, e);
        }
    }
    Ok(game)
}

/// Numbered move list in log notation, e.g. `1. e4 e5 2. Nf3`.
fn move_log_text(game: &GameState) -> String {
    game.move_log()
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let moves: Vec<String> = pair.iter().map(|m| m.to_string()).collect();
            format!("{}. {}", i + 1, moves.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_line(game: &GameState) -> String {
    match game.status() {
        GameStatus::InProgress => format!("{} to move", game.side_to_move()),
        GameStatus::Checkmate { winner } => format!("checkmate, {} wins", winner),
        GameStatus::Stalemate => "stalemate".to_string(),
        GameStatus::Draw(reason) => format!("draw by {}", reason),
    }
}
