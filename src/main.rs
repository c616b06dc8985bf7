//! negamax_chess - Command line driver
//!
//! Usage:
//!     negamax_chess [--fen FEN] [--depth N] [--quiescence-depth N]
//!     negamax_chess --perft N
//!
//! Prints the position and the best move found for the side to move, or the
//! per-move perft split when `--perft` is given.

use anyhow::{Context, Result};
use clap::Parser;

use negamax_chess::perft::{divide, perft};
use negamax_chess::search::mate_distance;
use negamax_chess::{
    Board, PieceSquareEvaluator, SearchConfig, SearchEngine, Terminal, STARTING_FEN,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to analyse, in FEN
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Nominal search depth in plies
    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// Maximum quiescence plies below the nominal depth
    #[arg(long)]
    quiescence_depth: Option<u32>,

    /// Count leaf nodes to this depth instead of searching
    #[arg(long)]
    perft: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let mut board = Board::from_fen(&args.fen).context("could not load position")?;

    println!("{board}");
    println!("FEN: {}", board.to_fen());
    println!("{} to move", board.side_to_move());

    if let Some(depth) = args.perft {
        run_perft(&mut board, depth);
        return Ok(());
    }

    let mut config = SearchConfig::default();
    if let Some(quiescence_depth) = args.quiescence_depth {
        config.quiescence_max_ply = quiescence_depth;
    }

    let mut engine = SearchEngine::with_config(PieceSquareEvaluator, config);
    let result = engine.find_best_move(&mut board, args.depth);

    match (result.best_move, result.terminal) {
        (Some(mv), _) => println!("bestmove {mv}"),
        (None, Some(Terminal::Checkmate)) => println!("checkmate, {} loses", board.side_to_move()),
        (None, Some(Terminal::Stalemate)) => println!("stalemate"),
        (None, None) => println!("no move"),
    }

    match mate_distance(result.score) {
        Some(plies) if result.score > 0 => println!("score mate in {}", (plies + 1) / 2),
        Some(plies) => println!("score mated in {}", plies / 2),
        None => println!("score {} cp", result.score),
    }
    println!("nodes {}", result.nodes);

    if board.is_fifty_moves() {
        println!("note: fifty-move rule could be claimed");
    }
    if board.has_insufficient_material() {
        println!("note: insufficient mating material");
    }

    Ok(())
}

fn run_perft(board: &mut Board, depth: u32) {
    for (mv, nodes) in divide(board, depth) {
        println!("{mv}: {nodes}");
    }
    println!();
    println!("Nodes searched: {}", perft(board, depth));
}
