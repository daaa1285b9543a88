use anyhow::Result;
use clap::{Parser, ValueEnum};

use std::io::{stdin, stdout};
use std::path::PathBuf;

use othello_ai::*;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Heuristic {
    Positional,
    DiscCount,
    EdgeParity,
}

/// Othello player speaking the referee protocol on stdin/stdout
#[derive(Parser)]
#[command(name = "othello", version)]
struct Cli {
    /// Side this player is on (Black or White)
    side: Side,

    /// Opening book file to use instead of the built-in book
    #[arg(long)]
    book: Option<PathBuf>,

    /// Play without an opening book
    #[arg(long, conflicts_with = "book")]
    no_book: bool,

    /// Search depth used when there is no time limit
    #[arg(long)]
    depth: Option<usize>,

    /// Board evaluation heuristic
    #[arg(long, value_enum, default_value_t = Heuristic::Positional)]
    heuristic: Heuristic,
}

fn main() -> Result<()> {
    // stdout belongs to the referee, logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let evaluator: Box<dyn Evaluator> = match cli.heuristic {
        Heuristic::Positional => Box::new(PositionalEvaluator),
        Heuristic::DiscCount => Box::new(DiscCountEvaluator),
        Heuristic::EdgeParity => Box::new(EdgeParityEvaluator),
    };

    let mut search_config = SearchConfig::default();
    if let Some(depth) = cli.depth {
        search_config = search_config.with_default_depth(depth);
    }
    let engine = SearchEngine::new(evaluator).with_config(search_config);

    let book = match &cli.book {
        Some(path) => OpeningBook::load(path)?,
        None => OpeningBook::builtin(),
    };
    let player_config = PlayerConfig::default().with_opening_book(!cli.no_book);
    let mut player = Player::with_engine(cli.side, engine)
        .with_opening_book(book)
        .with_config(player_config);

    let stdin = stdin();
    protocol::run(&mut player, stdin.lock(), stdout())
}
