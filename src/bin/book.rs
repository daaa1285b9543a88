use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

use othello_ai::{opening_book::BOOK_PATH, OpeningBook};

/// Generate an Othello opening book offline
#[derive(Parser)]
#[command(name = "othello-book", version)]
struct Cli {
    /// Record replies for positions up to this many moves into the game
    #[arg(long, default_value_t = 4)]
    plies: usize,

    /// Search depth used to pick each reply
    #[arg(long, default_value_t = 8)]
    depth: usize,

    /// Existing book to extend, its entries win over generated ones
    #[arg(long)]
    merge: Option<PathBuf>,

    /// Start from the built-in book
    #[arg(long)]
    builtin: bool,

    /// Where to write the book
    #[arg(long, default_value = BOOK_PATH)]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut book = OpeningBook::new();
    if cli.builtin {
        book.merge(&OpeningBook::builtin());
    }
    if let Some(path) = &cli.merge {
        book.merge(&OpeningBook::load(path)?);
    }

    let existing = book.len();
    book.merge(&OpeningBook::generate(cli.plies, cli.depth)?);

    print!(
        "Writing {} entries ({} new) to {} ... ",
        book.len(),
        book.len() - existing,
        cli.out.display()
    );
    book.save(&cli.out)?;
    println!("Complete");
    Ok(())
}
