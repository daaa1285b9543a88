use anyhow::{anyhow, bail, Context, Result};
use indicatif::*;
use log::info;
use once_cell::sync::Lazy;
use rayon::prelude::*;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::*;

use crate::{board::*, evaluator::PositionalEvaluator, search::SearchEngine, BOARD_SIZE};

pub const BOOK_PATH: &str = "opening_book.txt";

const BUILTIN_BOOK: &str = include_str!("../data/opening_book.txt");

static BUILTIN: Lazy<OpeningBook> = Lazy::new(|| {
    OpeningBook::parse(BUILTIN_BOOK).expect("built-in opening book is malformed")
});

/// Known replies for early positions, shared cheaply between players
#[derive(Clone, Default)]
pub struct OpeningBook(Arc<OpeningBookStorage>);

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The book compiled into the crate
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read opening book {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse opening book {}", path.display()))
    }

    /// Parses the text book format
    ///
    /// Each entry is 8 rows of 8 cells (`.` or a space for empty, `b`, `w`)
    /// followed by the reply as `x,y`. Blank lines between entries and lines
    /// starting with `#` are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut storage = OpeningBookStorage::default();
        let mut rows: Vec<&str> = Vec::with_capacity(BOARD_SIZE);

        for (idx, line) in text.lines().enumerate() {
            let line_number = idx + 1;
            let line = line.trim_end_matches('\r');

            if rows.len() < BOARD_SIZE {
                if rows.is_empty() && line.starts_with('#') {
                    continue;
                }
                // a row of eight spaces is an empty row, not a separator
                if line.chars().count() == BOARD_SIZE {
                    rows.push(line);
                    continue;
                }
                if rows.is_empty() && line.trim().is_empty() {
                    continue;
                }
                bail!(
                    "line {}: expected a row of {} cells, got '{}'",
                    line_number,
                    BOARD_SIZE,
                    line
                );
            }

            let board = Board::from_key(rows.concat())
                .with_context(|| format!("entry ending at line {}", line_number))?;
            let square = parse_square(line)
                .with_context(|| format!("line {}: invalid move '{}'", line_number, line))?;
            storage.entries.insert(board.key(), square);
            rows.clear();
        }

        if !rows.is_empty() {
            bail!("book ends in the middle of an entry");
        }
        Ok(Self(Arc::new(storage)))
    }

    /// Writes the book in the format read by [`OpeningBook::parse`]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (key, square) in self.entries.iter() {
            for row in key.as_bytes().chunks(BOARD_SIZE) {
                text.push_str(&String::from_utf8_lossy(row));
                text.push('\n');
            }
            text.push_str(&format!("{},{}\n\n", square.x(), square.y()));
        }
        text
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())
            .with_context(|| format!("failed to write opening book {}", path.display()))
    }

    /// Records a reply for the board exactly as oriented
    pub fn insert(&mut self, board: &Board, square: Square) {
        Arc::make_mut(&mut self.0)
            .entries
            .insert(board.key(), square);
    }

    /// Adds every entry of `other`, keeping ours where both have one
    pub fn merge(&mut self, other: &OpeningBook) {
        let storage = Arc::make_mut(&mut self.0);
        for (key, &square) in other.entries.iter() {
            storage.entries.entry(key.clone()).or_insert(square);
        }
    }

    /// Builds a book for every position up to `plies` moves into the game
    ///
    /// Positions that are rotations of one another are solved once. Each
    /// position is searched to `depth` with the positional heuristic, in
    /// parallel, with a progress bar on the terminal.
    pub fn generate(plies: usize, depth: usize) -> Result<Self> {
        let start = Instant::now();
        let positions = opening_positions(plies);
        if positions.is_empty() {
            return Err(anyhow!("no positions to solve within {} plies", plies));
        }
        println!(
            "Found {} unique positions within {} plies",
            positions.len(),
            plies
        );

        let progress = ProgressBar::new(positions.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Solving positions: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let solved: Vec<(Board, Option<Square>)> = positions
            .par_iter()
            .map(|&(board, side)| {
                let mut engine = SearchEngine::new(PositionalEvaluator);
                let result = engine.search_depth(&board, side, depth);
                progress.inc(1);
                (board, result.best_move.square())
            })
            .collect();
        progress.finish();

        let mut book = Self::new();
        for (board, square) in solved {
            if let Some(square) = square {
                book.insert(&board, square);
            }
        }

        println!(
            "Opening book generation completed in {}",
            HumanDuration(Instant::now() - start)
        );
        Ok(book)
    }
}

impl std::ops::Deref for OpeningBook {
    type Target = OpeningBookStorage;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone, Default)]
pub struct OpeningBookStorage {
    // sorted so saved books are stable
    entries: BTreeMap<String, Square>,
}

impl OpeningBookStorage {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored reply for this exact orientation of the board
    pub fn get(&self, board: &Board) -> Option<Square> {
        self.entries.get(&board.key()).copied()
    }

    /// Finds a legal book reply for `side`, trying all four rotations of the board
    ///
    /// A match on the board turned k quarter turns clockwise is turned back
    /// k quarter turns anticlockwise before use. A reply that is not legal on
    /// the real board is skipped.
    pub fn lookup(&self, board: &Board, side: Side) -> Option<Square> {
        let mut rotated = *board;
        for turns in 0..4 {
            if let Some(stored) = self.get(&rotated) {
                let square = (0..turns).fold(stored, |square, _| square.rotate_ccw());
                if board.is_legal(Move::Place(square), side) {
                    info!("Opening book hit after {} rotations: {}", turns, square);
                    return Some(square);
                }
            }
            rotated = rotated.rotate_cw();
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (Board, Square)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, &square)| Board::from_key(key).ok().map(|board| (board, square)))
    }
}

fn parse_square(line: &str) -> Result<Square> {
    let (x, y) = line
        .trim()
        .split_once(',')
        .ok_or_else(|| anyhow!("expected x,y"))?;
    let x = x.trim().parse::<i32>()?;
    let y = y.trim().parse::<i32>()?;
    Square::new(x, y).ok_or_else(|| anyhow!("({}, {}) is off the board", x, y))
}

/// The key shared by all four rotations of a board
fn rotation_class(board: &Board) -> String {
    let mut rotated = *board;
    let mut smallest = board.key();
    for _ in 0..3 {
        rotated = rotated.rotate_cw();
        smallest = smallest.min(rotated.key());
    }
    smallest
}

/// Every position reachable in fewer than `plies` moves, with the side to move
///
/// Black moves first. Positions where the side to move must pass are
/// skipped, there is nothing for the book to recommend.
fn opening_positions(plies: usize) -> Vec<(Board, Side)> {
    let mut seen = HashSet::new();
    let mut positions = Vec::new();
    let mut frontier = vec![(Board::new(), Side::Black)];

    for _ in 0..plies {
        let mut next_frontier = Vec::new();
        for (board, side) in frontier {
            let moves = board.legal_moves(side);
            if moves.is_empty() || !seen.insert(rotation_class(&board)) {
                continue;
            }
            positions.push((board, side));
            for square in moves {
                let mut next = board;
                next.apply(Move::Place(square), side);
                next_frontier.push((next, side.other()));
            }
        }
        frontier = next_frontier;
    }
    positions
}
