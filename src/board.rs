//! The Othello rules engine: discs, legal moves and captures

use anyhow::{anyhow, bail, Result};

use std::fmt;
use std::str::FromStr;

use crate::{BOARD_SIZE, NUM_CELLS};

/// The eight compass directions a capture run can follow
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// The character used for this side's discs in board keys and book files
    pub fn symbol(self) -> char {
        match self {
            Side::Black => 'b',
            Side::White => 'w',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "black" | "b" => Ok(Side::Black),
            "white" | "w" => Ok(Side::White),
            _ => Err(anyhow!("unknown side '{}', expected Black or White", s)),
        }
    }
}

/// A cell coordinate, guaranteed to lie on the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Square {
    x: usize,
    y: usize,
}

impl Square {
    /// Returns `None` if either coordinate is off the board
    pub fn new(x: i32, y: i32) -> Option<Self> {
        if Board::in_bounds(x, y) {
            Some(Self {
                x: x as usize,
                y: y as usize,
            })
        } else {
            None
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// The neighbouring square one step in the given direction, if it is on the board
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Self::new(self.x as i32 + dx, self.y as i32 + dy)
    }

    /// Rotates the square a quarter turn clockwise, matching [`Board::rotate_cw`]
    pub fn rotate_cw(self) -> Self {
        Self {
            x: BOARD_SIZE - 1 - self.y,
            y: self.x,
        }
    }

    /// Rotates the square a quarter turn anticlockwise, undoing [`Square::rotate_cw`]
    pub fn rotate_ccw(self) -> Self {
        Self {
            x: self.y,
            y: BOARD_SIZE - 1 - self.x,
        }
    }

    /// Iterates over every square, column by column
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Square { x, y }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move for an externally supplied side: either a disc placement or a pass
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    Pass,
    Place(Square),
}

impl Move {
    /// Builds a move from raw coordinates, anything off the board is a pass
    pub fn from_coords(x: i32, y: i32) -> Self {
        Square::new(x, y).map_or(Move::Pass, Move::Place)
    }

    /// Raw coordinates of the move, `(-1, -1)` for a pass
    pub fn to_coords(self) -> (i32, i32) {
        match self {
            Move::Pass => (-1, -1),
            Move::Place(square) => (square.x as i32, square.y as i32),
        }
    }

    pub fn square(self) -> Option<Square> {
        match self {
            Move::Pass => None,
            Move::Place(square) => Some(square),
        }
    }

    pub fn is_pass(self) -> bool {
        self == Move::Pass
    }

    pub fn rotate_cw(self) -> Self {
        match self {
            Move::Pass => Move::Pass,
            Move::Place(square) => Move::Place(square.rotate_cw()),
        }
    }

    pub fn rotate_ccw(self) -> Self {
        match self {
            Move::Pass => Move::Pass,
            Move::Place(square) => Move::Place(square.rotate_ccw()),
        }
    }
}

impl From<Square> for Move {
    fn from(square: Square) -> Self {
        Move::Place(square)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Place(square) => write!(f, "{}", square),
        }
    }
}

/// An 8x8 Othello position
///
/// `Board` is a plain value: copying it gives an independent snapshot, which
/// is what lets the search explore move sequences without touching the
/// position it started from.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    // cells are stored row by row, indexed [y][x]
    cells: [[Option<Side>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the standard starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        let low = BOARD_SIZE as i32 / 2 - 1;
        let high = low + 1;
        board.cells[low as usize][low as usize] = Some(Side::White);
        board.cells[high as usize][high as usize] = Some(Side::White);
        board.cells[high as usize][low as usize] = Some(Side::Black);
        board.cells[low as usize][high as usize] = Some(Side::Black);
        board
    }

    /// Creates a board with no discs on it
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Parses a 64 character key as produced by [`Board::key`]
    ///
    /// Empty cells may be written as `.` or a space.
    pub fn from_key<S: AsRef<str>>(key: S) -> Result<Self> {
        let key = key.as_ref();
        let count = key.chars().count();
        if count != NUM_CELLS {
            bail!("board key has {} cells, expected {}", count, NUM_CELLS);
        }

        let mut board = Self::empty();
        for (idx, symbol) in key.chars().enumerate() {
            board.cells[idx / BOARD_SIZE][idx % BOARD_SIZE] = match symbol {
                '.' | ' ' => None,
                'b' | 'B' => Some(Side::Black),
                'w' | 'W' => Some(Side::White),
                _ => return Err(anyhow!("could not parse '{}' as a cell", symbol)),
            };
        }
        Ok(board)
    }

    /// Encodes every cell row by row as `.`, `b` or `w`
    pub fn key(&self) -> String {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .map(|cell| cell.map_or('.', Side::symbol))
            .collect()
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        0 <= x && x < BOARD_SIZE as i32 && 0 <= y && y < BOARD_SIZE as i32
    }

    pub fn get(&self, square: Square) -> Option<Side> {
        self.cells[square.y][square.x]
    }

    pub fn set(&mut self, square: Square, cell: Option<Side>) {
        self.cells[square.y][square.x] = cell;
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Length of the run of opposing discs starting next to `from`
    ///
    /// Returns 0 unless the run is non-empty and closed off by one of the
    /// player's own discs before reaching an empty cell or the edge.
    fn capture_run(&self, from: Square, (dx, dy): (i32, i32), side: Side) -> usize {
        let opponent = side.other();
        let mut run = 0;
        let mut cursor = from.offset(dx, dy);

        while let Some(square) = cursor {
            match self.get(square) {
                Some(cell) if cell == opponent => run += 1,
                Some(_) => return run,
                None => return 0,
            }
            cursor = square.offset(dx, dy);
        }
        0
    }

    fn is_legal_square(&self, square: Square, side: Side) -> bool {
        !self.is_occupied(square)
            && DIRECTIONS
                .iter()
                .any(|&direction| self.capture_run(square, direction, side) > 0)
    }

    /// Checks a move for the given side
    ///
    /// Passing is only legal when the side has nothing else to play.
    pub fn is_legal(&self, mv: Move, side: Side) -> bool {
        match mv {
            Move::Pass => !self.has_any_move(side),
            Move::Place(square) => self.is_legal_square(square, side),
        }
    }

    pub fn has_any_move(&self, side: Side) -> bool {
        Square::all().any(|square| self.is_legal_square(square, side))
    }

    /// All legal placements for the side, column by column
    pub fn legal_moves(&self, side: Side) -> Vec<Square> {
        Square::all()
            .filter(|&square| self.is_legal_square(square, side))
            .collect()
    }

    /// The game is over once neither side can place a disc
    pub fn is_terminal(&self) -> bool {
        !(self.has_any_move(Side::Black) || self.has_any_move(Side::White))
    }

    /// Plays a move for the given side, flipping every captured run
    ///
    /// Passes and illegal moves leave the board untouched. Returns whether a
    /// disc was placed.
    pub fn apply(&mut self, mv: Move, side: Side) -> bool {
        let square = match mv {
            Move::Pass => return false,
            Move::Place(square) => square,
        };
        if self.is_occupied(square) {
            return false;
        }

        // measure every direction before flipping so the runs don't interact
        let runs = DIRECTIONS.map(|direction| self.capture_run(square, direction, side));
        if runs.iter().all(|&run| run == 0) {
            return false;
        }

        for (&(dx, dy), &run) in DIRECTIONS.iter().zip(runs.iter()) {
            let mut cursor = square;
            for _ in 0..run {
                // the run was measured on the board, so every step stays on it
                match cursor.offset(dx, dy) {
                    Some(next) => cursor = next,
                    None => break,
                }
                self.set(cursor, Some(side));
            }
        }
        self.set(square, Some(side));
        true
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == Some(side))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        NUM_CELLS - self.count(Side::Black) - self.count(Side::White)
    }

    /// The board turned a quarter turn clockwise
    pub fn rotate_cw(&self) -> Self {
        let mut rotated = Self::empty();
        for square in Square::all() {
            rotated.set(square.rotate_cw(), self.get(square));
        }
        rotated
    }

    /// The board turned a quarter turn anticlockwise
    pub fn rotate_ccw(&self) -> Self {
        let mut rotated = Self::empty();
        for square in Square::all() {
            rotated.set(square.rotate_ccw(), self.get(square));
        }
        rotated
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(|cell| cell.map_or('.', Side::symbol)).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board(\n{})", self)
    }
}
