//! The stateful game-playing agent

use log::{debug, info, warn};

use crate::{board::*, config::PlayerConfig, evaluator::*, opening_book::OpeningBook, search::*};

/// Plays one side of a game, keeping its own copy of the board
///
/// The opening book is consulted first; otherwise the move comes from a
/// search over an even share of the remaining clock.
pub struct Player<E: Evaluator = PositionalEvaluator> {
    board: Board,
    side: Side,
    engine: SearchEngine<E>,
    opening_book: Option<OpeningBook>,
    config: PlayerConfig,
    moves_left_estimate: u32,
}

impl Player<PositionalEvaluator> {
    /// Creates a player using the positional heuristic and the built-in opening book
    pub fn new(side: Side) -> Self {
        Self::with_engine(side, SearchEngine::new(PositionalEvaluator))
            .with_opening_book(OpeningBook::builtin())
    }
}

impl<E: Evaluator> Player<E> {
    /// Creates a player without an opening book
    pub fn with_engine(side: Side, engine: SearchEngine<E>) -> Self {
        let config = PlayerConfig::default();
        Self {
            board: Board::new(),
            side,
            engine,
            opening_book: None,
            moves_left_estimate: config.initial_moves_estimate,
            config,
        }
    }

    pub fn with_opening_book(mut self, opening_book: OpeningBook) -> Self {
        self.opening_book = Some(opening_book);
        self
    }

    pub fn with_config(mut self, config: PlayerConfig) -> Self {
        self.moves_left_estimate = config.initial_moves_estimate;
        self.config = config;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the tracked position, e.g. to start from a fixed test position
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn moves_left_estimate(&self) -> u32 {
        self.moves_left_estimate
    }

    pub fn engine(&self) -> &SearchEngine<E> {
        &self.engine
    }

    /// Computes and plays the next move given the opponent's last move
    ///
    /// An illegal opponent move is ignored and treated as a pass.
    /// `time_left` is what remains of this player's clock for the whole
    /// game. Returns [`Move::Pass`] if there is no legal move.
    pub fn do_move(&mut self, opponents_move: Move, time_left: TimeBudget) -> Move {
        let opponent = self.side.other();
        if !opponents_move.is_pass() && !self.board.apply(opponents_move, opponent) {
            warn!(
                "Ignoring illegal move {} by {}, treating it as a pass",
                opponents_move, opponent
            );
        }

        if !self.board.has_any_move(self.side) {
            debug!("{} has no legal move, passing", self.side);
            return Move::Pass;
        }

        let chosen = match self.book_move() {
            Some(square) => Move::Place(square),
            None => {
                let budget = time_left.per_move(self.moves_left_estimate);
                let result = self.engine.best_move(&self.board, self.side, budget);
                info!(
                    "{} plays {} (score {}, depth {}, {} nodes searched)",
                    self.side, result.best_move, result.score, result.depth, result.nodes
                );
                result.best_move
            }
        };

        self.board.apply(chosen, self.side);
        self.moves_left_estimate = self
            .moves_left_estimate
            .saturating_sub(1)
            .max(self.config.min_moves_estimate);
        chosen
    }

    fn book_move(&self) -> Option<Square> {
        if !self.config.use_opening_book {
            return None;
        }
        self.opening_book
            .as_ref()
            .and_then(|book| book.lookup(&self.board, self.side))
    }
}
