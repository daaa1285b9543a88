//! Time-bounded game tree search

use log::debug;

use std::time::{Duration, Instant};

use crate::{board::*, config::*, evaluator::*};

/// Bound on any score the search can produce
pub const SCORE_INFINITY: i32 = 1_000_000;

/// Weight of each disc of difference in a finished game under [`PassPolicy::Recurse`]
pub const FINISHED_GAME_DISC_WEIGHT: i32 = 10_000;

/// How much wall-clock time a search may use
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeBudget {
    Unlimited,
    Limited(Duration),
}

impl TimeBudget {
    /// Converts a millisecond count, where any negative value means no limit
    pub fn from_millis(ms: i64) -> Self {
        if ms < 0 {
            TimeBudget::Unlimited
        } else {
            TimeBudget::Limited(Duration::from_millis(ms as u64))
        }
    }

    /// Splits the budget evenly over the given number of moves
    pub fn per_move(self, moves: u32) -> Self {
        match self {
            TimeBudget::Unlimited => TimeBudget::Unlimited,
            TimeBudget::Limited(total) => TimeBudget::Limited(total / moves.max(1)),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score of the best move from the mover's perspective
    pub score: i32,
    /// Depth of the deepest completed iteration, 0 for a forced pass
    pub depth: usize,
    /// Nodes visited to produce this result, across every iteration
    pub nodes: usize,
}

impl SearchResult {
    fn pass() -> Self {
        Self {
            best_move: Move::Pass,
            score: 0,
            depth: 0,
            nodes: 0,
        }
    }
}

/// Negamax search with alpha-beta pruning over a pluggable evaluator
///
/// # Notes
/// Moves are tried column by column and a later move only replaces the
/// current best when it scores strictly higher, so among equal moves the
/// first one found is kept.
#[derive(Clone)]
pub struct SearchEngine<E: Evaluator = PositionalEvaluator> {
    evaluator: E,
    config: SearchConfig,

    /// The number of nodes searched by this `SearchEngine` so far (for diagnostics only)
    pub node_count: usize,
}

impl<E: Evaluator> SearchEngine<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            config: SearchConfig::default(),
            node_count: 0,
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Scores a node where `side` has no legal move
    fn pass_score(
        &mut self,
        board: &Board,
        side: Side,
        depth: usize,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        match self.config.pass_policy {
            PassPolicy::Penalty(score) => score,
            PassPolicy::Recurse => {
                if board.has_any_move(side.other()) {
                    -self.negamax(board, side.other(), depth - 1, -beta, -alpha)
                } else {
                    let difference = board.count(side) as i32 - board.count(side.other()) as i32;
                    difference * FINISHED_GAME_DISC_WEIGHT
                }
            }
        }
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position for `side`, exact whenever it lies
    /// strictly inside the `(alpha, beta)` window
    fn negamax(
        &mut self,
        board: &Board,
        side: Side,
        depth: usize,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.node_count += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board, side);
        }

        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return self.pass_score(board, side, depth, alpha, beta);
        }

        let mut best_score = -SCORE_INFINITY;
        for square in moves {
            let mut next = *board;
            next.apply(Move::Place(square), side);

            // the search window is flipped for the other player
            let score = -self.negamax(&next, side.other(), depth - 1, -beta, -alpha);
            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            // the opponent will never allow this line, stop looking
            if alpha >= beta {
                break;
            }
        }
        best_score
    }

    /// Performs a top-level search, keeping track of the best move
    fn top_level_search(&mut self, board: &Board, side: Side, depth: usize) -> (i32, Move) {
        self.node_count += 1;

        let mut alpha = -SCORE_INFINITY;
        let beta = SCORE_INFINITY;
        let mut best_score = -SCORE_INFINITY;
        let mut best_move = Move::Pass;

        for square in board.legal_moves(side) {
            let mut next = *board;
            next.apply(Move::Place(square), side);

            let score = -self.negamax(&next, side.other(), depth - 1, -beta, -alpha);
            if score > best_score {
                best_score = score;
                best_move = Move::Place(square);
            }
            if score > alpha {
                alpha = score;
            }
        }
        (best_score, best_move)
    }

    /// Searches the position to a fixed depth
    ///
    /// Returns a pass if `side` has no legal move.
    pub fn search_depth(&mut self, board: &Board, side: Side, depth: usize) -> SearchResult {
        if !board.has_any_move(side) {
            return SearchResult::pass();
        }
        let depth = depth.max(1);
        let nodes_before = self.node_count;
        let (score, best_move) = self.top_level_search(board, side, depth);
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.node_count - nodes_before,
        }
    }

    /// Chooses a move within the given time slice
    ///
    /// Without a time limit this searches to the configured default depth.
    /// Otherwise it deepens one ply at a time and stops before an iteration
    /// that is projected to overrun the slice. Iterations are never
    /// interrupted, so the deepest one may run over; at least depth 1 always
    /// completes.
    pub fn best_move(&mut self, board: &Board, side: Side, budget: TimeBudget) -> SearchResult {
        if !board.has_any_move(side) {
            return SearchResult::pass();
        }

        let slice = match budget {
            TimeBudget::Unlimited => {
                let depth = self.config.default_depth;
                return self.search_depth(board, side, depth);
            }
            TimeBudget::Limited(slice) => slice,
        };

        // searching past the last empty cell finds nothing new
        let max_depth = self.config.max_depth.min(board.empty_count()).max(1);

        let start = Instant::now();
        let nodes_before = self.node_count;
        let mut result = self.search_depth(board, side, 1);
        let mut last_cost = start.elapsed();

        for depth in 2..=max_depth {
            let projected = start.elapsed() + last_cost * self.config.projection_factor;
            if projected >= slice {
                debug!(
                    "Stopping before depth {}: projected {:?} exceeds slice {:?}",
                    depth, projected, slice
                );
                break;
            }

            let iteration_start = Instant::now();
            result = self.search_depth(board, side, depth);
            last_cost = iteration_start.elapsed();

            debug!(
                "Search depth: {}/{}, score: {}, best move: {}, nodes: {}, took {:?}",
                depth, max_depth, result.score, result.best_move, result.nodes, last_cost
            );
        }
        result.nodes = self.node_count - nodes_before;
        result
    }
}
