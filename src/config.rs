//! Tunable settings for the search and the player's time allocation

use crate::NUM_CELLS;

/// Score given to a position where the side to move has no legal move
pub const DEFAULT_PASS_PENALTY: i32 = -200;

/// How the search scores a node where the side to move has to pass
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PassPolicy {
    /// Stop and return this fixed score instead of searching the opponent's reply
    Penalty(i32),
    /// Hand the move to the opponent and keep searching, scoring finished games by disc difference
    Recurse,
}

impl Default for PassPolicy {
    fn default() -> Self {
        PassPolicy::Penalty(DEFAULT_PASS_PENALTY)
    }
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Depth searched when there is no time limit
    pub default_depth: usize,
    /// Deepest iteration iterative deepening will start
    pub max_depth: usize,
    /// Next iteration is assumed to cost this many times the previous one
    pub projection_factor: u32,
    pub pass_policy: PassPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_depth: 5,
            max_depth: NUM_CELLS - 4,
            projection_factor: 4,
            pass_policy: PassPolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth.max(1);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    pub fn with_projection_factor(mut self, factor: u32) -> Self {
        self.projection_factor = factor;
        self
    }

    pub fn with_pass_policy(mut self, pass_policy: PassPolicy) -> Self {
        self.pass_policy = pass_policy;
        self
    }
}

#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Guess at how many of our own moves remain when the game starts
    pub initial_moves_estimate: u32,
    /// The moves-left guess never drops below this
    pub min_moves_estimate: u32,
    pub use_opening_book: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_moves_estimate: 30,
            min_moves_estimate: 1,
            use_opening_book: true,
        }
    }
}

impl PlayerConfig {
    pub fn with_moves_estimate(mut self, initial: u32, min: u32) -> Self {
        self.min_moves_estimate = min.max(1);
        self.initial_moves_estimate = initial.max(self.min_moves_estimate);
        self
    }

    pub fn with_opening_book(mut self, use_opening_book: bool) -> Self {
        self.use_opening_book = use_opening_book;
        self
    }
}
