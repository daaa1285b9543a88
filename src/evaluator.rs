//! Static evaluation strategies used at the leaves of the search
//!
//! Every strategy scores a board from one side's perspective: higher is
//! better for that side, and swapping the side negates the score.

use crate::{board::*, BOARD_SIZE};

/// Scores a board from the perspective of `side`
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32;

    /// Short name for logs and diagnostics
    fn name(&self) -> &str;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        (**self).evaluate(board, side)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Positional weights, symmetric under all rotations and reflections of the board
///
/// Corners are worth the most and edges a little. The X-squares diagonally
/// inside each corner carry a penalty, since holding one tends to hand the
/// corner to the opponent.
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, 10, 10, 10, 10, 10, 10, 100],
    [10, -25, 1, 1, 1, 1, -25, 10],
    [10, 1, 3, 2, 2, 3, 1, 10],
    [10, 1, 2, 1, 1, 2, 1, 10],
    [10, 1, 2, 1, 1, 2, 1, 10],
    [10, 1, 3, 2, 2, 3, 1, 10],
    [10, -25, 1, 1, 1, 1, -25, 10],
    [100, 10, 10, 10, 10, 10, 10, 100],
];

/// Weight of an X-square whose corner is held by the same side
pub const SAFE_X_SQUARE_WEIGHT: i32 = 0;

/// Each X-square paired with the corner it guards, as (x, y) coordinates
const X_SQUARES: [((usize, usize), (usize, usize)); 4] = [
    ((1, 1), (0, 0)),
    ((BOARD_SIZE - 2, 1), (BOARD_SIZE - 1, 0)),
    ((1, BOARD_SIZE - 2), (0, BOARD_SIZE - 1)),
    ((BOARD_SIZE - 2, BOARD_SIZE - 2), (BOARD_SIZE - 1, BOARD_SIZE - 1)),
];

/// Weighted sum of disc positions with the X-square penalty waived behind owned corners
#[derive(Copy, Clone, Debug, Default)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    /// The weight a disc at `square` is worth to its owner
    pub fn weight(board: &Board, square: Square, owner: Side) -> i32 {
        let (x, y) = (square.x(), square.y());
        let guarded_corner = X_SQUARES
            .iter()
            .find(|(x_square, _)| *x_square == (x, y))
            .and_then(|&(_, (corner_x, corner_y))| Square::new(corner_x as i32, corner_y as i32));

        match guarded_corner {
            Some(corner) if board.get(corner) == Some(owner) => SAFE_X_SQUARE_WEIGHT,
            _ => POSITION_WEIGHTS[y][x],
        }
    }
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        Square::all()
            .filter_map(|square| board.get(square).map(|owner| (square, owner)))
            .map(|(square, owner)| {
                let weight = Self::weight(board, square, owner);
                if owner == side {
                    weight
                } else {
                    -weight
                }
            })
            .sum()
    }

    fn name(&self) -> &str {
        "positional"
    }
}

/// Difference in disc counts
#[derive(Copy, Clone, Debug, Default)]
pub struct DiscCountEvaluator;

impl Evaluator for DiscCountEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        board.count(side) as i32 - board.count(side.other()) as i32
    }

    fn name(&self) -> &str {
        "disc-count"
    }
}

/// Disc parity plus a double-weighted edge term
///
/// Discs on the outer edge score a point for their owner (corners sit on two
/// edges and count twice), and discs on the ring just inside the edge cost
/// their owner a point.
#[derive(Copy, Clone, Debug, Default)]
pub struct EdgeParityEvaluator;

impl EdgeParityEvaluator {
    fn edge_score(board: &Board, side: Side) -> i32 {
        let last = BOARD_SIZE - 1;
        let mut score = 0;

        for square in Square::all() {
            let owner = match board.get(square) {
                Some(owner) => owner,
                None => continue,
            };
            let sign = if owner == side { 1 } else { -1 };
            let (x, y) = (square.x(), square.y());

            let edges = [x == 0, x == last, y == 0, y == last]
                .iter()
                .filter(|&&on_edge| on_edge)
                .count() as i32;
            if edges > 0 {
                score += sign * edges;
            } else if x == 1 || x == last - 1 || y == 1 || y == last - 1 {
                score -= sign;
            }
        }
        score
    }
}

impl Evaluator for EdgeParityEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        DiscCountEvaluator.evaluate(board, side) + 2 * Self::edge_score(board, side)
    }

    fn name(&self) -> &str {
        "edge-parity"
    }
}
