//! The line-based protocol spoken with an external referee
//!
//! After `Init done`, the referee sends one line per turn holding the
//! opponent's move and the time left as `x y msLeft`. A move of `-1 -1`
//! means the opponent passed and an msLeft of `-1` means there is no time
//! limit. The reply is `x y`, or `-1 -1` to pass. A line that cannot be
//! parsed is taken as a pass with the last clock reading the referee sent.

use anyhow::{anyhow, Result};
use log::warn;

use std::io::{BufRead, Write};

use crate::{board::Move, evaluator::Evaluator, player::Player, search::TimeBudget};

/// Handshake line written once the player is ready
pub const READY_MESSAGE: &str = "Init done";

/// A parsed referee turn
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Turn {
    pub opponents_move: Move,
    pub time_left: TimeBudget,
}

impl Turn {
    pub fn parse(line: &str) -> Result<Self> {
        let values = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| anyhow!("could not parse '{}' as an integer", token))
            })
            .collect::<Result<Vec<_>>>()?;

        let (x, y, ms_left) = match values.as_slice() {
            &[x, y, ms_left] => (x, y, ms_left),
            _ => return Err(anyhow!("expected 3 integers, got {}", values.len())),
        };

        let opponents_move = if x < 0 || y < 0 {
            Move::Pass
        } else {
            let mv = Move::from_coords(
                i32::try_from(x).unwrap_or(i32::MAX),
                i32::try_from(y).unwrap_or(i32::MAX),
            );
            if mv.is_pass() {
                warn!("Opponent move ({}, {}) is off the board, treating it as a pass", x, y);
            }
            mv
        };

        Ok(Self {
            opponents_move,
            time_left: TimeBudget::from_millis(ms_left),
        })
    }
}

/// Runs the referee loop until the input ends
pub fn run<E, R, W>(player: &mut Player<E>, input: R, mut output: W) -> Result<()>
where
    E: Evaluator,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", READY_MESSAGE)?;
    output.flush()?;

    let mut time_left = TimeBudget::Unlimited;
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let turn = match Turn::parse(&line) {
            Ok(turn) => turn,
            Err(err) => {
                warn!("Invalid turn on line {}: {}, treating it as a pass", idx + 1, err);
                Turn {
                    opponents_move: Move::Pass,
                    time_left,
                }
            }
        };
        time_left = turn.time_left;

        let (x, y) = player
            .do_move(turn.opponents_move, turn.time_left)
            .to_coords();
        writeln!(output, "{} {}", x, y)?;
        output.flush()?;
    }
    Ok(())
}
