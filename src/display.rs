use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::{board::*, BOARD_SIZE};

/// Draws the board to stdout, marking the legal moves of `to_move` if given
pub fn display(board: &Board, to_move: Option<Side>) -> Result<()> {
    let mut stdout = stdout();
    let hints = to_move.map(|side| board.legal_moves(side)).unwrap_or_default();

    let header: String = (0..BOARD_SIZE).map(|x| format!(" {}", x)).collect();
    stdout.queue(PrintStyledContent(style(format!(" {}\n", header))))?;

    for y in 0..BOARD_SIZE {
        stdout.queue(PrintStyledContent(style(format!("{} ", y))))?;
        for x in 0..BOARD_SIZE {
            let square = match Square::new(x as i32, y as i32) {
                Some(square) => square,
                None => continue,
            };
            let cell = match board.get(square) {
                Some(Side::Black) => style("● ").with(Color::Black),
                Some(Side::White) => style("● ").with(Color::White),
                None if hints.contains(&square) => style("· ").with(Color::Yellow),
                None => style("  ").with(Color::DarkGreen),
            };
            stdout.queue(PrintStyledContent(
                cell.attribute(Attribute::Bold).on(Color::DarkGreen),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    stdout.queue(PrintStyledContent(style(format!(
        "Black: {}  White: {}\n",
        board.count(Side::Black),
        board.count(Side::White)
    ))))?;
    stdout.flush()?;
    Ok(())
}
