use anyhow::Result;
use clap::Parser;

use std::io::{stdin, stdout, Stdin, Write};
use std::time::{Duration, Instant};

use othello_ai::{display::display, *};

/// Play Othello in the terminal against the AI, or watch it play itself
#[derive(Parser)]
#[command(name = "othello-play", version)]
struct Cli {
    /// Thinking time for each AI player over the whole game, in milliseconds
    #[arg(long, default_value_t = 60_000)]
    time_ms: u64,
}

fn ask_ai_controlled(stdin: &Stdin, side: Side) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("Is {} AI controlled? y/n: ", side);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn read_human_move(stdin: &Stdin, board: &Board, side: Side) -> Result<Square> {
    loop {
        print!("{} move input (x y) > ", side);
        stdout().flush()?;
        let mut input_str = String::new();
        stdin.read_line(&mut input_str)?;

        let coords: Vec<i32> = input_str
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();
        let square = match coords.as_slice() {
            &[x, y] => Square::new(x, y),
            _ => None,
        };

        match square {
            Some(square) if board.is_legal(Move::Place(square), side) => return Ok(square),
            Some(square) => println!("Invalid move, {} is not legal", square),
            None => println!("Invalid input: {}", input_str.trim()),
        }
    }
}

struct AiSeat {
    player: Player,
    time_left: Duration,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let stdin = stdin();

    println!("Welcome to Othello\n");

    let mut seats: Vec<Option<AiSeat>> = Vec::new();
    for side in [Side::Black, Side::White] {
        seats.push(if ask_ai_controlled(&stdin, side)? {
            Some(AiSeat {
                player: Player::new(side),
                time_left: Duration::from_millis(cli.time_ms),
            })
        } else {
            None
        });
    }
    let watching = seats.iter().all(Option::is_some);

    let mut board = Board::new();
    let mut side = Side::Black;
    let mut last_move = Move::Pass;

    // game loop
    while !board.is_terminal() {
        display(&board, Some(side))?;

        let seat = match side {
            Side::Black => &mut seats[0],
            Side::White => &mut seats[1],
        };

        let next_move = if !board.has_any_move(side) {
            println!("{} has no legal move and passes", side);
            // keep an AI's own board in step with the pass
            if let Some(seat) = seat {
                seat.player.do_move(last_move, TimeBudget::Limited(seat.time_left));
            }
            Move::Pass
        } else {
            match seat {
                // AI player
                Some(seat) => {
                    println!("AI is thinking...");
                    // slow down play if both players are AI
                    if watching {
                        std::thread::sleep(Duration::from_secs(1));
                    }
                    let start = Instant::now();
                    let chosen = seat
                        .player
                        .do_move(last_move, TimeBudget::Limited(seat.time_left));
                    seat.time_left = seat.time_left.saturating_sub(start.elapsed());
                    println!("Best move: {}", chosen);
                    chosen
                }
                // human player
                None => Move::Place(read_human_move(&stdin, &board, side)?),
            }
        };

        board.apply(next_move, side);
        last_move = next_move;
        side = side.other();
    }

    display(&board, None)?;
    let (black, white) = (board.count(Side::Black), board.count(Side::White));
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => println!("Black wins {} to {}!", black, white),
        std::cmp::Ordering::Less => println!("White wins {} to {}!", white, black),
        std::cmp::Ordering::Equal => println!("Draw!"),
    }
    Ok(())
}
