//! # Blokus Arena
//!
//! Terminal front end for the Blokus engine. Solo mode pits a human against
//! the computer opponent on a two-player board; hotseat mode is four humans
//! sharing the keyboard. All rules live in the library; this binary only
//! renders the board, parses commands and paces the computer's turns.
//!
//! ## Usage
//! Run with `cargo run --release`. Type `help` at the prompt for commands.

use blokus::bot::{self, Opponent};
use blokus::{
    storage, GameController, GameError, GameState, MoveResult, Phase, PlacementRequest,
    PlayerColor, BOARD_SIZE,
};
use clap::{Parser, ValueEnum};
use colored::{Color, Colorize};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Two players, the second seat driven by the computer
    Solo,
    /// Four human players sharing the keyboard
    Hotseat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BotKind {
    Greedy,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play Blokus in the terminal")]
struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Solo)]
    mode: Mode,

    /// Which opponent drives the computer seat in solo mode
    #[arg(long, value_enum, default_value_t = BotKind::Greedy)]
    bot: BotKind,

    /// Seed for the random opponent
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Pause before the computer moves, purely for pacing
    #[arg(long, default_value_t = 1000)]
    bot_delay_ms: u64,

    /// Persist the game here after every committed turn
    #[arg(long)]
    save: Option<PathBuf>,

    /// Resume from a previously saved game
    #[arg(long)]
    load: Option<PathBuf>,
}

fn terminal_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Red => Color::Red,
        PlayerColor::Green => Color::Green,
        PlayerColor::Yellow => Color::Yellow,
    }
}

fn render(state: &GameState) {
    print!("   ");
    for col in 0..BOARD_SIZE {
        print!("{:>2}", col % 10);
    }
    println!();
    for row in 0..BOARD_SIZE {
        print!("{:>2} ", row);
        for col in 0..BOARD_SIZE {
            match state.board.cell(row, col).owner {
                Some(owner) => {
                    let color = terminal_color(state.players[owner].color);
                    print!("{}", " ■".color(color));
                }
                None => print!(" ."),
            }
        }
        println!();
    }
    let scores: Vec<String> = state
        .players
        .iter()
        .map(|p| {
            format!("{}: {}", p.name, p.score)
                .color(terminal_color(p.color))
                .to_string()
        })
        .collect();
    println!("{}", scores.join("  "));
}

fn print_pieces(state: &GameState) {
    let player = state.current();
    println!("Remaining pieces for {}:", player.name);
    for instance in player.unused_pieces() {
        println!(
            "  {:>2}  {} ({})",
            instance.piece.id, instance.piece.name, instance.piece.size
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  place ID,ROT,FLIP,ROW,COL  e.g. place 7,90,0,3,4 (then confirm)");
    println!("  pass                       give up the turn");
    println!("  undo                       revert the last move or pass");
    println!("  pieces                     list your remaining pieces");
    println!("  hint                       show the greedy opponent's choice");
    println!("  board                      redraw the board");
    println!("  quit                       leave the game");
}

fn persist(path: Option<&Path>, state: &GameState) {
    if let Some(path) = path {
        if let Err(err) = storage::save_game(state, path) {
            eprintln!("{} {}", "warning:".yellow(), err);
        }
    }
}

fn announce(result: &MoveResult, state: &GameState) {
    match result {
        MoveResult::Placed { placed, player, .. } => {
            let mover = &state.players[*player];
            println!(
                "{} placed piece {} at ({}, {}) for {} points",
                mover.name.color(terminal_color(mover.color)),
                placed.piece_id,
                placed.origin.0,
                placed.origin.1,
                placed.score_gained
            );
        }
        MoveResult::Passed { player, .. } => {
            let passer = &state.players[*player];
            println!(
                "{} passes",
                passer.name.color(terminal_color(passer.color))
            );
        }
        MoveResult::Rejected { reason } => println!("{} {}", "rejected:".red(), reason),
        MoveResult::GameOver => println!("game is already over"),
    }
}

fn announce_game_over(state: &GameState) {
    println!("{}", "Game over!".bold());
    for player in &state.players {
        let line = format!("  {}: {}", player.name, player.score);
        if Some(player.id) == state.winner {
            println!("{} {}", line.color(terminal_color(player.color)), "(winner)".bold());
        } else {
            println!("{}", line);
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let player_count = match args.mode {
        Mode::Solo => 2,
        Mode::Hotseat => 4,
    };

    let mut controller = match &args.load {
        Some(path) => match storage::load_game(path) {
            Ok(state) => {
                println!("resumed game from {}", path.display());
                GameController::from_state(state)
            }
            Err(err) => {
                eprintln!("{} {} - starting fresh", "warning:".yellow(), err);
                new_controller(player_count)?
            }
        },
        None => new_controller(player_count)?,
    };

    let mut bot: Box<dyn Opponent> = match args.bot {
        BotKind::Greedy => Box::new(bot::Greedy),
        BotKind::Random => Box::new(bot::Random::new(args.seed)),
    };
    let bot_seat = match args.mode {
        Mode::Solo => Some(1),
        Mode::Hotseat => None,
    };

    println!("Blokus - type `help` for commands");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if controller.phase() == Phase::GameOver {
            announce_game_over(controller.state());
            print!("play again? [y/N] ");
            io::stdout().flush()?;
            let again = match lines.next() {
                Some(line) => line?.trim().eq_ignore_ascii_case("y"),
                None => false,
            };
            if !again {
                break;
            }
            controller.reset();
            persist(args.save.as_deref(), controller.state());
            continue;
        }

        let current = controller.state().current_player;
        if bot_seat == Some(current) {
            // input stays blocked until the computer's turn has run to
            // completion; the delay is pacing only
            thread::sleep(Duration::from_millis(args.bot_delay_ms));
            let result = controller.play_bot_turn(bot.as_mut());
            announce(&result, controller.state());
            persist(args.save.as_deref(), controller.state());
            continue;
        }

        render(controller.state());
        let player = controller.state().current();
        print!(
            "{} ({})> ",
            player.name.color(terminal_color(player.color)),
            player.color.label()
        );
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim();

        if let Some(rest) = input.strip_prefix("place") {
            let request = match rest.trim().parse::<PlacementRequest>() {
                Ok(request) => request,
                Err(err) => {
                    println!("{} {}", "rejected:".red(), err);
                    continue;
                }
            };
            if let Err(err) = controller.select_piece(request.piece_id, request.rotation, request.flipped)
            {
                println!("{} {}", "rejected:".red(), err);
                continue;
            }
            if let Err(err) = controller.request_placement((request.row, request.col)) {
                println!("{} {}", "rejected:".red(), err);
                continue;
            }
            print!(
                "place piece {} at ({}, {})? [Y/n] ",
                request.piece_id, request.row, request.col
            );
            io::stdout().flush()?;
            let confirmed = match lines.next() {
                Some(line) => !line?.trim().eq_ignore_ascii_case("n"),
                None => break,
            };
            if !confirmed {
                controller.cancel_placement();
                println!("cancelled");
                continue;
            }
            let result = controller.confirm_placement();
            announce(&result, controller.state());
            if matches!(result, MoveResult::Placed { .. }) {
                persist(args.save.as_deref(), controller.state());
            }
            continue;
        }

        match input {
            "pass" => {
                match controller.pass() {
                    Ok(result) => {
                        announce(&result, controller.state());
                        persist(args.save.as_deref(), controller.state());
                    }
                    Err(err) => println!("{} {}", "rejected:".red(), err),
                }
            }
            "undo" => match controller.undo() {
                Ok(()) => {
                    println!("undone");
                    persist(args.save.as_deref(), controller.state());
                }
                Err(err) => println!("{} {}", "rejected:".red(), err),
            },
            "pieces" => print_pieces(controller.state()),
            "hint" => match blokus::search::best_move(controller.state(), current) {
                Some(candidate) => println!(
                    "try piece {} rotated {}°{} at ({}, {})",
                    candidate.piece_id,
                    candidate.orientation.rotation,
                    if candidate.orientation.flipped {
                        ", flipped"
                    } else {
                        ""
                    },
                    candidate.origin.0,
                    candidate.origin.1
                ),
                None => println!("no legal moves - you can only pass"),
            },
            "board" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "" => {}
            other => println!("unknown command `{}` - type `help`", other),
        }
    }

    Ok(())
}

fn new_controller(player_count: usize) -> io::Result<GameController> {
    GameController::new(player_count)
        .map_err(|err: GameError| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))
}
