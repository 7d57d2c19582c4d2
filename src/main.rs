use anyhow::Result;
use indicatif::ProgressBar;

use std::io::{stdin, stdout, Write};

use connect4_minimax::{
    board::{Board, GameState, Player},
    engine::Engine,
};

fn main() -> Result<()> {
    env_logger::init();

    let mut board = Board::new();
    // one engine for the whole game, every decision builds its own tree
    let engine = Engine::new();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // choose who moves first
    let mut next_turn = Player::Opponent;
    loop {
        let mut buffer = String::new();
        print!("Do you want to move first? y/n: ");
        stdout().flush()?;
        // stop on end of input
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(());
        }
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => break,
            Some(_letter @ 'n') => {
                next_turn = Player::Engine;
                break;
            }
            _ => println!("Unknown answer given"),
        }
    }

    // game loop
    let mut message = String::new();
    loop {
        Board::clear_screen()?;
        board.display()?;
        if !message.is_empty() {
            println!("{}", message);
            message.clear();
        }

        match board.state() {
            GameState::Playing => {
                let next_move = match next_turn {
                    Player::Engine => {
                        let spinner = ProgressBar::new_spinner();
                        spinner.set_message("AI is thinking...");
                        spinner.enable_steady_tick(100);

                        let column = engine.choose_move(&board)?;
                        spinner.finish_and_clear();

                        message = format!(
                            "AI played column {} ({} positions searched)",
                            column,
                            engine.node_count()
                        );
                        column
                    }
                    Player::Opponent => {
                        print!("Enter the column to drop a disc in > ");
                        stdout().flush()?;
                        let mut input_str = String::new();
                        if stdin.read_line(&mut input_str)? == 0 {
                            return Ok(());
                        }

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                message = format!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                            Ok(column) => column,
                        }
                    }
                };

                if let Err(err) = board.play_checked(next_move, next_turn) {
                    message = err.to_string();
                    // try the move again
                    continue;
                }
                next_turn = next_turn.opponent();
            }

            // end states
            GameState::OpponentWin => {
                println!("You won!");
                break;
            }
            GameState::EngineWin => {
                println!("The AI won!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
