use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use log::info;

use std::io::{stdin, stdout, Write};

use connect4_minimax::{game_state::*, search::*, HEIGHT, WIDTH};

// the human plays yellow, the agent red
const HUMAN: Token = Token::PlayerB;
const AGENT: Token = Token::PlayerA;

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let depth = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .map_err(|_| anyhow!("could not parse '{}' as a search depth", arg))?,
        None => DEFAULT_DEPTH,
    };

    let mut board = GameState::new();
    let mut agent = SearchAgent::new(AGENT)?.with_depth(depth)?;
    info!("starting game, agent searching {} plies", agent.depth());

    // game loop
    while board.outcome() == Outcome::InProgress {
        display(&board)?;

        let column = read_column(&board)?;
        board.drop_token(column, HUMAN)?;
        if board.outcome() != Outcome::InProgress {
            break;
        }

        println!("AI is thinking...");
        stdout().flush()?;
        let (score, column) = agent.evaluate(&mut board)?;
        if let Some(distance) = agent.score_to_win_distance(score) {
            info!("agent can force a win in {} plies", distance);
        }
        board.drop_token(column, AGENT)?;
    }

    display(&board)?;
    match board.outcome() {
        Outcome::Win(HUMAN) => println!("Yellow wins!"),
        Outcome::Win(_) => println!("Red wins!"),
        Outcome::Tie => println!("It's a tie!"),
        Outcome::InProgress => unreachable!("game loop exited with the game in progress"),
    }
    Ok(())
}

/// Prompts until the player names a column with room left, returns it 0-indexed
fn read_column(board: &GameState) -> Result<usize> {
    let stdin = stdin();
    loop {
        print!("Enter a column 1-{}: ", WIDTH);
        stdout().flush()?;

        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            return Err(anyhow!("input closed before the game ended"));
        }

        match input_str.trim().parse::<usize>() {
            Err(_) => println!("Invalid input. Please enter a number between 1 and {}.", WIDTH),
            Ok(column) if column < 1 || column > WIDTH => {
                println!("Please enter a number between 1 and {}.", WIDTH)
            }
            Ok(column) if board.is_column_full(column - 1) => {
                println!("Column {} is full, pick another one.", column)
            }
            Ok(column) => return Ok(column - 1),
        }
    }
}

/// Clears the terminal and draws the board with a numbered header
fn display(board: &GameState) -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;

    let header: String = (1..=WIDTH).map(|x| format!(" {} ", x)).collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let cell = match board.get(row, col) {
                Token::PlayerA => style(" O ").attribute(Attribute::Bold).with(Color::Red),
                Token::PlayerB => style(" O ").attribute(Attribute::Bold).with(Color::Yellow),
                Token::Empty => style(" . "),
            };
            stdout.queue(PrintStyledContent(cell))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
