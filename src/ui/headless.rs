//! Line-oriented play over any reader/writer pair.
//!
//! Each input line is a column number, `r` to restart or `q` to quit. Once a
//! game has ended, the next column number starts a new game.

use std::io::{self, BufRead, Write};

use crate::game::Session;

pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> io::Result<()> {
    write!(output, "{}", session.board())?;
    writeln!(output, "{}", super::turn_message(session.current_player()))?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        match command {
            "" => continue,
            "q" | "quit" => break,
            "r" | "restart" => {
                restart(session, &mut output)?;
                continue;
            }
            _ => {}
        }

        let Ok(column) = command.parse::<usize>() else {
            writeln!(output, "'{command}' is not a column number")?;
            continue;
        };

        if session.is_terminal() {
            restart(session, &mut output)?;
            continue;
        }

        match session.play(column) {
            Ok(outcome) => {
                write!(output, "{}", session.board())?;
                writeln!(
                    output,
                    "{}",
                    super::outcome_message(&outcome, session.current_player())
                )?;
                if session.is_terminal() {
                    writeln!(output, "Enter any column to start a new game")?;
                }
            }
            Err(err) => writeln!(output, "{}", super::error_message(&err))?,
        }
    }

    output.flush()
}

fn restart<W: Write>(session: &mut Session, output: &mut W) -> io::Result<()> {
    match session.restart() {
        Ok(()) => {
            write!(output, "{}", session.board())?;
            writeln!(output, "{}", super::turn_message(session.current_player()))
        }
        Err(err) => writeln!(output, "{}", super::error_message(&err)),
    }
}
