use std::{io::stdin, process::exit};

use log::{error, info};

use term_snake::config::Config;
use term_snake::error::Result;
use term_snake::game::{Outcome, SnakeGame};
use term_snake::input::{InputReader, Mailbox};
use term_snake::logging;
use term_snake::state::GameState;
use term_snake::term::Terminal;

fn main() {
    logging::init();

    match run() {
        Ok(outcome) => info!("Exiting after {:?}", outcome),
        Err(e) => {
            error!("{}", e);
            eprintln!("snake: {}", e);
            exit(1);
        }
    }
}

fn run() -> Result<Outcome> {
    let config = Config::default();
    let term = Terminal::enter(config.width, config.height)?;

    // SIGINT/SIGTERM share the restore with the normal exit path
    let guard = term.guard();
    ctrlc::set_handler(move || {
        let code = match guard.restore() {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("snake: could not restore the terminal: {}", e);
                1
            }
        };
        exit(code);
    })?;

    let mailbox = Mailbox::new();
    // Not joined: the reader sits in a blocking read until the process ends
    InputReader::new(stdin()).spawn(mailbox.clone())?;

    let mut game = SnakeGame::new(GameState::new(&config), term, mailbox);
    let ticks = crossbeam_channel::tick(config.tick);
    let outcome = game.play(&ticks)?;

    game.surface().restore()?;
    Ok(outcome)
}
