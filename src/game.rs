use std::time::Instant;

use crossbeam_channel::Receiver;
use log::{debug, info};

use crate::error::Result;
use crate::input::{Command, Mailbox};
use crate::state::{GameState, Step};
use crate::render::Frame;
use crate::term::Surface;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver { score: usize },
    Quit,
}

/// Runs the tick loop: take at most one pending key, advance, draw.
pub struct SnakeGame<S> {
    state: GameState,
    surface: S,
    mailbox: Mailbox,
}

impl<S: Surface> SnakeGame<S> {
    pub fn new(state: GameState, surface: S, mailbox: Mailbox) -> Self {
        SnakeGame { state, surface, mailbox }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Plays until the snake crashes or the player quits. One iteration per
    /// message on `ticks`; a closed timer counts as quitting.
    pub fn play(&mut self, ticks: &Receiver<Instant>) -> Result<Outcome> {
        self.surface.render(&Frame::from_state(&self.state))?;
        info!("Game started, snake at {:?}", self.state.head());

        loop {
            if ticks.recv().is_err() {
                return Ok(Outcome::Quit);
            }

            if let Some(token) = self.mailbox.take() {
                match Command::from_token(&token) {
                    Some(Command::Quit) => {
                        info!("Quit at score {}", self.state.score());
                        return Ok(Outcome::Quit);
                    }
                    Some(cmd) => self.state.apply_command(cmd),
                    None => debug!("Ignored {:?}", token),
                }
            }

            let step = self.state.advance();
            self.surface.render(&Frame::from_state(&self.state))?;

            if let Step::Over(_) = step {
                let score = self.state.score();
                self.surface.game_over(score)?;
                return Ok(Outcome::GameOver { score });
            }
        }
    }
}
