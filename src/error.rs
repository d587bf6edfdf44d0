use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("terminal is {cols}x{rows}, the board needs at least {min_cols}x{min_rows}")]
    TerminalTooSmall { cols: u16, rows: u16, min_cols: u16, min_rows: u16 },

    #[error("could not install the signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("could not start the input reader: {0}")]
    SpawnInput(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
