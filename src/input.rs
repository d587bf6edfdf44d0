//! Keyboard input: a reader thread decodes raw bytes into tokens and posts them
//! to a single-slot mailbox the game loop drains once per tick.

use std::io::{self, ErrorKind, Read};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::snake::Direction;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const MAX_CONSECUTIVE_ERRORS: u32 = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Byte(u8),
    /// `ESC` followed by two bytes, as sent for the arrow keys.
    Sequence([u8; 3]),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

impl Command {
    pub fn from_token(token: &Token) -> Option<Command> {
        use Direction::*;

        let cmd = match token {
            Token::Byte(b'w') | Token::Byte(b'k') | Token::Sequence([ESC, b'[', b'A']) => Command::Steer(Up),
            Token::Byte(b's') | Token::Byte(b'j') | Token::Sequence([ESC, b'[', b'B']) => Command::Steer(Down),
            Token::Byte(b'a') | Token::Byte(b'h') | Token::Sequence([ESC, b'[', b'D']) => Command::Steer(Left),
            Token::Byte(b'd') | Token::Byte(b'l') | Token::Sequence([ESC, b'[', b'C']) => Command::Steer(Right),
            // Raw mode delivers Ctrl+C as a byte instead of SIGINT
            Token::Byte(CTRL_C) => Command::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

/// Holds at most one pending token. Posting over a pending token replaces it,
/// so the reader never blocks and only the latest key before a tick counts.
#[derive(Clone)]
pub struct Mailbox {
    tx: Sender<Token>,
    rx: Receiver<Token>,
}

impl Mailbox {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Mailbox { tx, rx }
    }

    pub fn post(&self, mut token: Token) {
        loop {
            match self.tx.try_send(token) {
                Ok(()) => return,
                Err(TrySendError::Full(t)) => {
                    if let Ok(stale) = self.rx.try_recv() {
                        debug!("Dropped pending {:?}", stale);
                    }
                    token = t;
                }
                // Unreachable while self holds the receiver
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    pub fn take(&self) -> Option<Token> {
        self.rx.try_recv().ok()
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::new()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Token(Token),
    /// Nothing to deliver this time, keep reading.
    Skip,
    /// EOF or persistent failure, the reader is done.
    End,
}

pub struct InputReader<R> {
    reader: R,
    failures: u32,
}

impl<R: Read> InputReader<R> {
    pub fn new(reader: R) -> Self {
        InputReader { reader, failures: 0 }
    }

    pub fn read_token(&mut self) -> ReadOutcome {
        let mut byte = [0u8; 1];

        match self.reader.read(&mut byte) {
            Ok(0) => {
                info!("Input closed, the snake goes unsteered from here");
                return ReadOutcome::End;
            }
            Ok(_) => self.failures = 0,
            Err(e) if e.kind() == ErrorKind::Interrupted => return ReadOutcome::Skip,
            Err(e) => return self.fail(e),
        }

        if byte[0] != ESC {
            return ReadOutcome::Token(Token::Byte(byte[0]));
        }

        let mut suffix = [0u8; 2];
        match self.reader.read_exact(&mut suffix) {
            Ok(()) => ReadOutcome::Token(Token::Sequence([ESC, suffix[0], suffix[1]])),
            Err(e) => {
                debug!("Dropped escape sequence: {}", e);
                ReadOutcome::Skip
            }
        }
    }

    /// Reads until EOF or persistent failure, posting every token.
    pub fn run(mut self, mailbox: &Mailbox) {
        loop {
            match self.read_token() {
                ReadOutcome::Token(token) => mailbox.post(token),
                ReadOutcome::Skip => {}
                ReadOutcome::End => return,
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn fail(&mut self, e: io::Error) -> ReadOutcome {
        self.failures += 1;
        warn!("Failed to read input ({}/{}): {}", self.failures, MAX_CONSECUTIVE_ERRORS, e);

        if self.failures >= MAX_CONSECUTIVE_ERRORS {
            warn!("Giving up on input");
            ReadOutcome::End
        } else {
            ReadOutcome::Skip
        }
    }
}

impl<R: Read + Send + 'static> InputReader<R> {
    pub fn spawn(self, mailbox: Mailbox) -> Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("input".into())
            .spawn(move || self.run(&mailbox))
            .map_err(Error::SpawnInput)
    }
}
