//! Terminal snake: a fixed board redrawn every tick, steered from the keyboard.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod snake;
pub mod state;
pub mod term;

pub type BoardInt = i16;
pub type Coords = (BoardInt, BoardInt);
