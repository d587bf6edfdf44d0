use std::time::Duration;

use crate::BoardInt;

pub const BOARD_WIDTH: BoardInt = 50;
pub const BOARD_HEIGHT: BoardInt = 10;
pub const TICK_INTERVAL_MS: u64 = 200;

/// Where food may appear after the snake eats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodPolicy {
    /// Any cell of the board, including cells under the snake's body.
    Anywhere,
    /// Only cells not occupied by the snake.
    ExcludeSnake,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub width: BoardInt,
    pub height: BoardInt,
    pub tick: Duration,
    /// Ignore a turn straight back into the segment behind the head.
    pub reversal_guard: bool,
    pub food_policy: FoodPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            tick: Duration::from_millis(TICK_INTERVAL_MS),
            reversal_guard: true,
            food_policy: FoodPolicy::Anywhere,
        }
    }
}
