use std::fmt;

use crate::state::GameState;

pub const SEGMENT_CHAR: char = 'O';
pub const FOOD_CHAR: char = '*';
pub const EMPTY_CHAR: char = '.';

/// One screenful of the board, `height` rows of `width` glyphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
}

impl Frame {
    pub fn from_state(state: &GameState) -> Self {
        let (width, height) = state.size();
        let mut grid = vec![vec![EMPTY_CHAR; width as usize]; height as usize];

        if let Some((x, y)) = state.food() {
            grid[y as usize][x as usize] = FOOD_CHAR;
        }
        // Segments win over food lying under the body
        for (x, y) in state.segments() {
            grid[*y as usize][*x as usize] = SEGMENT_CHAR;
        }

        let rows = grid.into_iter().map(|row| row.into_iter().collect()).collect();
        Frame { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Raw mode doesn't translate \n, so return the carriage explicitly
        for row in self.rows() {
            write!(f, "{}\r\n", row)?;
        }
        Ok(())
    }
}
