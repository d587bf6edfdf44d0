use std::collections::VecDeque;

use crate::{BoardInt, Coords};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (BoardInt, BoardInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Grew { new_head: Coords },
    Moved { new_head: Coords, old_tail: Coords },
    Crashed(Collision),
}

/// The segment sequence, head first, plus the direction it travels in.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new(pos: Coords, direction: Direction) -> Self {
        Snake::from_body(vec![pos], direction)
    }

    /// Builds a snake from head-first segments. Panics on an empty body.
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body: body.into(), direction }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns whether the direction was taken. With `guard` set, a turn to
    /// the exact opposite of the current direction is ignored.
    pub fn set_direction(&mut self, new_direction: Direction, guard: bool) -> bool {
        if guard && new_direction == self.direction.opposite() {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Steps the head one cell on a `width` x `height` board. The tail stays
    /// put when the new head lands on `food`. A crash leaves the body untouched.
    pub fn move_step(&mut self, width: BoardInt, height: BoardInt, food: Option<Coords>) -> MoveResult {
        let (x, y) = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (x + dx, y + dy);

        if new_head.0 < 0 || new_head.1 < 0 || new_head.0 >= width || new_head.1 >= height {
            return Crashed(Collision::Wall);
        }
        if self.contains(&new_head) {
            return Crashed(Collision::Body);
        }

        self.body.push_front(new_head);

        if food == Some(new_head) {
            Grew { new_head }
        } else {
            // Non-empty: we just pushed the head
            let old_tail = self.body.pop_back().unwrap_or(new_head);
            Moved { new_head, old_tail }
        }
    }
}
