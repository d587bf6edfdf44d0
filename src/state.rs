use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::{Config, FoodPolicy};
use crate::input::Command;
use crate::snake::{Collision, Direction, MoveResult, Snake};
use crate::{BoardInt, Coords};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    Wall,
    SelfCollision,
}

/// What a single `advance` did. Exactly one of these per tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Grew,
    Moved,
    Over(EndReason),
}

pub struct GameState {
    width: BoardInt,
    height: BoardInt,
    snake: Snake,
    food: Option<Coords>,
    end: Option<EndReason>,
    reversal_guard: bool,
    food_policy: FoodPolicy,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        GameState::with_rng(config, StdRng::from_entropy())
    }

    /// One segment at the board center heading down, food on a random cell.
    pub fn with_rng(config: &Config, rng: StdRng) -> Self {
        let center = (config.width / 2, config.height / 2);
        let mut state = GameState {
            width: config.width,
            height: config.height,
            snake: Snake::new(center, Direction::Down),
            food: None,
            end: None,
            reversal_guard: config.reversal_guard,
            food_policy: config.food_policy,
            rng,
        };
        state.food = state.roll_food();
        state
    }

    pub fn is_over(&self) -> bool {
        self.end.is_some()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coords> + '_ {
        self.snake.body()
    }

    pub fn head(&self) -> Coords {
        self.snake.head()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    pub fn size(&self) -> (BoardInt, BoardInt) {
        (self.width, self.height)
    }

    /// Returns whether the direction changed. Frozen once the game is over.
    pub fn apply_direction(&mut self, dir: Direction) -> bool {
        if self.is_over() {
            return false;
        }
        let taken = self.snake.set_direction(dir, self.reversal_guard);
        if !taken {
            debug!("Ignored reversal to {:?}", dir);
        }
        taken
    }

    /// Applies a steering command; anything else is left to the caller.
    pub fn apply_command(&mut self, cmd: Command) {
        if let Command::Steer(dir) = cmd {
            self.apply_direction(dir);
        }
    }

    pub fn advance(&mut self) -> Step {
        if let Some(reason) = self.end {
            return Step::Over(reason);
        }

        match self.snake.move_step(self.width, self.height, self.food) {
            MoveResult::Crashed(collision) => {
                let reason = match collision {
                    Collision::Wall => EndReason::Wall,
                    Collision::Body => EndReason::SelfCollision,
                };
                info!("Game over at {:?}: {:?}, score {}", self.snake.head(), reason, self.score());
                self.end = Some(reason);
                Step::Over(reason)
            }
            MoveResult::Grew { new_head } => {
                self.food = self.roll_food();
                debug!("Ate at {:?}, length {}, food now {:?}", new_head, self.snake.len(), self.food);
                Step::Grew
            }
            MoveResult::Moved { .. } => Step::Moved,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn roll_food(&mut self) -> Option<Coords> {
        match self.food_policy {
            FoodPolicy::Anywhere => {
                Some((self.rng.gen_range(0..self.width), self.rng.gen_range(0..self.height)))
            }
            FoodPolicy::ExcludeSnake => {
                let width = self.width;
                let free: Vec<Coords> = (0..self.height)
                    .flat_map(|y| (0..width).map(move |x| (x, y)))
                    .filter(|pos| !self.snake.contains(pos))
                    .collect();
                free.choose(&mut self.rng).copied()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::Token;
    use Direction::*;

    pub(crate) fn config(width: BoardInt, height: BoardInt) -> Config {
        Config { width, height, ..Config::default() }
    }

    /// A state with an explicit body, direction and food.
    pub(crate) fn state_with(config: &Config, body: Vec<Coords>, dir: Direction, food: Coords) -> GameState {
        let mut state = GameState::with_rng(config, StdRng::seed_from_u64(7));
        state.snake = Snake::from_body(body, dir);
        state.food = Some(food);
        state
    }

    fn segments(state: &GameState) -> Vec<Coords> {
        state.segments().copied().collect()
    }

    fn has_duplicates(state: &GameState) -> bool {
        let segs = segments(state);
        segs.iter().enumerate().any(|(i, a)| segs[i + 1..].contains(a))
    }

    #[test]
    fn starts_at_center_heading_down() {
        let cfg = Config::default();
        let state = GameState::new(&cfg);
        assert_eq!(segments(&state), vec![(cfg.width / 2, cfg.height / 2)]);
        assert_eq!(state.direction(), Down);
        assert!(!state.is_over());
        let (fx, fy) = state.food().unwrap();
        assert!(fx >= 0 && fx < cfg.width && fy >= 0 && fy < cfg.height);
    }

    #[test]
    fn eating_grows_and_rerolls_food() {
        let cfg = config(25, 10);
        for seed in 0..50 {
            let mut state = state_with(&cfg, vec![(5, 5)], Down, (5, 6));
            state.rng = StdRng::seed_from_u64(seed);
            assert_eq!(state.advance(), Step::Grew);
            assert_eq!(segments(&state), vec![(5, 6), (5, 5)]);
            assert_eq!(state.score(), 1);
            let (fx, fy) = state.food().unwrap();
            assert!(fx >= 0 && fx < 25 && fy >= 0 && fy < 10);
        }
    }

    #[test]
    fn boundary_moves_end_the_game() {
        let cfg = config(25, 10);
        let cases = [((0, 0), Up), ((0, 4), Left), ((24, 4), Right), ((3, 9), Down)];

        for (pos, dir) in cases.iter() {
            let mut state = state_with(&cfg, vec![*pos], *dir, (12, 5));
            assert_eq!(state.advance(), Step::Over(EndReason::Wall));
            assert!(state.is_over());
            assert_eq!(segments(&state), vec![*pos]);
        }
    }

    #[test]
    fn ignored_reversal_keeps_moving_forward() {
        let cfg = config(25, 10);
        let mut state = state_with(&cfg, vec![(5, 5), (5, 4)], Down, (0, 0));
        state.apply_command(Command::from_token(&Token::Byte(b'w')).unwrap());
        assert_eq!(state.direction(), Down);
        assert_eq!(state.advance(), Step::Moved);
        assert_eq!(segments(&state), vec![(5, 6), (5, 5)]);
    }

    #[test]
    fn unguarded_reversal_is_a_collision() {
        let cfg = Config { reversal_guard: false, ..config(25, 10) };
        let mut state = state_with(&cfg, vec![(5, 5), (5, 4)], Down, (0, 0));
        assert!(state.apply_direction(Up));
        assert_eq!(state.advance(), Step::Over(EndReason::SelfCollision));
    }

    #[test]
    fn frozen_after_game_over() {
        let cfg = config(25, 10);
        let mut state = state_with(&cfg, vec![(0, 0)], Left, (3, 3));
        assert_eq!(state.advance(), Step::Over(EndReason::Wall));

        assert!(!state.apply_direction(Down));
        assert_eq!(state.advance(), Step::Over(EndReason::Wall));
        assert_eq!(segments(&state), vec![(0, 0)]);
        assert_eq!(state.direction(), Left);
        assert_eq!(state.food(), Some((3, 3)));
    }

    #[test]
    fn every_tick_has_exactly_one_effect() {
        let cfg = config(12, 8);
        let mut state = GameState::with_rng(&cfg, StdRng::seed_from_u64(42));
        let mut turns = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            if state.is_over() {
                break;
            }
            let dir = *Direction::ALL.choose(&mut turns).unwrap();
            state.apply_direction(dir);

            let before = state.snake.len();
            let step = state.advance();
            let after = state.snake.len();
            match step {
                Step::Grew => assert_eq!(after, before + 1),
                Step::Moved => assert_eq!(after, before),
                Step::Over(_) => {
                    assert_eq!(after, before);
                    assert!(state.is_over());
                }
            }
            if !state.is_over() {
                assert!(!has_duplicates(&state));
            }
        }
    }

    #[test]
    fn guarded_direction_never_reverses() {
        let cfg = config(25, 10);
        for from in Direction::ALL.iter() {
            for byte in 0..=u8::MAX {
                let mut state = state_with(&cfg, vec![(12, 5)], *from, (0, 0));
                if let Some(cmd) = Command::from_token(&Token::Byte(byte)) {
                    state.apply_command(cmd);
                }
                assert_ne!(state.direction(), from.opposite());
            }
        }
    }

    #[test]
    fn exclusive_food_avoids_the_body() {
        let cfg = Config { food_policy: FoodPolicy::ExcludeSnake, ..config(3, 1) };
        for seed in 0..20 {
            let mut state = state_with(&cfg, vec![(0, 0)], Right, (1, 0));
            state.rng = StdRng::seed_from_u64(seed);
            assert_eq!(state.advance(), Step::Grew);
            assert_eq!(state.food(), Some((2, 0)));
        }
    }

    #[test]
    fn exclusive_food_disappears_on_a_full_board() {
        let cfg = Config { food_policy: FoodPolicy::ExcludeSnake, ..config(2, 1) };
        let mut state = state_with(&cfg, vec![(0, 0)], Right, (1, 0));
        assert_eq!(state.advance(), Step::Grew);
        assert_eq!(state.food(), None);
        assert_eq!(state.advance(), Step::Over(EndReason::Wall));
    }
}
