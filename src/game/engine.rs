use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::time::Duration;

/// Rejection-sampling draws per grid cell before falling back to a scan
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn halted() -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_apple: false,
                collision_type: None,
            },
        }
    }
}

/// The game engine that owns the rules
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let apple = self.find_free_cell(&snake);

        tracing::info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            "game reset"
        );

        let mut state = GameState::new(
            snake,
            apple.unwrap_or(Position::new(0, 0)),
            self.config.grid_width,
            self.config.grid_height,
            self.config.initial_step_interval,
        );

        // Only reachable with an unvalidated config that fills the board.
        if apple.is_none() {
            self.end_game(&mut state, CollisionType::BoardFull);
        }

        state
    }

    /// Feed one frame's elapsed time into the step timer.
    ///
    /// Runs a single grid step once the accumulated time exceeds the current
    /// step interval, then restarts the timer from zero.
    pub fn advance(&mut self, state: &mut GameState, delta: Duration) -> Option<StepResult> {
        if state.game_over {
            return None;
        }

        state.timer += delta.as_secs_f64();

        if state.timer > state.step_interval {
            let result = self.step(state, Action::Continue);
            state.timer = 0.0;
            Some(result)
        } else {
            None
        }
    }

    /// Request a turn. Accepted at most once per step and never as a reversal.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if state.game_over || !state.has_moved || !direction.is_moving() {
            return false;
        }

        if state.snake.direction.is_opposite(direction) {
            return false;
        }

        state.snake.direction = direction;
        state.has_moved = false;
        true
    }

    /// Execute one discrete grid step
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.game_over {
            return StepResult::halted();
        }

        if let Action::Move(direction) = action {
            self.steer(state, direction);
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.steps += 1;
            self.end_game(state, collision_type);

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_apple: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        state.snake.shift_to(new_head);

        let ate_apple = new_head == state.apple;
        if ate_apple {
            self.eat_apple(state);
        }

        state.has_moved = true;
        state.steps += 1;

        StepResult {
            terminated: state.game_over,
            info: StepInfo {
                ate_apple,
                collision_type: state.end_reason,
            },
        }
    }

    /// Grow by one segment, move the apple and speed up
    pub fn eat_apple(&mut self, state: &mut GameState) {
        state.snake.grow();
        state.score += 1;
        state.step_interval =
            (state.step_interval * self.config.speed_factor).max(self.config.min_step_interval);

        tracing::debug!(
            score = state.score,
            step_interval = state.step_interval,
            "apple eaten"
        );

        match self.find_free_cell(&state.snake) {
            Some(apple) => {
                tracing::trace!(x = apple.x, y = apple.y, "apple relocated");
                state.apple = apple;
            }
            None => self.end_game(state, CollisionType::BoardFull),
        }
    }

    /// Stop the snake and mark the game as over
    pub fn end_game(&self, state: &mut GameState, reason: CollisionType) {
        state.snake.direction = Direction::None;
        state.game_over = true;
        state.end_reason = Some(reason);

        tracing::info!(?reason, score = state.score, steps = state.steps, "game over");
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Compared against the chain before it shifts, so the tail cell counts too.
        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell off the snake, or `None` if the board is full
    fn find_free_cell(&mut self, snake: &Snake) -> Option<Position> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let attempts = width * height * PLACEMENT_ATTEMPTS_PER_CELL;

        for _ in 0..attempts {
            let pos = Position::new(
                self.rng.gen_range(0..width) as i32,
                self.rng.gen_range(0..height) as i32,
            );

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
