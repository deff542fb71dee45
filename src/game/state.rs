use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake: an ordered chain of cells, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments, with head at index 0. Never empty.
    pub body: Vec<Position>,
    /// Current facing direction
    pub direction: Direction,
}

impl Snake {
    /// Create a snake with its segments laid out behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Last segment of the chain
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segments behind the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if a cell overlaps any segment behind the head
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if a cell is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Shift the chain: every segment takes the cell of the one ahead of it
    /// and the head takes `new_head`.
    pub fn shift_to(&mut self, new_head: Position) {
        let mut carried = new_head;
        for segment in self.body.iter_mut() {
            carried = std::mem::replace(segment, carried);
        }
    }

    /// Append a segment on top of the tail; it separates on the next shift
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through [`Snake::new`]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head ran into its own body
    SelfCollision,
    /// No free cell left to place the apple
    BoardFull,
}

impl CollisionType {
    pub fn describe(&self) -> &'static str {
        match self {
            CollisionType::Wall => "hit the wall",
            CollisionType::SelfCollision => "bit itself",
            CollisionType::BoardFull => "filled the board",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    /// Seconds per grid step; shrinks as apples are eaten
    pub step_interval: f64,
    /// Seconds accumulated since the last step
    pub timer: f64,
    /// Input gate: a turn is accepted only after the snake moved
    pub has_moved: bool,
    pub game_over: bool,
    pub end_reason: Option<CollisionType>,
}

impl GameState {
    pub fn new(
        snake: Snake,
        apple: Position,
        grid_width: usize,
        grid_height: usize,
        step_interval: f64,
    ) -> Self {
        Self {
            snake,
            apple,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            step_interval,
            timer: 0.0,
            has_moved: true,
            game_over: false,
            end_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn is_alive(&self) -> bool {
        !self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::None), pos);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_zero_length_snake_still_has_head() {
        let snake = Snake::new(Position::new(2, 2), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_shift_moves_each_segment_forward() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        snake.shift_to(Position::new(5, 6));

        assert_eq!(
            snake.body,
            vec![Position::new(5, 6), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_grow_stacks_on_tail_then_separates() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 2);
        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body[1], snake.body[2]);

        snake.shift_to(Position::new(6, 5));
        assert_eq!(
            snake.body,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(8, 8),
            18,
            10,
            0.5,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(17, 9)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(18, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 10)));
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(8, 8),
            18,
            10,
            0.5,
        );
        assert!(state.has_moved);
        assert!(state.is_alive());
        assert_eq!(state.timer, 0.0);
        assert_eq!(state.end_reason, None);
    }
}
