use tracing::{debug, info, trace};

use super::{
    config::GameConfig,
    direction::Direction,
    error::ConfigError,
    food::FoodSpawner,
    state::{Position, Snake},
};

/// Lifecycle of one game attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been started yet
    Idle,
    Running,
    /// Ended; only `reset` leaves this state
    Terminated,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// No free cell is left for food
    BoardFull,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Session state after the tick
    pub state: SessionState,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set on the tick that ended the session
    pub termination: Option<TerminationReason>,
}

/// Owns one snake session: grid, body, food, score and heading.
///
/// Knows nothing about time or rendering. A driver calls [`tick`](Self::tick)
/// at whatever rate it likes and input handlers call
/// [`set_direction`](Self::set_direction) in between.
#[derive(Debug, Clone)]
pub struct GridSimulation {
    grid_width: usize,
    grid_height: usize,
    growth_increment: u32,
    snake: Snake,
    /// None while stationary
    direction: Option<Direction>,
    /// Accepted turn waiting for the next tick
    pending_direction: Option<Direction>,
    food: Option<Position>,
    score: u32,
    steps: u32,
    state: SessionState,
    termination: Option<TerminationReason>,
    spawner: FoodSpawner,
}

impl GridSimulation {
    /// Create an idle simulation. `seed` fixes food placement for every session it runs.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            grid_width: 0,
            grid_height: 0,
            growth_increment: 0,
            snake: Snake::new(Position::new(0, 0)),
            direction: None,
            pending_direction: None,
            food: None,
            score: 0,
            steps: 0,
            state: SessionState::Idle,
            termination: None,
            spawner: FoodSpawner::new(seed),
        }
    }

    /// Create a running simulation from an explicit layout.
    ///
    /// Used to resume a known position, e.g. to replay a situation. The body is
    /// ordered head to tail and, like the food, must lie inside the grid.
    pub fn restore(
        config: &GameConfig,
        body: Vec<Position>,
        direction: Option<Direction>,
        food: Position,
    ) -> Result<Self, ConfigError> {
        config.validate_grid()?;
        let (width, height) = (config.grid_width, config.grid_height);

        let snake = Snake::from_segments(body).ok_or(ConfigError::EmptyBody)?;
        if let Some(position) = snake.segments().find(|pos| !pos.is_within(width, height)) {
            return Err(ConfigError::BodyOutOfBounds { position });
        }
        if !food.is_within(width, height) || snake.contains(food) {
            return Err(ConfigError::InvalidFood { position: food });
        }

        Ok(Self {
            grid_width: width,
            grid_height: height,
            growth_increment: config.growth_increment,
            snake,
            direction,
            pending_direction: None,
            food: Some(food),
            score: 0,
            steps: 0,
            state: SessionState::Running,
            termination: None,
            spawner: FoodSpawner::new(config.seed),
        })
    }

    /// Start a fresh session, replacing all state.
    ///
    /// Fails without touching the current session when the configuration is invalid.
    pub fn reset(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let start = config.start();
        self.grid_width = config.grid_width;
        self.grid_height = config.grid_height;
        self.growth_increment = config.growth_increment;
        self.snake = Snake::new(start);
        self.direction = None;
        self.pending_direction = None;
        self.score = 0;
        self.steps = 0;
        self.state = SessionState::Running;
        self.termination = None;
        self.food = self
            .spawner
            .spawn(self.grid_width, self.grid_height, &self.snake);

        info!(
            width = self.grid_width,
            height = self.grid_height,
            start = %start,
            "Session reset"
        );

        // Validation guarantees a free cell, but never run without food
        if self.food.is_none() {
            self.terminate(TerminationReason::BoardFull);
        }

        Ok(())
    }

    /// Queue a turn for the next tick.
    ///
    /// Accepted only while running, and only across the current axis of motion;
    /// any direction is accepted while stationary. The latest accepted turn
    /// replaces an earlier one queued in the same tick. Returns whether it was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state != SessionState::Running {
            return false;
        }

        if let Some(current) = self.direction {
            if current.shares_axis(direction) {
                trace!(?current, requested = ?direction, "Turn rejected");
                return false;
            }
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Advance the session by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::Running {
            return self.outcome(false, None);
        }

        if let Some(next) = self.pending_direction.take() {
            self.direction = Some(next);
        }

        let Some(direction) = self.direction else {
            return self.outcome(false, None);
        };

        let new_head = self.snake.head().moved_in_direction(direction);
        let ate_food = self.food == Some(new_head);

        self.snake.advance(new_head, ate_food);
        self.steps = self.steps.saturating_add(1);

        if ate_food {
            self.score += self.growth_increment;
            self.food = self
                .spawner
                .spawn(self.grid_width, self.grid_height, &self.snake);
            debug!(at = %new_head, score = self.score, length = self.snake.len(), "Food eaten");
        }

        let termination = self.check_collision(new_head).or_else(|| {
            self.food
                .is_none()
                .then_some(TerminationReason::BoardFull)
        });

        if let Some(reason) = termination {
            self.terminate(reason);
        }

        self.outcome(ate_food, termination)
    }

    /// Check the post-move body for a wall or self collision at the new head
    fn check_collision(&self, head: Position) -> Option<TerminationReason> {
        if !head.is_within(self.grid_width, self.grid_height) {
            return Some(TerminationReason::Wall);
        }

        if self.snake.collides_with_body(head) {
            return Some(TerminationReason::SelfCollision);
        }

        None
    }

    fn terminate(&mut self, reason: TerminationReason) {
        self.state = SessionState::Terminated;
        self.termination = Some(reason);
        self.pending_direction = None;
        info!(?reason, score = self.score, steps = self.steps, "Session terminated");
    }

    fn outcome(&self, ate_food: bool, termination: Option<TerminationReason>) -> TickOutcome {
        TickOutcome {
            state: self.state,
            ate_food,
            termination,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Body segments from head to tail
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments()
    }

    /// Current food cell; None only after the board filled up
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Heading in effect; None while stationary
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }
}
