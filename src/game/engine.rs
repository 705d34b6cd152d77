use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
};
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Outcome of a single state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The snake moved one cell without eating
    Moved,
    /// The snake ate food and grew; `score` is the new total
    Ate { score: u32 },
    /// The move would have collided; the state is now frozen
    GameOver { collision: CollisionType, score: u32 },
    /// The snake ate the last free cell; the state is now frozen
    GridFilled { score: u32 },
    /// Tick on an already finished game; nothing changed
    Frozen,
    /// A fresh game was set up
    Reset,
}

impl Transition {
    /// True for the tick that ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, Transition::GameOver { .. } | Transition::GridFilled { .. })
    }

    /// Final score carried by a terminal transition
    pub fn final_score(&self) -> Option<u32> {
        match self {
            Transition::GameOver { score, .. } | Transition::GridFilled { score } => Some(*score),
            _ => None,
        }
    }
}

/// The game engine that owns the transition rules
///
/// The engine never holds game state itself: callers pass the state in by
/// exclusive reference, so there is exactly one writer per game.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid game config");
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial state: one segment on the start cell, food elsewhere
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::single(Position::new(self.config.start_x, self.config.start_y));
        let food = self.spawn_food_avoid_snake(&snake);

        info!(
            "new game on {}x{} grid, food at ({}, {})",
            self.config.grid_width, self.config.grid_height, food.x, food.y
        );

        GameState::new(
            snake,
            self.config.start_direction,
            food,
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Queue a direction for the next tick
    ///
    /// Rejected when the game is over or when `requested` reverses the
    /// committed direction. The pending value is not consulted, so of several
    /// requests between two ticks the last accepted one wins.
    pub fn set_pending_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if state.is_over || state.direction.is_opposite(requested) {
            return false;
        }

        state.pending_direction = requested;
        true
    }

    /// Execute one step of the game
    pub fn advance(&mut self, state: &mut GameState) -> Transition {
        if state.is_over {
            return Transition::Frozen;
        }

        state.direction = state.pending_direction;
        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision) = self.check_collision(state, new_head) {
            state.is_over = true;
            state.collision = Some(collision);
            info!(
                "game over: {:?} at ({}, {}), score {}",
                collision, new_head.x, new_head.y, state.score
            );
            return Transition::GameOver {
                collision,
                score: state.score,
            };
        }

        state.snake.push_head(new_head);
        state.steps += 1;

        if new_head != state.food {
            state.snake.pop_tail();
            return Transition::Moved;
        }

        state.score += self.config.food_score;

        if state.snake.len() >= self.config.cell_count() {
            state.is_over = true;
            info!("grid filled, score {}", state.score);
            return Transition::GridFilled { score: state.score };
        }

        state.food = self.spawn_food_avoid_snake(&state.snake);
        debug!(
            "ate food at ({}, {}), score {}, next food at ({}, {})",
            new_head.x, new_head.y, state.score, state.food.x, state.food.y
        );

        Transition::Ate { score: state.score }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so its cell still counts
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random empty position
    ///
    /// Rejection sampling; the caller guarantees at least one free cell.
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}
