use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a snake of `length` segments, laid out behind `head` so that it
    /// faces `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body }
    }

    /// Single-segment snake
    pub fn single(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// True if any segment, head and tail included, occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete game state, exclusively owned by one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction applied on the most recent tick
    pub direction: Direction,
    /// Latest accepted request, committed at the start of the next tick
    pub pending_direction: Direction,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    /// Number of ticks that moved the snake
    pub steps: u32,
    pub is_over: bool,
    /// Set together with `is_over` when a collision ended the game
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        direction: Direction,
        food: Position,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            snake,
            direction,
            pending_direction: direction,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            is_over: false,
            collision: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            score: self.score,
            is_over: self.is_over,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }
}

/// Read-only view of a [`GameState`] handed to renderers and observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Snake segments, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub is_over: bool,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl GameSnapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }
}
