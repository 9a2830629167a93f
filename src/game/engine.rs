use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use super::{
    config::{GameConfig, MAX_GRID_DIM},
    direction::Direction,
    error::GameError,
    state::{Cell, GameState, Outcome, Snake},
};

/// Where a fresh snake starts, before clamping to small grids
const START_CELL: Cell = Cell { row: 1, col: 3 };

/// Random draws per free-cell search before falling back to a full scan
const SAMPLES_PER_CELL: usize = 4;

/// The game engine: owns the grid, the current state and the food RNG
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    pending_direction: Option<Direction>,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine and derive its first state from the configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = Self::initial_state(config.rows, config.cols);

        let mut engine = Self {
            config,
            state,
            pending_direction: None,
            rng,
        };
        engine.reset();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Resize the grid and start over. Leaves the engine untouched on error.
    pub fn configure(&mut self, rows: i32, cols: i32) -> Result<&GameState, GameError> {
        let dim = |n: i32| {
            usize::try_from(n)
                .ok()
                .filter(|n| (1..=MAX_GRID_DIM).contains(n))
        };
        let (Some(row_count), Some(col_count)) = (dim(rows), dim(cols)) else {
            return Err(GameError::InvalidGrid {
                rows: rows.into(),
                cols: cols.into(),
            });
        };

        self.config.rows = row_count;
        self.config.cols = col_count;
        info!(rows, cols, "grid configured");

        Ok(self.reset())
    }

    /// Reset the game to its initial state on the current grid
    pub fn reset(&mut self) -> &GameState {
        self.state = Self::initial_state(self.config.rows, self.config.cols);
        self.pending_direction = None;
        self.state.food = self.spawn_food();

        debug!(
            head = ?self.state.snake.head(),
            food = ?self.state.food,
            "game reset"
        );
        // A 1x1 grid is already full
        if self.state.food.is_none() {
            self.finish(Outcome::BoardFilled);
        }
        &self.state
    }

    /// Pick a random cell not covered by the snake, or None if the board is full
    pub fn spawn_food(&mut self) -> Option<Cell> {
        let rows = self.state.rows;
        let cols = self.state.cols;
        let cells = self.state.cell_count();
        if self.state.snake.len() >= cells {
            return None;
        }

        for _ in 0..cells.saturating_mul(SAMPLES_PER_CELL) {
            let cell = Cell::new(
                coord(self.rng.gen_range(0..rows)),
                coord(self.rng.gen_range(0..cols)),
            );
            if !self.state.snake.contains(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = (0..coord(rows))
            .flat_map(|row| (0..coord(cols)).map(move |col| Cell::new(row, col)))
            .filter(|cell| !self.state.snake.contains(*cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    /// Queue a direction for the next tick.
    ///
    /// Reversals of the current direction are ignored, as are changes on a
    /// finished game. Returns whether the request was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_alive || self.state.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance the snake by one cell
    pub fn tick(&mut self) -> &GameState {
        if !self.state.is_alive {
            return &self.state;
        }

        let direction = self.pending_direction.take().unwrap_or(self.state.direction);
        let new_head = self.state.snake.head().step(direction);

        if let Some(outcome) = self.check_collision(new_head) {
            self.finish(outcome);
            return &self.state;
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.direction = direction;
        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            self.state.score += self.config.food_reward;
            self.state.food = self.spawn_food();
            debug!(score = self.state.score, food = ?self.state.food, "food eaten");

            if self.state.food.is_none() {
                self.finish(Outcome::BoardFilled);
            }
        }

        &self.state
    }

    /// Add play time to a running game
    pub fn advance_clock(&mut self, by: Duration) {
        if self.state.is_alive {
            self.state.elapsed += by;
        }
    }

    fn check_collision(&self, cell: Cell) -> Option<Outcome> {
        if !self.state.is_in_bounds(cell) {
            return Some(Outcome::Wall);
        }
        if self.state.snake.contains(cell) {
            return Some(Outcome::SelfCollision);
        }
        None
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.is_alive = false;
        self.state.outcome = Some(outcome);
        self.pending_direction = None;
        info!(
            ?outcome,
            score = self.state.score,
            length = self.state.snake.len(),
            elapsed = %self.state.format_elapsed(),
            "game over"
        );
    }

    fn initial_state(rows: usize, cols: usize) -> GameState {
        let head = Cell::new(
            START_CELL.row.min(coord(rows) - 1),
            START_CELL.col.min(coord(cols) - 1),
        );
        GameState::new(rows, cols, Snake::new(head), Direction::default(), None)
    }
}

/// Grid index as a cell coordinate. Grids are capped at MAX_GRID_DIM, so this never saturates.
fn coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
