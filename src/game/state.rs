use std::collections::VecDeque;
use std::time::Duration;

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Neighbouring cell one step in a direction. May lie off the grid.
    pub fn step(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A one-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from explicit segments, head first. Returns None when empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend a new head, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// Snake covers every cell, nowhere left to place food
    BoardFilled,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub rows: usize,
    pub cols: usize,
    pub snake: Snake,
    pub direction: Direction,
    /// None only once the board is full
    pub food: Option<Cell>,
    pub score: u32,
    pub elapsed: Duration,
    pub is_alive: bool,
    pub outcome: Option<Outcome>,
}

impl GameState {
    pub fn new(
        rows: usize,
        cols: usize,
        snake: Snake,
        direction: Direction,
        food: Option<Cell>,
    ) -> Self {
        Self {
            rows,
            cols,
            snake,
            direction,
            food,
            score: 0,
            elapsed: Duration::ZERO,
            is_alive: true,
            outcome: None,
        }
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && (cell.row as usize) < self.rows
            && cell.col >= 0
            && (cell.col as usize) < self.cols
    }

    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    /// Elapsed play time as MM:SS. Minutes keep counting past 59.
    pub fn format_elapsed(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Up), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Down), Cell::new(6, 5));
        assert_eq!(cell.step(Direction::Left), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Right), Cell::new(5, 6));
        assert_eq!(Cell::new(0, 0).step(Direction::Up), Cell::new(-1, 0));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_cells([Cell::new(1, 1), Cell::new(1, 0)]).unwrap();

        snake.advance(Cell::new(1, 2), false);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(1, 2));
        assert!(!snake.contains(Cell::new(1, 0)));

        snake.advance(Cell::new(1, 3), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.cells().copied().collect::<Vec<_>>(),
            vec![Cell::new(1, 3), Cell::new(1, 2), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_empty_snake_rejected() {
        assert!(Snake::from_cells(Vec::new()).is_none());
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(10, 20, Snake::new(Cell::new(1, 3)), Direction::Down, None);

        assert!(state.is_in_bounds(Cell::new(0, 0)));
        assert!(state.is_in_bounds(Cell::new(9, 19)));
        assert!(!state.is_in_bounds(Cell::new(-1, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, -1)));
        assert!(!state.is_in_bounds(Cell::new(10, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, 20)));
    }

    #[test]
    fn test_elapsed_formatting() {
        let mut state = GameState::new(5, 5, Snake::new(Cell::new(0, 0)), Direction::Down, None);
        assert_eq!(state.format_elapsed(), "00:00");

        state.elapsed = Duration::from_secs(125);
        assert_eq!(state.format_elapsed(), "02:05");

        state.elapsed = Duration::from_secs(3661);
        assert_eq!(state.format_elapsed(), "61:01");
    }
}
