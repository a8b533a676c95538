//! Core domain types for tic-tac-toe.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The symbol identifying a player's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Mark assigned to the player in the given seat (0 → X, 1 → O).
    pub fn for_seat(seat: usize) -> Self {
        if seat % 2 == 0 { Mark::X } else { Mark::O }
    }
}

/// One of the nine board positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Holds a mark for the rest of the game.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order (0-8). A cell only ever moves from
/// `Empty` to `Occupied`; the sole way back is [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if `index` is not in 0-8.
    pub fn cell_at(&self, index: usize) -> Result<Cell, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfRange { index })
    }

    /// Places a mark in an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] for an index outside 0-8 and
    /// [`BoardError::CellOccupied`] if the cell already holds a mark. The
    /// board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index })?;
        if !cell.is_empty() {
            return Err(BoardError::CellOccupied { index });
        }
        *cell = Cell::Occupied(mark);
        Ok(())
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Produces an immutable copy of the cells for evaluators and renderers.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot { cells: self.cells }
    }
}

/// Immutable copy of the nine cells at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    cells: [Cell; CELL_COUNT],
}

impl BoardSnapshot {
    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the cell at `index`, or `None` if out of range.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Indices of every empty cell, in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

impl std::fmt::Display for BoardSnapshot {
    /// Empty cells show their 1-based number so players can pick them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, " {} ", index + 1)?,
                    Cell::Occupied(mark) => write!(f, " {} ", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n---+---+---\n")?;
            }
        }
        Ok(())
    }
}

/// Current status of a game in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with three in a row.
    Won(Mark),
    /// Board filled with no winner.
    Draw,
}

impl GameStatus {
    /// Checks if no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// An accepted move: a mark placed at a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark that was placed.
    pub marker: Mark,
    /// The board index (0-8).
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(marker: Mark, index: usize) -> Self {
        Self { marker, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.marker, self.index)
    }
}
