//! Win detection logic for tic-tac-toe.

use crate::types::{BoardSnapshot, Cell, Mark};
use tracing::instrument;

/// The eight index triples that win: rows, then columns, then diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line and the mark that owns it.
#[instrument(skip(board))]
pub fn winning_line(board: &BoardSnapshot) -> Option<([usize; 3], Mark)> {
    let cells = board.cells();
    WINNING_LINES.into_iter().find_map(|line| {
        let [a, b, c] = line;
        match cells[a] {
            Cell::Occupied(mark) if cells[b] == cells[a] && cells[c] == cells[a] => {
                Some((line, mark))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark has three in a row, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &BoardSnapshot) -> Option<Mark> {
    winning_line(board).map(|(_, mark)| mark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Board;

    fn board_with(moves: &[(usize, Mark)]) -> BoardSnapshot {
        let mut board = Board::new();
        for &(index, mark) in moves {
            board.place(index, mark).unwrap();
        }
        board.snapshot()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&BoardSnapshot::default()), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in WINNING_LINES {
            let board = board_with(&line.map(|i| (i, Mark::O)));
            assert_eq!(winning_line(&board), Some((line, Mark::O)), "line {:?}", line);
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = board_with(&[(0, Mark::X), (1, Mark::O), (2, Mark::X)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(0, Mark::X), (1, Mark::X)]);
        assert_eq!(check_winner(&board), None);
    }
}
