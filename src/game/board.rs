//! Board and cell types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// A cell position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index (0 = left).
    pub col: usize,
}

impl Cell {
    /// Create a new cell position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square grid of tile values. 0 marks an empty cell.
///
/// Cells are stored in row-major order. Every cell holds 0 or a power of
/// two; construction through [`Board::new`] and [`Board::from_rows`] is the
/// only way in, and the move pipeline only ever doubles equal values.
///
/// Serializes as a nested sequence of rows.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Board {
    /// Side length.
    size: usize,
    /// Tiles in row-major order.
    cells: Vec<u32>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSize`] if `size` is zero or `size * size`
    /// overflows `usize`.
    pub fn new(size: usize) -> GameResult<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize(size));
        }
        let len = size.checked_mul(size).ok_or(GameError::InvalidSize(size))?;

        Ok(Self {
            size,
            cells: vec![0; len],
        })
    }

    /// Build a board from explicit rows.
    ///
    /// # Errors
    ///
    /// Fails if there are no rows, if any row length differs from the row
    /// count, if a value is neither 0 nor a power of two, or if the tiles sum
    /// past `u32::MAX`.
    pub fn from_rows(rows: &[Vec<u32>]) -> GameResult<Self> {
        let size = rows.len();
        let mut board = Self::new(size)?;
        let mut sum = 0u64;

        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(GameError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0 && !value.is_power_of_two() {
                    return Err(GameError::InvalidTile {
                        cell: Cell::new(row, col),
                        value,
                    });
                }
                sum += u64::from(value);
            }
            board.cells[row * size..(row + 1) * size].copy_from_slice(values);
        }

        if sum > u64::from(u32::MAX) {
            return Err(GameError::TileSumOverflow);
        }

        Ok(board)
    }

    /// Build a board from a fixed-size array of rows.
    ///
    /// # Errors
    ///
    /// Same as [`Board::from_rows`].
    pub fn from_array<const N: usize>(rows: [[u32; N]; N]) -> GameResult<Self> {
        let rows: Vec<Vec<u32>> = rows.iter().map(|row| row.to_vec()).collect();
        Self::from_rows(&rows)
    }

    /// Rebuild a board from already-validated rows of equal length.
    pub(crate) fn from_row_vecs(size: usize, rows: impl IntoIterator<Item = Vec<u32>>) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            debug_assert_eq!(row.len(), size);
            cells.extend(row);
        }
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Check if a cell is on the board.
    #[must_use]
    pub const fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell).then(|| cell.row * self.size + cell.col)
    }

    /// Value at `cell`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<u32> {
        self.index(cell).map(|idx| self.cells[idx])
    }

    /// Overwrite the value at `cell`.
    ///
    /// Returns `false` if the cell is out of bounds.
    pub(crate) fn set(&mut self, cell: Cell, value: u32) -> bool {
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = value;
            true
        } else {
            false
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(self.size)
    }

    /// Copy the board out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// Iterate over all cells and their values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &value)| (Cell::new(idx / size, idx % size), value))
    }

    /// Iterate over empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter()
            .filter(|&(_, value)| value == 0)
            .map(|(cell, _)| cell)
    }

    /// Number of empty cells.
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    /// Largest tile on the board, 0 if empty.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&value| u64::from(value)).sum()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<u32>>) -> GameResult<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

/// Create an empty `size`×`size` board.
///
/// # Errors
///
/// Returns [`GameError::InvalidSize`] if `size` is zero.
pub fn new_game(size: usize) -> GameResult<Board> {
    Board::new(size)
}

/// Largest tile on the board, 0 if empty.
#[must_use]
pub fn max_tile(board: &Board) -> u32 {
    board.max_tile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_empty() {
        let board = new_game(4).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.count_empty(), 16);
        assert_eq!(max_tile(&board), 0);
    }

    #[test]
    fn test_new_game_zero_size() {
        assert_eq!(new_game(0), Err(GameError::InvalidSize(0)));
    }

    #[test]
    fn test_new_game_size_overflow() {
        assert_eq!(new_game(usize::MAX), Err(GameError::InvalidSize(usize::MAX)));
        let side = 1usize << (usize::BITS / 2);
        assert_eq!(Board::new(side), Err(GameError::InvalidSize(side)));
    }

    #[test]
    fn test_from_rows_validation() {
        assert_eq!(
            Board::from_rows(&[vec![2, 0], vec![0]]),
            Err(GameError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            Board::from_array([[2, 3], [0, 0]]),
            Err(GameError::InvalidTile {
                cell: Cell::new(0, 1),
                value: 3
            })
        );
        assert_eq!(Board::from_rows(&[]), Err(GameError::InvalidSize(0)));
        assert_eq!(
            Board::from_array([[1 << 31, 1 << 31], [0, 0]]),
            Err(GameError::TileSumOverflow)
        );
    }

    #[test]
    fn test_get_and_bounds() {
        let board = Board::from_array([[2, 4], [8, 0]]).unwrap();
        assert_eq!(board.get(Cell::new(0, 1)), Some(4));
        assert_eq!(board.get(Cell::new(1, 0)), Some(8));
        assert_eq!(board.get(Cell::new(2, 0)), None);
        assert!(!board.in_bounds(Cell::new(0, 2)));
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board::from_array([[0, 2], [0, 0]]).unwrap();
        let empty: Vec<_> = board.empty_cells().collect();
        assert_eq!(
            empty,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_max_tile_and_sum() {
        let board = Board::from_array([[2, 64, 0], [4, 0, 0], [0, 0, 8]]).unwrap();
        assert_eq!(board.max_tile(), 64);
        assert_eq!(board.tile_sum(), 78);
    }

    #[test]
    fn test_serde_nested_rows() {
        let board = Board::from_array([[2, 0], [0, 4]]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[2,0],[0,4]]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>("[[3,0],[0,0]]").is_err());
    }
}
