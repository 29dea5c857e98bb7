//! Row primitives: compaction and merge.
//!
//! Both operate on each row independently and build a new row rather than
//! editing the input, so a freshly doubled tile never meets its new
//! neighbour in the same pass.

use crate::game::Board;

/// Slide the non-zero values of `row` to the left, keeping their order.
///
/// Returns the new row and whether any value changed column.
#[must_use]
pub fn compact_row(row: &[u32]) -> (Vec<u32>, bool) {
    let mut out = vec![0; row.len()];
    let mut changed = false;
    let mut next = 0;

    for (col, &value) in row.iter().enumerate() {
        if value != 0 {
            out[next] = value;
            if col != next {
                changed = true;
            }
            next += 1;
        }
    }

    (out, changed)
}

/// Merge equal adjacent pairs of `row`, scanning left to right.
///
/// A merge doubles the left tile and empties the right one, so each tile
/// merges at most once. Returns the new row and whether any merge happened.
#[must_use]
pub fn merge_row(row: &[u32]) -> (Vec<u32>, bool) {
    let mut out = row.to_vec();
    let mut changed = false;

    for i in 0..out.len().saturating_sub(1) {
        if out[i] != 0 && out[i] == out[i + 1] {
            // Boards keep their tile sum within u32, so a pair sums to at most u32::MAX
            out[i] *= 2;
            out[i + 1] = 0;
            changed = true;
        }
    }

    (out, changed)
}

fn map_rows(board: &Board, op: fn(&[u32]) -> (Vec<u32>, bool)) -> (Board, bool) {
    let mut changed = false;
    let rows: Vec<Vec<u32>> = board
        .rows()
        .map(|row| {
            let (row, row_changed) = op(row);
            changed |= row_changed;
            row
        })
        .collect();

    (Board::from_row_vecs(board.size(), rows), changed)
}

/// Compact every row of the board toward the left edge.
///
/// Idempotent: a second call returns the same board and `false`.
#[must_use]
pub fn compact(board: &Board) -> (Board, bool) {
    map_rows(board, compact_row)
}

/// Merge equal adjacent pairs in every row.
#[must_use]
pub fn merge(board: &Board) -> (Board, bool) {
    map_rows(board, merge_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_row() {
        assert_eq!(compact_row(&[0, 2, 0, 4]), (vec![2, 4, 0, 0], true));
        assert_eq!(compact_row(&[2, 4, 0, 0]), (vec![2, 4, 0, 0], false));
        assert_eq!(compact_row(&[0, 0, 0, 0]), (vec![0, 0, 0, 0], false));
        assert_eq!(compact_row(&[0, 0, 0, 8]), (vec![8, 0, 0, 0], true));
    }

    #[test]
    fn test_merge_row_pairs_once() {
        assert_eq!(merge_row(&[2, 2, 2, 2]), (vec![4, 0, 4, 0], true));
        assert_eq!(merge_row(&[2, 2, 2, 0]), (vec![4, 0, 2, 0], true));
        assert_eq!(merge_row(&[4, 2, 2, 0]), (vec![4, 4, 0, 0], true));
    }

    #[test]
    fn test_merge_row_largest_pair() {
        let half = 1u32 << 30;
        assert_eq!(merge_row(&[half, half]), (vec![1 << 31, 0], true));
    }

    #[test]
    fn test_merge_row_ignores_zeros() {
        assert_eq!(merge_row(&[0, 0, 2, 4]), (vec![0, 0, 2, 4], false));
        assert_eq!(merge_row(&[2, 0, 2, 0]), (vec![2, 0, 2, 0], false));
    }

    #[test]
    fn test_single_cell_row() {
        assert_eq!(merge_row(&[2]), (vec![2], false));
        assert_eq!(compact_row(&[2]), (vec![2], false));
    }

    #[test]
    fn test_compact_board_idempotent() {
        let board = Board::from_array([[0, 2, 0, 2], [4, 0, 0, 0], [0, 0, 0, 0], [0, 8, 8, 0]])
            .unwrap();
        let (once, changed) = compact(&board);
        assert!(changed);
        let (twice, changed_again) = compact(&once);
        assert_eq!(once, twice);
        assert!(!changed_again);
    }

    #[test]
    fn test_merge_board() {
        let board = Board::from_array([[2, 2], [4, 8]]).unwrap();
        let (merged, changed) = merge(&board);
        assert!(changed);
        assert_eq!(merged, Board::from_array([[4, 0], [4, 8]]).unwrap());
    }
}
