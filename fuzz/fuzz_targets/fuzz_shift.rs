#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use twenty48::game::check_invariants;
use twenty48::{is_terminal, shift, Board, Direction};

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct ShiftInput {
    /// Board side length, reduced to 1..=8.
    size: u8,
    /// Tile exponents; 0 means empty, otherwise the tile is `2^e`.
    exponents: Vec<u8>,
    /// Moves to apply in order.
    moves: Vec<u8>,
}

fuzz_target!(|input: ShiftInput| {
    let size = usize::from(input.size % 8) + 1;

    // Exponents up to 20 keep any 8x8 tile sum inside u32
    let rows: Vec<Vec<u32>> = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    let e = input.exponents.get(row * size + col).copied().unwrap_or(0) % 21;
                    if e == 0 { 0 } else { 1u32 << e }
                })
                .collect()
        })
        .collect();

    let Ok(mut board) = Board::from_rows(&rows) else {
        return;
    };
    let sum = board.tile_sum();

    for &m in input.moves.iter().take(64) {
        let direction = Direction::ALL[usize::from(m % 4)];
        let (next, moved) = shift(&board, direction);

        // Moves conserve the tile sum and report change exactly
        assert_eq!(next.tile_sum(), sum);
        assert_eq!(moved, next != board);

        let violations = check_invariants(&next);
        assert!(violations.is_empty(), "invariant violations: {violations:?}");

        board = next;
    }

    let any_move = Direction::ALL.iter().any(|&d| shift(&board, d).1);
    assert_eq!(is_terminal(&board), !any_move);
});
