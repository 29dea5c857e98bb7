//! Board invariants - sanity checks that detect bugs.
//!
//! The spawner only places 2s and 4s and merges only double equal values,
//! so these should never trigger. A violation means a bug or a misbehaving
//! [`TileSource`](crate::game::TileSource).

use crate::game::Board;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let expected = board.size() * board.size();
    if board.cells().len() != expected {
        violations.push(InvariantViolation {
            message: format!(
                "Board of size {} has {} cells, expected {expected}",
                board.size(),
                board.cells().len()
            ),
        });
    }

    for (cell, value) in board.iter() {
        if value != 0 && !value.is_power_of_two() {
            violations.push(InvariantViolation {
                message: format!("Cell {cell} holds {value}, not 0 or a power of two"),
            });
        }
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with every violation listed if any invariant is broken.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}
