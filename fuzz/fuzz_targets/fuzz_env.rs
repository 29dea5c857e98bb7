#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use twenty48::env::{Env, EnvConfig};
use twenty48::game::check_invariants;
use twenty48::GameError;

/// Structured input for environment fuzzing.
#[derive(Arbitrary, Debug)]
struct EnvInput {
    /// Spawn seed.
    seed: u64,
    /// Board side length, reduced to 2..=6.
    size: u8,
    /// Raw actions, including out-of-range ones.
    actions: Vec<u8>,
}

fuzz_target!(|input: EnvInput| {
    let config = EnvConfig {
        board_size: usize::from(input.size % 5) + 2,
        ..EnvConfig::default()
    };
    let mut env = Env::seeded(config, input.seed);
    if env.reset().is_err() {
        return;
    }

    for &action in input.actions.iter().take(512) {
        let steps_before = env.step_count();
        match env.step(action) {
            Ok(step) => {
                assert!(action < 4);
                assert_eq!(step.observation.len(), env.observation_len());
                assert_eq!(step.terminal, env.is_terminal());
                assert_eq!(env.step_count(), steps_before + 1);
            }
            Err(GameError::InvalidDirection(a)) => {
                assert_eq!(a, action);
                assert_eq!(env.step_count(), steps_before);
            }
            Err(e) => panic!("unexpected error: {e}"),
        }

        if let Some(board) = env.board() {
            let violations = check_invariants(board);
            assert!(violations.is_empty(), "invariant violations: {violations:?}");
        }
    }
});
