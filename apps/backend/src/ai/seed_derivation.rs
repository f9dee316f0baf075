//! RNG seed derivation for predictors.
//!
//! A configured base seed makes play reproducible, but every session and
//! every game inside a session must still get its own stream.

/// Derive the predictor seed for one game of one session.
///
/// Same (base, session, game) always yields the same seed; changing any
/// component yields a different one.
pub fn derive_predictor_seed(base_seed: u64, session_no: u64, game_no: u32) -> u64 {
    base_seed
        .wrapping_add(session_no.wrapping_mul(1_000_003))
        .wrapping_add((game_no as u64).wrapping_mul(10_007))
        .wrapping_add(1)
}
