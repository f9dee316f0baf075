use crate::ai::{Forecast, Predictor, PredictorConfig};
use crate::domain::{DomainError, Move};

use Move::{Paper as P, Rock as R, Scissors as S};

fn seeded(max_order: usize, threshold: u32) -> Predictor {
    Predictor::new(PredictorConfig {
        max_order,
        significance_threshold: threshold,
        seed: Some(7),
        ..PredictorConfig::default()
    })
}

/// Feed a whole game's history the way the round loop does: one update per new move.
fn replay(predictor: &mut Predictor, moves: &[Move]) {
    for end in 1..=moves.len() {
        predictor.update(&moves[..end]).expect("non-empty prefix");
    }
}

#[test]
fn update_rejects_empty_history() {
    let mut predictor = seeded(3, 2);
    assert_eq!(predictor.update(&[]), Err(DomainError::EmptyHistory));
    assert!(predictor.table().is_empty());
}

#[test]
fn single_move_history_records_nothing() {
    let mut predictor = seeded(3, 2);
    predictor.update(&[R]).expect("update");
    assert!(predictor.table().is_empty());
}

#[test]
fn update_credits_every_order_up_to_max() {
    let mut predictor = seeded(2, 0);
    predictor.update(&[S, R, P, S]).expect("update");

    let table = predictor.table();
    assert_eq!(table.counts_for(&[P]).get(S), 1);
    assert_eq!(table.counts_for(&[R, P]).get(S), 1);
    // order 3 exceeds max_order
    assert_eq!(table.counts_for(&[S, R, P]).total(), 0);
    assert_eq!(table.len(), 2);
}

#[test]
fn pattern_below_threshold_is_not_trusted() {
    let mut predictor = seeded(1, 2);
    // [R] -> P observed twice: total == threshold, not above it
    predictor.update(&[R, P]).expect("update");
    predictor.update(&[R, P]).expect("update");
    assert_eq!(predictor.forecast(&[R]), None);

    predictor.update(&[R, P]).expect("update");
    assert_eq!(
        predictor.forecast(&[R]),
        Some(Forecast {
            order: 1,
            expected: P,
            counter: S,
        })
    );
}

#[test]
fn longest_trusted_pattern_wins_over_shorter_one() {
    let mut predictor = seeded(2, 2);
    for _ in 0..3 {
        predictor.update(&[R, P, S]).expect("update");
    }
    for _ in 0..5 {
        predictor.update(&[S, P, R]).expect("update");
    }

    // [P] alone leans Rock (5 vs 3), [R, P] always led to Scissors.
    assert_eq!(predictor.table().counts_for(&[P]).most_likely(), R);
    assert_eq!(predictor.table().counts_for(&[R, P]).most_likely(), S);

    assert_eq!(predictor.predict(&[R, P]), R, "counter to Scissors");
    assert_eq!(predictor.predict(&[P]), P, "counter to Rock");
}

#[test]
fn backs_off_when_longest_pattern_is_unseen() {
    let mut predictor = seeded(3, 2);
    for _ in 0..4 {
        predictor.update(&[S, S]).expect("update");
    }
    // [P, S] never seen, [S] -> S trusted
    let forecast = predictor.forecast(&[P, S]).expect("order-1 fallback");
    assert_eq!(forecast.order, 1);
    assert_eq!(forecast.expected, S);
    assert_eq!(predictor.predict(&[P, S]), R);
}

#[test]
fn tied_counts_predict_lowest_ordinal() {
    let mut predictor = seeded(1, 2);
    for _ in 0..2 {
        predictor.update(&[P, S]).expect("update");
        predictor.update(&[P, P]).expect("update");
    }
    let forecast = predictor.forecast(&[P]).expect("trusted");
    assert_eq!(forecast.expected, P);
    assert_eq!(forecast.counter, S);
}

#[test]
fn learns_a_repeating_cycle() {
    let mut predictor = seeded(3, 2);
    let cycle: Vec<Move> = [R, P, S].iter().copied().cycle().take(15).collect();
    replay(&mut predictor, &cycle);

    // after ... R, P, S the player throws R; beat it with P
    assert_eq!(predictor.predict(&cycle), P);
}

#[test]
fn empty_history_is_roughly_uniform() {
    let mut predictor = seeded(3, 2);
    let mut tally = [0usize; 3];
    for _ in 0..3000 {
        tally[predictor.predict(&[]).ordinal()] += 1;
    }
    assert!(predictor.table().is_empty());
    for (ordinal, count) in tally.iter().enumerate() {
        assert!(
            (850..=1150).contains(count),
            "move {ordinal} drawn {count} times out of 3000"
        );
    }
}

#[test]
fn full_exploration_ignores_the_model() {
    let mut predictor = Predictor::new(PredictorConfig {
        max_order: 1,
        significance_threshold: 0,
        exploration: 1.0,
        seed: Some(11),
    });
    for _ in 0..5 {
        predictor.update(&[R, R]).expect("update");
    }
    assert!(predictor.forecast(&[R]).is_some());

    let mut seen = [false; 3];
    for _ in 0..300 {
        seen[predictor.predict(&[R]).ordinal()] = true;
    }
    assert!(seen.iter().all(|s| *s), "exploration should reach every move");
}

#[test]
fn same_seed_gives_same_fallback_sequence() {
    let mut a = seeded(3, 2);
    let mut b = seeded(3, 2);
    let draws_a: Vec<Move> = (0..32).map(|_| a.predict(&[])).collect();
    let draws_b: Vec<Move> = (0..32).map(|_| b.predict(&[])).collect();
    assert_eq!(draws_a, draws_b);
}
