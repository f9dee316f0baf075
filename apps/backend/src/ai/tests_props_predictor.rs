use proptest::prelude::*;

use crate::ai::{Predictor, PredictorConfig};
use crate::domain::{test_gens, test_prelude};

fn predictor(max_order: usize) -> Predictor {
    Predictor::new(PredictorConfig {
        max_order,
        seed: Some(1),
        ..PredictorConfig::default()
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: one update raises the realized outcome's count by exactly 1 for
    /// every order below the history length (capped at max_order) and leaves
    /// every other count untouched.
    #[test]
    fn prop_update_increments_each_order_once(
        history in test_gens::non_empty_history(12),
        max_order in 1usize..=4,
    ) {
        let mut model = predictor(max_order);
        for end in 1..history.len() {
            model.update(&history[..end]).expect("non-empty prefix");
        }

        let (&outcome, before) = history.split_last().expect("non-empty");
        let orders: Vec<usize> = (1..=max_order).collect();
        let snapshot: Vec<_> = orders
            .iter()
            .filter(|o| **o <= before.len())
            .map(|o| (*o, model.table().counts_for(&before[before.len() - o..])))
            .collect();

        model.update(&history).expect("update");

        for (order, old) in snapshot {
            let new = model.table().counts_for(&before[before.len() - order..]);
            prop_assert_eq!(new.get(outcome), old.get(outcome) + 1, "order {}", order);
            prop_assert_eq!(new.total(), old.total() + 1, "order {}", order);
        }
    }

    /// Property: without exploration, predict follows the forecast whenever one exists.
    #[test]
    fn prop_predict_counters_forecast(
        training in test_gens::non_empty_history(24),
        query in test_gens::history(6),
    ) {
        let mut model = predictor(3);
        for end in 1..=training.len() {
            model.update(&training[..end]).expect("non-empty prefix");
        }
        if let Some(forecast) = model.forecast(&query) {
            prop_assert!(forecast.order <= query.len().min(3));
            prop_assert_eq!(forecast.counter.beats(), forecast.expected);
            prop_assert_eq!(model.predict(&query), forecast.counter);
        }
    }

    /// Property: trusted forecasts only come from keys that exceed the threshold.
    #[test]
    fn prop_forecast_respects_threshold(
        training in test_gens::non_empty_history(24),
        query in test_gens::non_empty_history(4),
    ) {
        let mut model = predictor(3);
        for end in 1..=training.len() {
            model.update(&training[..end]).expect("non-empty prefix");
        }
        if let Some(forecast) = model.forecast(&query) {
            let key = &query[query.len() - forecast.order..];
            let counts = model.table().counts_for(key);
            prop_assert!(counts.total() > model.config().significance_threshold);
            prop_assert_eq!(counts.most_likely(), forecast.expected);
        }
    }
}
