//! Property-based tests using proptest.
//!
//! These tests verify invariants of the combinatorial primitive and the
//! urn inference engine over randomly generated configurations.

use bayes_urns::prelude::*;
use bayes_urns::stats::combinatorics::ratio_to_f64;
use num_bigint::BigUint;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

// Strategy for valid configurations: population, draws, observations, sampling.
fn config_strategy() -> impl Strategy<Value = UrnConfig> {
    (2u64..60, any::<bool>(), 0.01f64..0.99)
        .prop_flat_map(|(population, with_replacement, significance)| {
            (
                Just(population),
                1..=population,
                Just(with_replacement),
                Just(significance),
            )
        })
        .prop_flat_map(|(population, draws, with_replacement, significance)| {
            proptest::collection::vec(0..=draws, 1..8).prop_map(move |observations| {
                UrnConfig::new(
                    population,
                    draws,
                    observations,
                    Sampling::from_replacement(with_replacement),
                )
                .with_significance_level(significance)
            })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Combinatorial primitive
    #[test]
    fn binomial_is_symmetric(n in 0u64..120, k in 0u64..120) {
        prop_assume!(k <= n);
        let k = k as i64;
        prop_assert_eq!(binomial(n, k), binomial(n, n as i64 - k));
    }

    #[test]
    fn binomial_out_of_range_is_zero(n in 0u64..100, excess in 1i64..50) {
        prop_assert_eq!(binomial(n, -excess), BigUint::from(0u32));
        prop_assert_eq!(binomial(n, n as i64 + excess), BigUint::from(0u32));
    }

    #[test]
    fn binomial_row_sums_to_power_of_two(n in 0u64..200) {
        let total: BigUint = (0..=n as i64).map(|k| binomial(n, k)).sum();
        prop_assert_eq!(total, BigUint::from(1u32) << n);
    }

    #[test]
    fn ratio_matches_float_division(num in 0u64..1_000_000, den in 1u64..1_000_000) {
        let exact = ratio_to_f64(&BigUint::from(num), &BigUint::from(den));
        prop_assert!((exact - num as f64 / den as f64).abs() < 1e-12 * (1.0 + exact));
    }

    #[test]
    fn ratio_keeps_precision_against_wide_denominators(
        num in 1u64..1_000_000,
        den in 1u64..1_000_000,
        shift in 900u32..1000,
    ) {
        // num / (den * 2^shift) stays in the normal range.
        let exact = ratio_to_f64(&BigUint::from(num), &(BigUint::from(den) << shift));
        let scale = f64::from_bits(u64::from(1023 - shift) << 52);
        let expected = num as f64 / den as f64 * scale;
        prop_assert!(exact > 0.0);
        prop_assert!(((exact - expected) / expected).abs() < 1e-15, "{} vs {}", exact, expected);
    }

    // Inference engine
    #[test]
    fn every_stage_is_normalized(config in config_strategy()) {
        // Some generated configurations leave no hypothesis; those are rejected up front.
        if let Ok(mut urn) = UrnInference::new(config) {
            let history = urn.run_inference().expect("valid configurations never degenerate at this scale");
            for stage in history {
                let total: f64 = stage.iter().sum();
                prop_assert!((total - 1.0).abs() < TOLERANCE, "sum = {}", total);
                prop_assert!(stage.iter().all(|p| p.is_finite() && *p >= 0.0));
            }
        }
    }

    #[test]
    fn history_has_one_stage_per_observation_plus_prior(config in config_strategy()) {
        let observations = config.observations().len();
        if let Ok(mut urn) = UrnInference::new(config) {
            let len = urn.run_inference().expect("inference succeeds").len();
            prop_assert_eq!(len, observations + 1);
            prop_assert_eq!(urn.state(), InferenceState::FullyFolded);
        }
    }

    #[test]
    fn stage_zero_is_uniform(config in config_strategy()) {
        if let Ok(mut urn) = UrnInference::new(config) {
            let n = urn.hypothesis_space().len() as f64;
            let history = urn.run_inference().expect("inference succeeds");
            prop_assert!(history[0].iter().all(|&p| p == 1.0 / n));
        }
    }

    #[test]
    fn rerunning_inference_is_a_no_op(config in config_strategy()) {
        if let Ok(mut urn) = UrnInference::new(config) {
            let first = urn.run_inference().expect("inference succeeds").to_vec();
            let second = urn.run_inference().expect("inference succeeds").to_vec();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn conclusion_is_consistent_with_posterior(config in config_strategy()) {
        if let Ok(mut urn) = UrnInference::new(config) {
            urn.run_inference().expect("inference succeeds");
            let verdict = urn.conclude().expect("inference complete");
            let posterior = urn.posterior().expect("inference complete");

            let first_max = posterior
                .iter()
                .position(|&p| p == verdict.max_probability)
                .expect("max is in the posterior");
            prop_assert_eq!(urn.hypothesis_space()[first_max], verdict.best_hypothesis);
            prop_assert!(posterior.iter().all(|&p| p <= verdict.max_probability));
            prop_assert_eq!(
                verdict.accepted,
                1.0 - verdict.max_probability <= urn.config().significance_level()
            );
        }
    }
}
