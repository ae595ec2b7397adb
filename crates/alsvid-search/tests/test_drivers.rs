//! Driver behavior over real multiplier circuits.
//!
//! Local search offers no success guarantee, so most of these assert the
//! outcome contract (a reported factorization always multiplies to the
//! target, budgets are respected, seeded runs reproduce) rather than that
//! any particular target falls.

use alsvid_search::{
    FactorOutcome, GreedySearch, MomentumSearch, ReverseSearch, SearchError, SoftmaxSearch,
};
use alsvid_synth::{full_adder_a1, half_adder_a1, multiplier};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn assert_contract(outcome: &FactorOutcome, target: u64, budget: usize) {
    assert!(outcome.iterations <= budget);
    if outcome.factored && !outcome.diverged {
        assert_eq!(outcome.y * outcome.x, target, "reported factors must hold");
    }
}

// ---------------------------------------------------------------------------
// Forward greedy
// ---------------------------------------------------------------------------

#[test]
fn greedy_accepts_the_all_ones_start_immediately() {
    // The driver starts from the all-ones input image, so the square of the
    // largest factor falls on iteration one, for any seed.
    let circuit = multiplier(2, full_adder_a1, half_adder_a1).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let outcome = GreedySearch::new(&circuit)
        .with_budget(10)
        .factor_with_rng(9, &mut rng)
        .unwrap();
    assert!(outcome.factored);
    assert_eq!(outcome.iterations, 1);
    assert_eq!((outcome.y, outcome.x), (3, 3));
}

#[test]
fn greedy_outcome_contract_across_seeds() {
    let circuit = multiplier(4, full_adder_a1, half_adder_a1).unwrap();
    for seed in 0..6u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = GreedySearch::new(&circuit)
            .with_budget(2000)
            .factor_with_rng(15, &mut rng)
            .unwrap();
        assert_contract(&outcome, 15, 2000);
        if outcome.factored {
            // 15 in four bits only splits as 3 · 5.
            let mut pair = [outcome.y, outcome.x];
            pair.sort_unstable();
            assert_eq!(pair, [3, 5]);
        }
    }
}

#[test]
fn greedy_runs_reproduce_under_one_seed() {
    let circuit = multiplier(4, full_adder_a1, half_adder_a1).unwrap();
    let run = || {
        let mut rng = SmallRng::seed_from_u64(42);
        GreedySearch::new(&circuit)
            .with_budget(500)
            .factor_with_rng(21, &mut rng)
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn greedy_probes_seven_times_eleven() {
    let circuit = multiplier(5, full_adder_a1, half_adder_a1).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let outcome = GreedySearch::new(&circuit)
        .with_budget(1000)
        .factor_with_rng(77, &mut rng)
        .unwrap();
    assert_contract(&outcome, 77, 1000);
    if outcome.factored {
        // 77 in five bits only splits as 7 · 11.
        let mut pair = [outcome.y, outcome.x];
        pair.sort_unstable();
        assert_eq!(pair, [7, 11]);
    }
}

#[test]
fn target_out_of_range_is_rejected() {
    let circuit = multiplier(4, full_adder_a1, half_adder_a1).unwrap();
    let err = GreedySearch::new(&circuit).factor(226).unwrap_err();
    assert!(matches!(
        err,
        SearchError::TargetOutOfRange {
            target: 226,
            bits: 4,
            max: 225,
        }
    ));
}

// ---------------------------------------------------------------------------
// Forward probabilistic
// ---------------------------------------------------------------------------

#[test]
fn softmax_outcome_contract() {
    let circuit = multiplier(3, full_adder_a1, half_adder_a1).unwrap();
    for seed in 0..4u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = SoftmaxSearch::new(&circuit)
            .with_budget(300)
            .factor_with_rng(6, &mut rng)
            .unwrap();
        assert_contract(&outcome, 6, 300);
    }
}

#[test]
fn softmax_accepts_the_all_ones_start_immediately() {
    let circuit = multiplier(3, full_adder_a1, half_adder_a1).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let outcome = SoftmaxSearch::new(&circuit)
        .with_budget(5)
        .factor_with_rng(49, &mut rng)
        .unwrap();
    assert!(outcome.factored);
    assert_eq!(outcome.iterations, 1);
}

// ---------------------------------------------------------------------------
// Continuous momentum descent
// ---------------------------------------------------------------------------

#[test]
fn momentum_outcome_contract() {
    let circuit = multiplier(3, full_adder_a1, half_adder_a1).unwrap();
    for seed in 0..4u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = MomentumSearch::new(&circuit)
            .with_budget(100)
            .factor_with_rng(6, &mut rng)
            .unwrap();
        assert!(outcome.iterations <= 100);
        assert!(!outcome.diverged || !outcome.factored);
    }
}

// ---------------------------------------------------------------------------
// Reverse descent
// ---------------------------------------------------------------------------

#[test]
fn reverse_outcome_contract() {
    let circuit = multiplier(3, full_adder_a1, half_adder_a1).unwrap();
    for seed in 0..4u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = ReverseSearch::new(&circuit)
            .with_budget(50)
            .factor_with_rng(15, &mut rng)
            .unwrap();
        assert_contract(&outcome, 15, 50);
    }
}

#[test]
fn reverse_rejects_out_of_range_targets() {
    let circuit = multiplier(3, full_adder_a1, half_adder_a1).unwrap();
    let err = ReverseSearch::new(&circuit).factor(50).unwrap_err();
    assert!(matches!(err, SearchError::TargetOutOfRange { max: 49, .. }));
}
