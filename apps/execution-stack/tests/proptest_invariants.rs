//! Property-based tests for planner and router invariants.
//!
//! These hold for every algorithm, randomization setting and book shape.

use proptest::prelude::*;
use rust_decimal::Decimal;

use execution_stack::domain::execution_tactics::{SlicingConfig, SlicingPlanner};
use execution_stack::domain::market_impact::{ImpactEstimator, ProxyImpactModel};
use execution_stack::domain::order_execution::ExecutionPolicy;
use execution_stack::domain::order_routing::{OrderRouter, QueuePosture, RouterConfig};
use execution_stack::{Algorithm, BookContext, OrderSide, OrderType, Urgency};

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Immediate),
        Just(Algorithm::Is),
        Just(Algorithm::Twap),
        Just(Algorithm::Vwap),
        Just(Algorithm::Pov),
    ]
}

fn side() -> impl Strategy<Value = OrderSide> {
    prop_oneof![Just(OrderSide::Buy), Just(OrderSide::Sell)]
}

fn urgency() -> impl Strategy<Value = Urgency> {
    prop_oneof![Just(Urgency::Normal), Just(Urgency::High)]
}

fn policy() -> impl Strategy<Value = ExecutionPolicy> {
    (
        algorithm(),
        1u32..50,
        0.01f64..=1.0,
        any::<bool>(),
        proptest::option::of(any::<u64>()),
    )
        .prop_map(|(algorithm, max_children, rate, randomize, seed)| {
            let policy = ExecutionPolicy::for_algorithm(algorithm)
                .with_max_children(max_children)
                .with_participation_rate(rate)
                .with_randomize_slices(randomize);
            match seed {
                Some(seed) => policy.with_seed(seed),
                None => policy,
            }
        })
}

proptest! {
    /// Children always sum to the parent, each child is positive, and
    /// indices are dense from 0.
    #[test]
    fn child_quantities_sum_to_parent(
        quantity in 1u64..100_000,
        policy in policy(),
        volume_rate in 0.0f64..10_000.0,
        jitter in 0.0f64..0.9,
    ) {
        let planner = SlicingPlanner::new(SlicingConfig {
            jitter_fraction: jitter,
            ..SlicingConfig::default()
        });
        let plans = planner.plan(quantity, &policy, volume_rate);

        prop_assert!(!plans.is_empty());
        prop_assert!(plans.len() as u64 <= quantity);
        prop_assert!(plans.len() as u32 <= policy.max_children.max(1));
        prop_assert_eq!(plans.iter().map(|p| p.quantity).sum::<u64>(), quantity);
        prop_assert!(plans.iter().all(|p| p.quantity >= 1));
        for (i, plan) in plans.iter().enumerate() {
            prop_assert_eq!(plan.index as usize, i);
        }
    }

    /// Without randomization the plan is a pure function of its inputs.
    #[test]
    fn unrandomized_plan_is_deterministic(
        quantity in 1u64..100_000,
        policy in policy(),
        volume_rate in 0.0f64..10_000.0,
    ) {
        let policy = policy.with_randomize_slices(false);
        let planner = SlicingPlanner::default();
        prop_assert_eq!(
            planner.plan(quantity, &policy, volume_rate),
            planner.plan(quantity, &policy, volume_rate)
        );
    }

    /// A fixed seed reproduces the randomized plan.
    #[test]
    fn seeded_plan_is_deterministic(
        quantity in 1u64..100_000,
        policy in policy(),
        seed in any::<u64>(),
    ) {
        let policy = policy.with_randomize_slices(true).with_seed(seed);
        let planner = SlicingPlanner::default();
        prop_assert_eq!(
            planner.plan(quantity, &policy, 500.0),
            planner.plan(quantity, &policy, 500.0)
        );
    }

    /// A spread wider than the threshold is always worked neutrally at mid.
    #[test]
    fn wide_spread_is_neutral_regardless_of_urgency(
        mid_cents in 1_000i64..1_000_000,
        half_spread_bps in 7i64..500,
        side in side(),
        urgency in urgency(),
        limit in any::<bool>(),
    ) {
        let mid = Decimal::new(mid_cents, 2);
        let half = mid * Decimal::new(half_spread_bps, 4);
        let book = BookContext::new(mid - half, mid + half, mid);
        let order_type = if limit { OrderType::Limit } else { OrderType::Market };

        let decision = OrderRouter::new(RouterConfig::default())
            .route(side, urgency, order_type, None, &book);

        prop_assert_eq!(decision.posture, QueuePosture::Neutral);
        prop_assert_eq!(decision.order_type, OrderType::Limit);
        prop_assert_eq!(decision.limit_price, Some(book.mid()));
    }

    /// Expected slippage is signed by side and the score grows with size.
    #[test]
    fn slippage_sign_follows_side(
        child in 1u64..10_000,
        extra in 0u64..10_000,
        rate in 0.01f64..=1.0,
    ) {
        let book = BookContext::new(
            Decimal::new(9_995, 2),
            Decimal::new(10_005, 2),
            Decimal::new(100, 0),
        );
        let model = ProxyImpactModel::default();
        let parent = child + extra;

        let buy = model.estimate(&book, OrderSide::Buy, rate, child, parent);
        let sell = model.estimate(&book, OrderSide::Sell, rate, child, parent);

        prop_assert!(buy.expected_slippage > Decimal::ZERO);
        prop_assert_eq!(sell.expected_slippage, -buy.expected_slippage);
        prop_assert!(buy.impact_score > 0.0);
    }
}
