//! Slicing planner.
//!
//! Splits a parent quantity into ordered children. Quantities always sum to
//! the parent quantity and every child is at least 1.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::execution_tactics::value_objects::{ChildOrderPlan, SlicingConfig};
use crate::domain::order_execution::value_objects::{Algorithm, ExecutionPolicy, ExecutionRequest};

/// Stateless slicing planner.
#[derive(Debug, Clone, Default)]
pub struct SlicingPlanner {
    config: SlicingConfig,
}

impl SlicingPlanner {
    /// Create a planner.
    #[must_use]
    pub const fn new(config: SlicingConfig) -> Self {
        Self { config }
    }

    /// Planner parameters.
    #[must_use]
    pub const fn config(&self) -> &SlicingConfig {
        &self.config
    }

    /// Plan the children of a validated request.
    #[must_use]
    pub fn plan_request(&self, request: &ExecutionRequest) -> Vec<ChildOrderPlan> {
        self.plan(request.quantity(), request.policy(), request.book().volume_rate)
    }

    /// Plan children for `quantity` under `policy`.
    ///
    /// `quantity` must be positive; [`ExecutionRequest`] guarantees it.
    #[must_use]
    pub fn plan(
        &self,
        quantity: u64,
        policy: &ExecutionPolicy,
        volume_rate: f64,
    ) -> Vec<ChildOrderPlan> {
        let count = self.child_count(quantity, policy, volume_rate);
        let mut sizes = even_split(quantity, count);

        if policy.randomize_slices && sizes.len() > 1 && self.config.jitter_fraction > 0.0 {
            let seed = policy
                .seed
                .or(self.config.seed)
                .unwrap_or_else(|| rand::rng().random());
            let mut rng = StdRng::seed_from_u64(seed);
            perturb(&mut sizes, self.config.jitter_fraction, &mut rng);
        }

        let interval = if policy.algorithm.is_time_sliced() {
            self.config.slice_interval()
        } else {
            Duration::ZERO
        };

        sizes
            .into_iter()
            .enumerate()
            .map(|(i, qty)| {
                let index = i as u32;
                ChildOrderPlan::new(index, qty, interval.saturating_mul(index))
            })
            .collect()
    }

    fn child_count(&self, quantity: u64, policy: &ExecutionPolicy, volume_rate: f64) -> u64 {
        let max_children = u64::from(policy.max_children.max(1));
        let count = match policy.algorithm {
            Algorithm::Immediate | Algorithm::Is => 1,
            Algorithm::Twap => max_children
                .min(u64::from(self.config.horizon_slices.max(1)))
                .min(quantity),
            Algorithm::Vwap | Algorithm::Pov => {
                let target = (policy.participation_rate * volume_rate).floor();
                if !target.is_finite() || target < 1.0 {
                    return 1;
                }
                quantity
                    .div_ceil(target as u64)
                    .min(max_children)
                    .min(quantity)
            }
        };
        count.max(1)
    }
}

/// Equal split with the remainder on the last child.
fn even_split(quantity: u64, count: u64) -> Vec<u64> {
    let base = quantity / count;
    let remainder = quantity % count;
    let mut sizes = vec![base; count as usize];
    if let Some(last) = sizes.last_mut() {
        *last += remainder;
    }
    sizes
}

/// Perturb every non-final child by at most `jitter` of its size, keeping
/// each child at least 1 and leaving at least 1 for every later child. The
/// last child absorbs the exact remainder.
fn perturb<R: Rng + ?Sized>(sizes: &mut [u64], jitter: f64, rng: &mut R) {
    let total: u64 = sizes.iter().sum();
    let count = sizes.len();
    let mut remaining = total;

    for (i, size) in sizes.iter_mut().enumerate().take(count - 1) {
        let max_delta = (*size as f64 * jitter).floor() as i64;
        let delta = if max_delta > 0 {
            rng.random_range(-max_delta..=max_delta)
        } else {
            0
        };
        let later_children = (count - 1 - i) as u64;
        let upper = remaining - later_children;
        let candidate = (*size as i64 + delta).max(1) as u64;
        *size = candidate.min(upper);
        remaining -= *size;
    }

    if let Some(last) = sizes.last_mut() {
        *last = remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::value_objects::ExecutionPolicy;

    fn quantities(plans: &[ChildOrderPlan]) -> Vec<u64> {
        plans.iter().map(|p| p.quantity).collect()
    }

    fn fixed(algorithm: Algorithm, max_children: u32) -> ExecutionPolicy {
        ExecutionPolicy::for_algorithm(algorithm)
            .with_max_children(max_children)
            .with_randomize_slices(false)
    }

    #[test]
    fn immediate_is_one_child() {
        let planner = SlicingPlanner::default();
        let plans = planner.plan(100, &fixed(Algorithm::Immediate, 10), 0.0);
        assert_eq!(quantities(&plans), vec![100]);
        assert_eq!(plans[0].offset, Duration::ZERO);

        let plans = planner.plan(100, &fixed(Algorithm::Is, 10), 0.0);
        assert_eq!(quantities(&plans), vec![100]);
    }

    #[test]
    fn twap_even_split() {
        let plans = SlicingPlanner::default().plan(100, &fixed(Algorithm::Twap, 4), 0.0);
        assert_eq!(quantities(&plans), vec![25, 25, 25, 25]);
    }

    #[test]
    fn twap_remainder_on_last() {
        let plans = SlicingPlanner::default().plan(101, &fixed(Algorithm::Twap, 4), 0.0);
        assert_eq!(quantities(&plans), vec![25, 25, 25, 26]);
    }

    #[test]
    fn twap_capped_by_horizon_and_quantity() {
        let planner = SlicingPlanner::default();
        assert_eq!(planner.plan(100, &fixed(Algorithm::Twap, 20), 0.0).len(), 5);
        assert_eq!(quantities(&planner.plan(3, &fixed(Algorithm::Twap, 4), 0.0)), vec![1, 1, 1]);
    }

    #[test]
    fn twap_offsets_follow_interval() {
        let plans = SlicingPlanner::default().plan(100, &fixed(Algorithm::Twap, 4), 0.0);
        let offsets: Vec<u64> = plans.iter().map(|p| p.offset.as_millis() as u64).collect();
        assert_eq!(offsets, vec![0, 1_000, 2_000, 3_000]);
        let indices: Vec<u32> = plans.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn vwap_sized_from_participation() {
        // target = floor(0.1 × 300) = 30, ceil(100 / 30) = 4
        let policy = fixed(Algorithm::Vwap, 10).with_participation_rate(0.1);
        let plans = SlicingPlanner::default().plan(100, &policy, 300.0);
        assert_eq!(quantities(&plans), vec![25, 25, 25, 25]);
    }

    #[test]
    fn pov_capped_by_max_children() {
        // target = floor(0.2 × 50) = 10, ceil(1000 / 10) = 100, capped at 8
        let policy = fixed(Algorithm::Pov, 8).with_participation_rate(0.2);
        let plans = SlicingPlanner::default().plan(1_000, &policy, 50.0);
        assert_eq!(plans.len(), 8);
        assert_eq!(quantities(&plans).iter().sum::<u64>(), 1_000);
    }

    #[test]
    fn participation_without_volume_is_one_child() {
        let policy = fixed(Algorithm::Vwap, 10);
        let plans = SlicingPlanner::default().plan(500, &policy, 0.0);
        assert_eq!(quantities(&plans), vec![500]);
    }

    #[test]
    fn randomized_plan_keeps_sum_and_bounds() {
        let policy = ExecutionPolicy::for_algorithm(Algorithm::Twap)
            .with_max_children(5)
            .with_seed(42);
        let plans = SlicingPlanner::default().plan(1_000, &policy, 0.0);
        assert_eq!(plans.len(), 5);
        assert_eq!(quantities(&plans).iter().sum::<u64>(), 1_000);
        for plan in &plans[..4] {
            assert!((170..=230).contains(&plan.quantity), "{plan:?}");
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let policy = ExecutionPolicy::for_algorithm(Algorithm::Twap)
            .with_max_children(5)
            .with_seed(7);
        let planner = SlicingPlanner::default();
        assert_eq!(planner.plan(997, &policy, 0.0), planner.plan(997, &policy, 0.0));
    }

    #[test]
    fn config_seed_used_when_request_has_none() {
        let planner = SlicingPlanner::new(SlicingConfig {
            seed: Some(99),
            ..Default::default()
        });
        let policy = ExecutionPolicy::for_algorithm(Algorithm::Twap).with_max_children(5);
        assert_eq!(planner.plan(1_234, &policy, 0.0), planner.plan(1_234, &policy, 0.0));
    }

    #[test]
    fn small_slices_stay_positive() {
        let policy = ExecutionPolicy::for_algorithm(Algorithm::Twap)
            .with_max_children(5)
            .with_seed(5);
        let plans = SlicingPlanner::default().plan(6, &policy, 0.0);
        assert!(plans.iter().all(|p| p.quantity >= 1));
        assert_eq!(quantities(&plans).iter().sum::<u64>(), 6);
    }
}
